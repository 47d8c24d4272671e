//! Size negotiation between the grid and its children.
//!
//! The grid never lets a child choose its own size: each child is measured
//! under a [`Constraints`] whose minimum and maximum are both pinned to the
//! child's cell. Whatever the child reports is coerced into those bounds.

use std::fmt;

use trellis_core::geometry::{Point, Rect, Size};

/// Minimum and maximum size a child may take.
///
/// # Examples
///
/// ```
/// # use trellis::measure::Constraints;
/// # use trellis_core::geometry::Size;
/// let fixed = Constraints::fixed(Size::new(150, 100));
/// assert!(fixed.is_fixed());
/// assert_eq!(fixed.constrain(Size::new(10, 500)), Size::new(150, 100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constraints {
    min: Size,
    max: Size,
}

impl Constraints {
    /// Creates constraints from explicit bounds.
    pub fn new(min: Size, max: Size) -> Self {
        Self { min, max }
    }

    /// Constraints that only admit exactly `size`.
    pub fn fixed(size: Size) -> Self {
        Self::new(size, size)
    }

    /// Constraints from zero up to `max`.
    pub fn loose(max: Size) -> Self {
        Self::new(Size::default(), max)
    }

    pub fn min(&self) -> Size {
        self.min
    }

    pub fn max(&self) -> Size {
        self.max
    }

    /// Returns true when minimum and maximum coincide.
    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    /// Coerces `size` into these constraints.
    pub fn constrain(&self, size: Size) -> Size {
        size.clamp(self.min, self.max)
    }
}

impl fmt::Display for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}..={}x{}",
            self.min.width(),
            self.min.height(),
            self.max.width(),
            self.max.height()
        )
    }
}

/// A child element that the grid measures and places.
///
/// Only [`measure`](GridChild::measure) is required. Children laid out by the
/// intrinsic-fit policy must also report an
/// [`intrinsic_size`](GridChild::intrinsic_size).
pub trait GridChild {
    /// Measures the child under `constraints` and returns its chosen size.
    fn measure(&mut self, constraints: Constraints) -> Size;

    /// The size the child would like to have, before any cell is assigned.
    ///
    /// The default reports nothing, which the fixed-grid policy never asks
    /// for and the intrinsic-fit policy treats as an error.
    fn intrinsic_size(&self) -> Option<Size> {
        None
    }

    /// Receives the final position and size, relative to the container's origin.
    fn place(&mut self, _position: Point, _size: Size) {}
}

impl<C: GridChild + ?Sized> GridChild for Box<C> {
    fn measure(&mut self, constraints: Constraints) -> Size {
        (**self).measure(constraints)
    }

    fn intrinsic_size(&self) -> Option<Size> {
        (**self).intrinsic_size()
    }

    fn place(&mut self, position: Point, size: Size) {
        (**self).place(position, size)
    }
}

impl<C: GridChild + ?Sized> GridChild for &mut C {
    fn measure(&mut self, constraints: Constraints) -> Size {
        (**self).measure(constraints)
    }

    fn intrinsic_size(&self) -> Option<Size> {
        (**self).intrinsic_size()
    }

    fn place(&mut self, position: Point, size: Size) {
        (**self).place(position, size)
    }
}

/// A leaf whose preferred size is fixed.
impl GridChild for Size {
    fn measure(&mut self, constraints: Constraints) -> Size {
        constraints.constrain(*self)
    }

    fn intrinsic_size(&self) -> Option<Size> {
        Some(*self)
    }
}

/// Intrinsic sizes of the children of one pass, looked up by index.
///
/// Resolvers receive children through this trait so they can ask for
/// intrinsic sizes without taking ownership of, or mutating, the children.
pub trait IntrinsicSizes {
    /// Number of children.
    fn len(&self) -> usize;

    /// Returns true when there are no children.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Intrinsic size of the child at `index`, if it can report one.
    fn intrinsic_size(&self, index: usize) -> Option<Size>;
}

impl<C: GridChild> IntrinsicSizes for &[C] {
    fn len(&self) -> usize {
        <[C]>::len(self)
    }

    fn intrinsic_size(&self, index: usize) -> Option<Size> {
        self.get(index).and_then(GridChild::intrinsic_size)
    }
}

/// The result of measuring one child: the size it will occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measured {
    constraints: Constraints,
    size: Size,
}

impl Measured {
    /// The constraints the child was measured under.
    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    /// The size the child will occupy.
    pub fn size(&self) -> Size {
        self.size
    }
}

/// Measures `child` so that it occupies exactly `rect`.
///
/// The constraint is fixed to the rectangle's size and the child's answer is
/// coerced into it, so the measured size always equals `rect.size()`.
pub fn measure_child<C: GridChild + ?Sized>(child: &mut C, rect: Rect) -> Measured {
    let constraints = Constraints::fixed(rect.size());
    let size = constraints.constrain(child.measure(constraints));
    Measured { constraints, size }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Child that ignores its constraints entirely.
    struct Stubborn {
        seen: Option<Constraints>,
    }

    impl GridChild for Stubborn {
        fn measure(&mut self, constraints: Constraints) -> Size {
            self.seen = Some(constraints);
            Size::new(9999, 1)
        }
    }

    #[test]
    fn test_measure_child_pins_size() {
        let mut child = Stubborn { seen: None };
        let rect = Rect::from_xywh(0, 100, 150, 100);

        let measured = measure_child(&mut child, rect);

        assert_eq!(measured.size(), Size::new(150, 100));
        assert_eq!(child.seen, Some(Constraints::fixed(Size::new(150, 100))));
        assert!(measured.constraints().is_fixed());
    }

    #[test]
    fn test_size_as_child() {
        let mut leaf = Size::new(40, 20);
        assert_eq!(leaf.intrinsic_size(), Some(Size::new(40, 20)));
        assert_eq!(
            leaf.measure(Constraints::loose(Size::new(30, 30))),
            Size::new(30, 20)
        );
    }

    #[test]
    fn test_intrinsic_sizes_over_slice() {
        let children: &[Size] = &[Size::new(1, 2), Size::new(3, 4)];
        let sizes: &dyn IntrinsicSizes = &children;
        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes.intrinsic_size(1), Some(Size::new(3, 4)));
        assert_eq!(sizes.intrinsic_size(2), None);
    }

    #[test]
    fn test_boxed_children_forward() {
        let mut children: Vec<Box<dyn GridChild>> = vec![Box::new(Size::new(5, 5))];
        let measured = measure_child(&mut children[0], Rect::from_xywh(0, 0, 10, 10));
        assert_eq!(measured.size(), Size::new(10, 10));
        let sizes: &dyn IntrinsicSizes = &children.as_slice();
        assert_eq!(sizes.intrinsic_size(0), Some(Size::new(5, 5)));
    }

    #[test]
    fn test_constraints_display() {
        let c = Constraints::new(Size::new(1, 2), Size::new(3, 4));
        assert_eq!(c.to_string(), "1x2..=3x4");
        assert!(!c.is_fixed());
    }
}
