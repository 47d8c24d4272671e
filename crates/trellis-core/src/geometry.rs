//! Pixel geometry for resolved layouts.
//!
//! All values are integer pixels. Grid layout divides the parent size by the
//! number of grid units with integer division, so there is no fractional
//! geometry anywhere in the pipeline.
//!
//! # Overview
//!
//! - [`Point`] - A position relative to the container's origin
//! - [`Size`] - Width and height dimensions
//! - [`Rect`] - A top-left origin plus a size
//!
//! # Coordinate System
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! The origin is the top-left corner of the container; X grows rightward and
//! Y grows downward.

use serde::Deserialize;

/// A 2D position in container pixel space.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::Point;
/// let p = Point::new(10, 20).add_point(Point::new(5, -5));
/// assert_eq!(p.x(), 15);
/// assert_eq!(p.y(), 15);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> i32 {
        self.y
    }

    /// Checks if both coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Adds another point to this point, saturating on overflow.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
        }
    }

    /// Subtracts another point from this point, saturating on overflow.
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x.saturating_sub(other.x),
            y: self.y.saturating_sub(other.y),
        }
    }
}

/// Width and height of an element, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Size {
    width: i32,
    height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> i32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> i32 {
        self.height
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0 && self.height == 0
    }

    /// Returns a new size with the larger width and the larger height of both sizes
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns a new size with the smaller width and the smaller height of both sizes
    pub fn min(self, other: Size) -> Self {
        Self {
            width: self.width.min(other.width),
            height: self.height.min(other.height),
        }
    }

    /// Clamps each dimension into `min..=max`, per axis.
    ///
    /// When `min` exceeds `max` on an axis, `min` wins, so the result never
    /// shrinks below the lower bound.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::Size;
    /// let clamped = Size::new(500, 5).clamp(Size::new(10, 10), Size::new(100, 100));
    /// assert_eq!(clamped, Size::new(100, 10));
    /// ```
    pub fn clamp(self, min: Size, max: Size) -> Self {
        Self {
            width: self.width.min(max.width).max(min.width),
            height: self.height.min(max.height).max(min.height),
        }
    }

    /// Grows both dimensions by `amount` on every side.
    pub fn add_padding(self, amount: i32) -> Self {
        Self {
            width: self.width.saturating_add(amount.saturating_mul(2)),
            height: self.height.saturating_add(amount.saturating_mul(2)),
        }
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::{Point, Rect, Size};
/// let rect = Rect::new(Point::new(0, 100), Size::new(150, 100));
/// assert_eq!(rect.max_x(), 150);
/// assert_eq!(rect.max_y(), 200);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    origin: Point,
    size: Size,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Shorthand for building a rectangle out of four scalars.
    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(Point::new(x, y), Size::new(width, height))
    }

    pub fn origin(self) -> Point {
        self.origin
    }

    pub fn size(self) -> Size {
        self.size
    }

    pub fn x(self) -> i32 {
        self.origin.x
    }

    pub fn y(self) -> i32 {
        self.origin.y
    }

    pub fn width(self) -> i32 {
        self.size.width
    }

    pub fn height(self) -> i32 {
        self.size.height
    }

    /// Returns the exclusive right edge
    pub fn max_x(self) -> i32 {
        self.origin.x.saturating_add(self.size.width)
    }

    /// Returns the exclusive bottom edge
    pub fn max_y(self) -> i32 {
        self.origin.y.saturating_add(self.size.height)
    }

    /// Checks whether the two rectangles share any interior area.
    ///
    /// Rectangles that only touch along an edge do not intersect.
    pub fn intersects(self, other: Rect) -> bool {
        self.x() < other.max_x()
            && other.x() < self.max_x()
            && self.y() < other.max_y()
            && other.y() < self.max_y()
    }

    /// Moves the rectangle by the given offset; the size is unchanged.
    pub fn translate(self, offset: Point) -> Self {
        Self {
            origin: self.origin.add_point(offset),
            size: self.size,
        }
    }

    /// Returns the smallest rectangle containing both rectangles.
    pub fn union(self, other: Rect) -> Self {
        let min_x = self.x().min(other.x());
        let min_y = self.y().min(other.y());
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Self::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-1000i32..1000, -1000i32..1000, 0i32..500, 0i32..500)
            .prop_map(|(x, y, w, h)| Rect::from_xywh(x, y, w, h))
    }

    fn size_strategy() -> impl Strategy<Value = Size> {
        (0i32..1000, 0i32..1000).prop_map(|(w, h)| Size::new(w, h))
    }

    /// Union should contain both inputs.
    fn check_union_contains_both(a: Rect, b: Rect) -> Result<(), TestCaseError> {
        let u = a.union(b);
        for r in [a, b] {
            prop_assert!(u.x() <= r.x() && u.y() <= r.y());
            prop_assert!(u.max_x() >= r.max_x() && u.max_y() >= r.max_y());
        }
        Ok(())
    }

    /// Clamping should land inside the bounds whenever the bounds are ordered.
    fn check_clamp_within_bounds(s: Size, lo: Size, hi: Size) -> Result<(), TestCaseError> {
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        let clamped = s.clamp(lo, hi);

        prop_assert!(clamped.width() >= lo.width() && clamped.width() <= hi.width());
        prop_assert!(clamped.height() >= lo.height() && clamped.height() <= hi.height());
        Ok(())
    }

    proptest! {
        #[test]
        fn union_contains_both(a in rect_strategy(), b in rect_strategy()) {
            check_union_contains_both(a, b)?;
        }

        #[test]
        fn clamp_within_bounds(s in size_strategy(), lo in size_strategy(), hi in size_strategy()) {
            check_clamp_within_bounds(s, lo, hi)?;
        }
    }
}
