//! Placement of measured children and the result of a layout pass.

use log::trace;

use trellis_core::{
    bounds::GridBounds,
    cell::CellKey,
    geometry::{Point, Rect, Size},
};

use crate::{
    measure::{GridChild, Measured},
    resolve::GridGeometry,
};

/// Where one child ended up in the current pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    key: CellKey,
    rect: Rect,
    measured: Measured,
    changed: bool,
}

impl Placement {
    pub(crate) fn new(key: CellKey, rect: Rect, measured: Measured, changed: bool) -> Self {
        Self {
            key,
            rect,
            measured,
            changed,
        }
    }

    /// Key of the cell the child was declared with.
    pub fn key(&self) -> CellKey {
        self.key
    }

    /// The cell's pixel rectangle, relative to the container.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn position(&self) -> Point {
        self.rect.origin()
    }

    /// The size the child was measured to.
    pub fn size(&self) -> Size {
        self.measured.size()
    }

    pub fn measured(&self) -> Measured {
        self.measured
    }

    /// Returns true when the rectangle differs from the previous pass, or
    /// when the cell had no rectangle in the previous pass.
    pub fn changed(&self) -> bool {
        self.changed
    }
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOutput {
    size: Size,
    unit: Size,
    bounds: GridBounds,
    placements: Vec<Placement>,
}

impl LayoutOutput {
    /// The container's own size. Always the full parent size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Pixel size of one grid unit.
    pub fn unit(&self) -> Size {
        self.unit
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Placements in declaration order, index-aligned with the children.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Returns the placement of the cell declared under `key`.
    pub fn placement(&self, key: &CellKey) -> Option<&Placement> {
        self.placements.iter().find(|placement| placement.key == *key)
    }

    /// Number of placements whose rectangle moved or resized since the last pass.
    pub fn changed_count(&self) -> usize {
        self.placements.iter().filter(|p| p.changed).count()
    }
}

/// Places every measured child at its cell's origin.
///
/// `children` and `placements` are index-aligned. Overlapping cells are
/// placed as declared; the order of placement carries no meaning. The
/// container always reports `parent` as its own size.
pub fn place_all<C: GridChild>(
    parent: Size,
    children: &mut [C],
    placements: Vec<Placement>,
    geometry: &GridGeometry,
) -> LayoutOutput {
    for (child, placement) in children.iter_mut().zip(&placements) {
        trace!(
            key:% = placement.key,
            position:? = placement.position(),
            size:? = placement.size();
            "Placing child"
        );
        child.place(placement.position(), placement.size());
    }

    LayoutOutput {
        size: parent,
        unit: geometry.unit(),
        bounds: geometry.bounds(),
        placements,
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::cell::CellDeclaration;

    use super::*;
    use crate::measure::{Constraints, measure_child};

    #[derive(Default)]
    struct Recorder {
        placed: Option<(Point, Size)>,
    }

    impl GridChild for Recorder {
        fn measure(&mut self, constraints: Constraints) -> Size {
            constraints.min()
        }

        fn place(&mut self, position: Point, size: Size) {
            self.placed = Some((position, size));
        }
    }

    #[test]
    fn test_place_all_positions_children() {
        let cells = [CellDeclaration::new(0, 0, 2, 1), CellDeclaration::unit(0, 1)];
        let geometry = GridGeometry::new(
            &cells,
            GridBounds::from_cells(&cells),
            Size::new(150, 100),
        );
        let mut children = [Recorder::default(), Recorder::default()];
        let placements = children
            .iter_mut()
            .zip(geometry.rects())
            .enumerate()
            .map(|(index, (child, rect))| {
                Placement::new(
                    CellKey::Positional(index),
                    *rect,
                    measure_child(child, *rect),
                    true,
                )
            })
            .collect();

        let output = place_all(Size::new(300, 200), &mut children, placements, &geometry);

        assert_eq!(output.size(), Size::new(300, 200));
        assert_eq!(output.unit(), Size::new(150, 100));
        assert_eq!(
            children[1].placed,
            Some((Point::new(0, 100), Size::new(150, 100)))
        );
        assert_eq!(output.changed_count(), 2);
        assert_eq!(
            output.placement(&CellKey::Positional(0)).map(Placement::rect),
            Some(Rect::from_xywh(0, 0, 300, 100))
        );
    }

    #[test]
    fn test_empty_pass_keeps_parent_size() {
        let geometry = GridGeometry::new(&[], GridBounds::EMPTY, Size::new(1, 1));
        let mut children: [Recorder; 0] = [];

        let output = place_all(Size::new(100, 50), &mut children, Vec::new(), &geometry);

        assert_eq!(output.size(), Size::new(100, 50));
        assert!(output.placements().is_empty());
        assert!(output.bounds().is_empty());
    }
}
