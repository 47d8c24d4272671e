//! The grid container: one registry and one resolver driving layout passes.
//!
//! A pass always runs in the same order: declare, seal, bounds, unit size,
//! rectangles, measure, place. The container's pass API encodes that order
//! in types, so a pass cannot declare after sealing or lay out before it.
//!
//! ```
//! use trellis::{container::GridContainer, resolve::SizingPolicy};
//! use trellis_core::geometry::{Rect, Size};
//!
//! let mut grid = GridContainer::new(SizingPolicy::FixedGrid);
//! let mut children = [Size::new(10, 10), Size::new(10, 10)];
//!
//! let mut pass = grid.begin_pass();
//! pass.cell_span(0, 0, 2, 1)?;
//! pass.cell(0, 1)?;
//! let output = pass.seal().layout(Size::new(300, 200), &mut children)?;
//!
//! assert_eq!(output.placements()[0].rect(), Rect::from_xywh(0, 0, 300, 100));
//! assert_eq!(output.placements()[1].rect(), Rect::from_xywh(0, 100, 150, 100));
//! # Ok::<(), trellis::TrellisError>(())
//! ```

use log::debug;

use trellis_core::{
    bounds::GridBounds,
    cell::{CellDeclaration, CellKey},
    geometry::{Rect, Size},
    identifier::Id,
};

use crate::{
    config::LayoutConfig,
    error::TrellisError,
    measure::{GridChild, measure_child},
    place::{LayoutOutput, Placement, place_all},
    registry::CellRegistry,
    resolve::{Resolver, SizingPolicy, resolver_for},
};

/// A container that arranges its children on a sparse grid.
///
/// The registry keeps each cell's rectangle from the previous pass as its
/// resource, which is what [`Placement::changed`] is computed from.
#[derive(Debug)]
pub struct GridContainer {
    registry: CellRegistry<Rect>,
    resolver: Box<dyn Resolver>,
}

impl GridContainer {
    /// Creates a container using the resolver for `policy`.
    pub fn new(policy: SizingPolicy) -> Self {
        Self::with_resolver(resolver_for(policy))
    }

    /// Creates a container around a specific resolver.
    pub fn with_resolver(resolver: Box<dyn Resolver>) -> Self {
        Self {
            registry: CellRegistry::new(),
            resolver,
        }
    }

    /// Creates a container with the policy from `config`.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.policy())
    }

    pub fn policy(&self) -> SizingPolicy {
        self.resolver.policy()
    }

    /// Read access to the cell registry.
    pub fn registry(&self) -> &CellRegistry<Rect> {
        &self.registry
    }

    /// Direct access to the cell registry.
    ///
    /// Declaring through the registry bypasses the pass types; ordering
    /// mistakes are then reported by [`layout`](Self::layout) as errors.
    pub fn registry_mut(&mut self) -> &mut CellRegistry<Rect> {
        &mut self.registry
    }

    /// Starts a new pass and returns the handle used to declare its cells.
    pub fn begin_pass(&mut self) -> Declarations<'_> {
        self.registry.begin_pass();
        Declarations { container: self }
    }

    /// Lays out `children` against the sealed registry.
    ///
    /// `children` must be index-aligned with the sealed declarations. The
    /// registry returns to idle afterwards whether or not the pass succeeds.
    ///
    /// # Errors
    ///
    /// - [`TrellisError::Unsealed`] when the registry has not been sealed.
    /// - [`TrellisError::CellCountMismatch`] when the number of children
    ///   differs from the number of sealed cells.
    /// - Any error from the resolver.
    pub fn layout<C: GridChild>(
        &mut self,
        parent: Size,
        children: &mut [C],
    ) -> Result<LayoutOutput, TrellisError> {
        let result = self.run_pass(parent, children);
        self.registry.finish_pass();
        result
    }

    fn run_pass<C: GridChild>(
        &mut self,
        parent: Size,
        children: &mut [C],
    ) -> Result<LayoutOutput, TrellisError> {
        if !self.registry.is_sealed() {
            return Err(TrellisError::Unsealed);
        }

        let (keys, cells): (Vec<CellKey>, Vec<CellDeclaration>) = self
            .registry
            .iter()
            .map(|(key, cell)| (key, *cell))
            .unzip();
        if cells.len() != children.len() {
            return Err(TrellisError::CellCountMismatch {
                cells: cells.len(),
                children: children.len(),
            });
        }

        let bounds = GridBounds::from_cells(&cells);
        let intrinsic: &[C] = children;
        let geometry = self.resolver.resolve(&cells, bounds, parent, &intrinsic)?;

        let mut placements = Vec::with_capacity(cells.len());
        let cells_and_children = keys
            .into_iter()
            .zip(geometry.rects())
            .zip(children.iter_mut());
        for ((key, rect), child) in cells_and_children {
            let measured = measure_child(child, *rect);
            let changed = match self.registry.set_resource(&key, *rect) {
                Ok(Some(previous)) => previous != *rect,
                Ok(None) | Err(_) => true,
            };
            placements.push(Placement::new(key, *rect, measured, changed));
        }

        let output = place_all(parent, children, placements, &geometry);
        debug!(
            policy:% = self.resolver.policy(),
            cells = output.placements().len(),
            changed = output.changed_count(),
            unit:? = output.unit();
            "Grid pass complete"
        );
        Ok(output)
    }
}

/// The declaring half of a pass.
///
/// Dropping it without sealing abandons the pass. The cells of the previous
/// sealed pass, and the rectangles kept for them, stay as they were until the
/// next [`GridContainer::begin_pass`].
#[derive(Debug)]
pub struct Declarations<'a> {
    container: &'a mut GridContainer,
}

impl<'a> Declarations<'a> {
    /// Declares a 1x1 cell for the next child.
    ///
    /// # Errors
    ///
    /// See [`CellRegistry::declare`].
    pub fn cell(&mut self, grid_x: i32, grid_y: i32) -> Result<usize, TrellisError> {
        self.cell_span(grid_x, grid_y, 1, 1)
    }

    /// Declares a cell spanning `width` columns and `height` rows.
    ///
    /// # Errors
    ///
    /// See [`CellRegistry::declare`].
    pub fn cell_span(
        &mut self,
        grid_x: i32,
        grid_y: i32,
        width: i32,
        height: i32,
    ) -> Result<usize, TrellisError> {
        self.container
            .registry
            .declare_cell(grid_x, grid_y, width, height)
    }

    /// Declares a cell under a stable key.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::DuplicateKey`] when `key` was already used in
    /// this pass.
    pub fn keyed(
        &mut self,
        key: impl Into<Id>,
        grid_x: i32,
        grid_y: i32,
        width: i32,
        height: i32,
    ) -> Result<usize, TrellisError> {
        self.container
            .registry
            .declare_keyed(key, grid_x, grid_y, width, height)
    }

    /// Number of cells declared so far.
    pub fn len(&self) -> usize {
        self.container.registry.cursor()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finalizes the declarations of this pass.
    pub fn seal(self) -> SealedPass<'a> {
        self.container.registry.seal();
        SealedPass {
            container: self.container,
        }
    }
}

/// A pass whose cell list is final.
#[derive(Debug)]
pub struct SealedPass<'a> {
    container: &'a mut GridContainer,
}

impl SealedPass<'_> {
    /// Grid bounds of the sealed cells.
    pub fn bounds(&self) -> GridBounds {
        self.container.registry.bounds()
    }

    /// Number of sealed cells, which is also the number of children expected.
    pub fn len(&self) -> usize {
        self.container.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.registry.is_empty()
    }

    /// Resolves, measures and places `children`, ending the pass.
    ///
    /// # Errors
    ///
    /// See [`GridContainer::layout`].
    pub fn layout<C: GridChild>(
        self,
        parent: Size,
        children: &mut [C],
    ) -> Result<LayoutOutput, TrellisError> {
        self.container.layout(parent, children)
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::geometry::Point;

    use super::*;
    use crate::{measure::Constraints, registry::Phase};

    /// Child that records its placement and reports a fixed intrinsic size.
    #[derive(Debug, Default)]
    struct Widget {
        intrinsic: Option<Size>,
        measured_with: Option<Constraints>,
        placed: Option<(Point, Size)>,
    }

    impl Widget {
        fn sized(width: i32, height: i32) -> Self {
            Self {
                intrinsic: Some(Size::new(width, height)),
                ..Self::default()
            }
        }
    }

    impl GridChild for Widget {
        fn measure(&mut self, constraints: Constraints) -> Size {
            self.measured_with = Some(constraints);
            self.intrinsic.unwrap_or_default()
        }

        fn intrinsic_size(&self) -> Option<Size> {
            self.intrinsic
        }

        fn place(&mut self, position: Point, size: Size) {
            self.placed = Some((position, size));
        }
    }

    fn demo_pass(
        grid: &mut GridContainer,
        show_small: bool,
        children: &mut [Widget],
    ) -> Result<LayoutOutput, TrellisError> {
        let mut pass = grid.begin_pass();
        pass.keyed("hello", 0, 0, 2, 1)?;
        if show_small {
            pass.keyed("small", 0, 1, 1, 1)?;
        }
        pass.keyed("button", 1, 1, 1, 1)?;
        pass.seal().layout(Size::new(300, 200), children)
    }

    #[test]
    fn test_fixed_grid_pass() {
        let mut grid = GridContainer::new(SizingPolicy::FixedGrid);
        let mut children = [Widget::default(), Widget::default(), Widget::default()];

        let output = demo_pass(&mut grid, true, &mut children).unwrap();

        assert_eq!(output.size(), Size::new(300, 200));
        assert_eq!(output.unit(), Size::new(150, 100));
        assert_eq!(
            children[0].placed,
            Some((Point::new(0, 0), Size::new(300, 100)))
        );
        assert_eq!(
            children[2].placed,
            Some((Point::new(150, 100), Size::new(150, 100)))
        );
        assert_eq!(
            children[1].measured_with,
            Some(Constraints::fixed(Size::new(150, 100)))
        );
        assert_eq!(grid.registry().phase(), Phase::Idle);
    }

    #[test]
    fn test_toggling_child_keeps_button_unchanged() {
        let mut grid = GridContainer::new(SizingPolicy::FixedGrid);
        let mut three = [Widget::default(), Widget::default(), Widget::default()];
        demo_pass(&mut grid, true, &mut three).unwrap();

        let mut two = [Widget::default(), Widget::default()];
        let output = demo_pass(&mut grid, false, &mut two).unwrap();

        let button = output.placement(&CellKey::from("button")).unwrap();
        assert!(!button.changed());
        assert_eq!(button.rect(), Rect::from_xywh(150, 100, 150, 100));
        assert_eq!(output.changed_count(), 0);
        assert_eq!(grid.registry().len(), 2);
    }

    #[test]
    fn test_first_pass_marks_everything_changed() {
        let mut grid = GridContainer::new(SizingPolicy::FixedGrid);
        let mut children = [Widget::default(), Widget::default(), Widget::default()];

        let output = demo_pass(&mut grid, true, &mut children).unwrap();

        assert_eq!(output.changed_count(), 3);
    }

    #[test]
    fn test_count_mismatch_aborts_pass() {
        let mut grid = GridContainer::new(SizingPolicy::FixedGrid);
        let mut children = [Widget::default()];

        let err = demo_pass(&mut grid, true, &mut children).unwrap_err();

        assert!(matches!(
            err,
            TrellisError::CellCountMismatch {
                cells: 3,
                children: 1
            }
        ));
        assert_eq!(grid.registry().phase(), Phase::Idle);
        assert!(children[0].placed.is_none());
    }

    #[test]
    fn test_layout_before_seal_fails() {
        let mut grid = GridContainer::new(SizingPolicy::FixedGrid);
        grid.registry_mut().declare_cell(0, 0, 1, 1).unwrap();
        let mut children = [Widget::default()];

        let err = grid.layout(Size::new(10, 10), &mut children).unwrap_err();

        assert!(matches!(err, TrellisError::Unsealed));
    }

    #[test]
    fn test_empty_pass() {
        let mut grid = GridContainer::new(SizingPolicy::FixedGrid);
        let mut children: [Widget; 0] = [];

        let output = grid
            .begin_pass()
            .seal()
            .layout(Size::new(100, 50), &mut children)
            .unwrap();

        assert_eq!(output.size(), Size::new(100, 50));
        assert_eq!(output.unit(), Size::new(1, 1));
        assert!(output.placements().is_empty());
    }

    #[test]
    fn test_intrinsic_fit_pass() {
        let mut grid = GridContainer::new(SizingPolicy::IntrinsicFit);
        let mut children = [
            Widget::sized(120, 30),
            Widget::sized(50, 20),
            Widget::sized(70, 40),
        ];

        let output = demo_pass(&mut grid, true, &mut children).unwrap();

        assert_eq!(output.unit(), Size::new(70, 40));
        assert_eq!(output.size(), Size::new(300, 200));
        assert_eq!(
            children[2].placed,
            Some((Point::new(70, 40), Size::new(70, 40)))
        );
    }

    #[test]
    fn test_intrinsic_fit_without_sizes_fails() {
        let mut grid = GridContainer::new(SizingPolicy::IntrinsicFit);
        let mut children = [
            Widget::sized(10, 10),
            Widget::default(),
            Widget::sized(10, 10),
        ];

        let err = demo_pass(&mut grid, true, &mut children).unwrap_err();

        assert!(matches!(err, TrellisError::IntrinsicSizeUnavailable { index: 1 }));
        assert_eq!(grid.registry().phase(), Phase::Idle);
    }

    #[test]
    fn test_abandoned_declarations_keep_previous_state() {
        let mut grid = GridContainer::new(SizingPolicy::FixedGrid);
        let mut children = [Widget::default(), Widget::default(), Widget::default()];
        demo_pass(&mut grid, true, &mut children).unwrap();

        {
            let mut pass = grid.begin_pass();
            pass.cell(5, 5).unwrap();
            assert_eq!(pass.len(), 1);
        }

        let output = demo_pass(&mut grid, true, &mut children).unwrap();
        assert_eq!(output.changed_count(), 0);
    }

    #[test]
    fn test_abandoned_positional_change_keeps_previous_rect() {
        let mut grid = GridContainer::new(SizingPolicy::FixedGrid);
        let mut children = [Widget::default()];
        let mut pass = grid.begin_pass();
        pass.cell(0, 0).unwrap();
        pass.seal().layout(Size::new(100, 100), &mut children).unwrap();

        {
            let mut pass = grid.begin_pass();
            pass.cell(5, 5).unwrap();
        }
        assert_eq!(
            grid.registry().get(&CellKey::Positional(0)),
            Some(&CellDeclaration::unit(0, 0))
        );

        let mut pass = grid.begin_pass();
        pass.cell(0, 0).unwrap();
        let output = pass.seal().layout(Size::new(100, 100), &mut children).unwrap();

        assert!(!output.placements()[0].changed());
    }

    #[test]
    fn test_from_config() {
        let config = LayoutConfig::new(SizingPolicy::IntrinsicFit);
        assert_eq!(
            GridContainer::from_config(&config).policy(),
            SizingPolicy::IntrinsicFit
        );
    }
}
