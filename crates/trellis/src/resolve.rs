//! Grid resolution: from sealed cell declarations to pixel rectangles.
//!
//! Resolution happens in two steps. First a uniform unit size is chosen for
//! one grid column and one grid row, then every cell's rectangle is derived
//! from its grid coordinate (relative to the grid bounds) and its span.
//!
//! How the unit size is chosen is a [`SizingPolicy`]:
//!
//! - [`SizingPolicy::FixedGrid`] divides the parent evenly between the grid's
//!   columns and rows ([`FixedGrid`]).
//! - [`SizingPolicy::IntrinsicFit`] sizes the unit from the children's
//!   intrinsic sizes, never exceeding the fixed-grid unit ([`IntrinsicFit`]).
//!
//! The policy is chosen once per container; a pass never mixes the two.

mod fixed;
mod intrinsic;

pub use fixed::FixedGrid;
pub use intrinsic::IntrinsicFit;

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use trellis_core::{
    bounds::GridBounds,
    cell::CellDeclaration,
    geometry::{Point, Rect, Size},
};

use crate::{error::TrellisError, measure::IntrinsicSizes};

/// How a container turns its available size into a grid unit size.
///
/// The names match external configuration strings (snake_case).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingPolicy {
    /// Divide the parent evenly between columns and rows (default)
    #[default]
    FixedGrid,
    /// Size units from the children's intrinsic sizes
    IntrinsicFit,
}

impl FromStr for SizingPolicy {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed_grid" => Ok(Self::FixedGrid),
            "intrinsic_fit" => Ok(Self::IntrinsicFit),
            _ => Err("Unsupported sizing policy"),
        }
    }
}

impl From<SizingPolicy> for &'static str {
    fn from(val: SizingPolicy) -> Self {
        match val {
            SizingPolicy::FixedGrid => "fixed_grid",
            SizingPolicy::IntrinsicFit => "intrinsic_fit",
        }
    }
}

impl Display for SizingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Interface shared by every sizing policy.
pub trait Resolver: fmt::Debug {
    /// The policy this resolver implements.
    fn policy(&self) -> SizingPolicy;

    /// Resolve the pixel rectangle of every cell.
    ///
    /// - `cells`: the sealed declarations, in declaration order
    /// - `bounds`: the grid bounds of `cells`
    /// - `parent`: the size available to the container
    /// - `children`: the children of the pass, index-aligned with `cells`
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::IntrinsicSizeUnavailable`] when the policy needs
    /// a child's intrinsic size and the child cannot provide one.
    fn resolve(
        &self,
        cells: &[CellDeclaration],
        bounds: GridBounds,
        parent: Size,
        children: &dyn IntrinsicSizes,
    ) -> Result<GridGeometry, TrellisError>;
}

/// Creates the resolver implementing `policy`.
pub fn resolver_for(policy: SizingPolicy) -> Box<dyn Resolver> {
    match policy {
        SizingPolicy::FixedGrid => Box::new(FixedGrid::new()),
        SizingPolicy::IntrinsicFit => Box::new(IntrinsicFit::new()),
    }
}

/// Per-pass derived geometry: the unit size and one rectangle per cell.
///
/// Rebuilt from scratch on every pass; nothing here outlives the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridGeometry {
    bounds: GridBounds,
    unit: Size,
    rects: Vec<Rect>,
}

impl GridGeometry {
    /// Derives the rectangle of every cell for the given unit size.
    pub fn new(cells: &[CellDeclaration], bounds: GridBounds, unit: Size) -> Self {
        let rects = cells
            .iter()
            .map(|cell| resolve_cell_rect(cell, &bounds, unit))
            .collect();
        Self {
            bounds,
            unit,
            rects,
        }
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Size of a single grid unit.
    pub fn unit(&self) -> Size {
        self.unit
    }

    /// Rectangles in declaration order.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Rectangle of the cell at `index`.
    pub fn rect(&self, index: usize) -> Option<Rect> {
        self.rects.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Computes the pixel size of one grid unit for the fixed-grid policy.
///
/// Each axis divides the parent size by the grid's extent on that axis using
/// integer division; any remainder is left unallocated. An axis with no
/// extent (an empty grid) falls back to a unit of `1`.
///
/// # Examples
///
/// ```
/// # use trellis::resolve::resolve_unit_size;
/// # use trellis_core::{bounds::GridBounds, cell::CellDeclaration, geometry::Size};
/// let bounds = GridBounds::from_cells(&[CellDeclaration::new(0, 0, 3, 1)]);
/// assert_eq!(resolve_unit_size(Size::new(100, 50), &bounds), Size::new(33, 50));
///
/// assert_eq!(resolve_unit_size(Size::new(100, 50), &GridBounds::EMPTY), Size::new(1, 1));
/// ```
pub fn resolve_unit_size(parent: Size, bounds: &GridBounds) -> Size {
    Size::new(
        divide_axis(parent.width(), bounds.columns()),
        divide_axis(parent.height(), bounds.rows()),
    )
}

/// Computes the pixel rectangle of `cell`.
///
/// The origin is relative to the grid bounds, not to grid coordinate zero,
/// and the size is the unit size multiplied by the span.
///
/// # Examples
///
/// ```
/// # use trellis::resolve::resolve_cell_rect;
/// # use trellis_core::{bounds::GridBounds, cell::CellDeclaration, geometry::{Rect, Size}};
/// let cell = CellDeclaration::unit(1, 1);
/// let bounds = GridBounds::from_cells(&[cell]);
/// let rect = resolve_cell_rect(&cell, &bounds, Size::new(100, 100));
/// assert_eq!(rect, Rect::from_xywh(0, 0, 100, 100));
/// ```
pub fn resolve_cell_rect(cell: &CellDeclaration, bounds: &GridBounds, unit: Size) -> Rect {
    let x = grid_offset(cell.grid_x(), bounds.min_x(), unit.width());
    let y = grid_offset(cell.grid_y(), bounds.min_y(), unit.height());
    let width = saturate(i64::from(unit.width()) * i64::from(cell.span_width()));
    let height = saturate(i64::from(unit.height()) * i64::from(cell.span_height()));

    Rect::new(Point::new(x, y), Size::new(width, height))
}

fn divide_axis(available: i32, units: i64) -> i32 {
    if units > 0 {
        saturate(i64::from(available) / units)
    } else {
        1
    }
}

fn grid_offset(coordinate: i32, min: i64, unit: i32) -> i32 {
    saturate(
        i64::from(coordinate)
            .saturating_sub(min)
            .saturating_mul(i64::from(unit)),
    )
}

pub(crate) fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cells() -> [CellDeclaration; 2] {
        [CellDeclaration::new(0, 0, 2, 1), CellDeclaration::unit(0, 1)]
    }

    #[test]
    fn test_two_cell_scenario() {
        let cells = two_cells();
        let bounds = GridBounds::from_cells(&cells);
        let unit = resolve_unit_size(Size::new(300, 200), &bounds);
        assert_eq!(unit, Size::new(150, 100));

        let geometry = GridGeometry::new(&cells, bounds, unit);
        assert_eq!(
            geometry.rects(),
            &[
                Rect::from_xywh(0, 0, 300, 100),
                Rect::from_xywh(0, 100, 150, 100)
            ]
        );
    }

    #[test]
    fn test_bounds_relative_origin() {
        let cell = CellDeclaration::unit(1, 1);
        let bounds = GridBounds::from_cells(&[cell]);
        let unit = resolve_unit_size(Size::new(100, 100), &bounds);

        assert_eq!(unit, Size::new(100, 100));
        assert_eq!(
            resolve_cell_rect(&cell, &bounds, unit),
            Rect::from_xywh(0, 0, 100, 100)
        );
    }

    #[test]
    fn test_empty_grid_unit_fallback() {
        let unit = resolve_unit_size(Size::new(100, 50), &GridBounds::EMPTY);
        assert_eq!(unit, Size::new(1, 1));
    }

    #[test]
    fn test_remainder_is_not_allocated() {
        let cells = [
            CellDeclaration::unit(0, 0),
            CellDeclaration::unit(1, 0),
            CellDeclaration::unit(2, 0),
        ];
        let bounds = GridBounds::from_cells(&cells);
        let unit = resolve_unit_size(Size::new(100, 10), &bounds);
        let geometry = GridGeometry::new(&cells, bounds, unit);

        assert_eq!(geometry.unit(), Size::new(33, 10));
        assert_eq!(geometry.rect(2), Some(Rect::from_xywh(66, 0, 33, 10)));
        assert_eq!(geometry.rects().last().map(|r| r.max_x()), Some(99));
    }

    #[test]
    fn test_negative_coordinates() {
        let cells = [CellDeclaration::unit(-2, -1), CellDeclaration::unit(0, 0)];
        let bounds = GridBounds::from_cells(&cells);
        let unit = resolve_unit_size(Size::new(300, 200), &bounds);

        assert_eq!(unit, Size::new(100, 100));
        assert_eq!(
            resolve_cell_rect(&cells[1], &bounds, unit),
            Rect::from_xywh(200, 100, 100, 100)
        );
    }

    #[test]
    fn test_policy_strings() {
        assert_eq!("fixed_grid".parse(), Ok(SizingPolicy::FixedGrid));
        assert_eq!("intrinsic_fit".parse(), Ok(SizingPolicy::IntrinsicFit));
        assert!("weighted".parse::<SizingPolicy>().is_err());
        assert_eq!(SizingPolicy::IntrinsicFit.to_string(), "intrinsic_fit");
        assert_eq!(SizingPolicy::default(), SizingPolicy::FixedGrid);
    }

    #[test]
    fn test_resolver_for_matches_policy() {
        for policy in [SizingPolicy::FixedGrid, SizingPolicy::IntrinsicFit] {
            assert_eq!(resolver_for(policy).policy(), policy);
        }
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(i64::MAX), i32::MAX);
        assert_eq!(saturate(i64::MIN), i32::MIN);
        assert_eq!(saturate(-7), -7);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn cell_strategy() -> impl Strategy<Value = CellDeclaration> {
        (-10i32..10, -10i32..10, -1i32..4, -1i32..4)
            .prop_map(|(x, y, w, h)| CellDeclaration::new(x, y, w, h))
    }

    fn parent_strategy() -> impl Strategy<Value = Size> {
        (0i32..2000, 0i32..2000).prop_map(|(w, h)| Size::new(w, h))
    }

    /// Resolving the same declarations twice gives identical rectangles.
    fn check_resolution_is_idempotent(
        cells: &[CellDeclaration],
        parent: Size,
    ) -> Result<(), TestCaseError> {
        let bounds = GridBounds::from_cells(cells);
        let first = GridGeometry::new(cells, bounds, resolve_unit_size(parent, &bounds));
        let second = GridGeometry::new(cells, bounds, resolve_unit_size(parent, &bounds));

        prop_assert_eq!(first, second);
        Ok(())
    }

    /// Every fixed-grid rectangle stays inside the parent.
    fn check_rects_fit_parent(
        cells: &[CellDeclaration],
        parent: Size,
    ) -> Result<(), TestCaseError> {
        let bounds = GridBounds::from_cells(cells);
        let geometry = GridGeometry::new(cells, bounds, resolve_unit_size(parent, &bounds));

        for rect in geometry.rects() {
            prop_assert!(rect.x() >= 0 && rect.y() >= 0);
            prop_assert!(rect.max_x() <= parent.width());
            prop_assert!(rect.max_y() <= parent.height());
        }
        Ok(())
    }

    /// A span of `n` units is exactly `n` times the unit size.
    fn check_span_multiplies_unit(
        cell: CellDeclaration,
        parent: Size,
    ) -> Result<(), TestCaseError> {
        let bounds = GridBounds::from_cells(&[cell]);
        let unit = resolve_unit_size(parent, &bounds);
        let rect = resolve_cell_rect(&cell, &bounds, unit);

        prop_assert_eq!(rect.width(), unit.width() * cell.span_width());
        prop_assert_eq!(rect.height(), unit.height() * cell.span_height());
        Ok(())
    }

    proptest! {
        #[test]
        fn resolution_is_idempotent(
            cells in prop::collection::vec(cell_strategy(), 0..12),
            parent in parent_strategy(),
        ) {
            check_resolution_is_idempotent(&cells, parent)?;
        }

        #[test]
        fn rects_fit_parent(
            cells in prop::collection::vec(cell_strategy(), 1..12),
            parent in parent_strategy(),
        ) {
            check_rects_fit_parent(&cells, parent)?;
        }

        #[test]
        fn span_multiplies_unit(cell in cell_strategy(), parent in parent_strategy()) {
            check_span_multiplies_unit(cell, parent)?;
        }
    }
}
