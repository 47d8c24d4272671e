//! Fixed-grid sizing: every column and row gets an equal share of the parent.

use log::debug;

use trellis_core::{bounds::GridBounds, cell::CellDeclaration, geometry::Size};

use super::{GridGeometry, Resolver, SizingPolicy, resolve_unit_size};
use crate::{error::TrellisError, measure::IntrinsicSizes};

/// Resolver for [`SizingPolicy::FixedGrid`].
///
/// Never consults the children, so it cannot fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedGrid;

impl FixedGrid {
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for FixedGrid {
    fn policy(&self) -> SizingPolicy {
        SizingPolicy::FixedGrid
    }

    fn resolve(
        &self,
        cells: &[CellDeclaration],
        bounds: GridBounds,
        parent: Size,
        _children: &dyn IntrinsicSizes,
    ) -> Result<GridGeometry, TrellisError> {
        let unit = resolve_unit_size(parent, &bounds);
        debug!(bounds:% = bounds, unit:? = unit; "Resolved fixed grid unit");
        Ok(GridGeometry::new(cells, bounds, unit))
    }
}
