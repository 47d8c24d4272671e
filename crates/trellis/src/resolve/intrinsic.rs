//! Intrinsic-fit sizing: the grid shrinks to what its children ask for.
//!
//! The unit stays uniform. On each axis it is the largest per-unit demand of
//! any cell, where a cell spanning `n` units asks for `ceil(intrinsic / n)`.
//! The result is capped by the fixed-grid unit, so an intrinsic-fit grid
//! never grows beyond the parent.

use log::{debug, trace};

use trellis_core::{bounds::GridBounds, cell::CellDeclaration, geometry::Size};

use super::{GridGeometry, Resolver, SizingPolicy, resolve_unit_size, saturate};
use crate::{error::TrellisError, measure::IntrinsicSizes};

/// Resolver for [`SizingPolicy::IntrinsicFit`].
#[derive(Debug, Default, Clone, Copy)]
pub struct IntrinsicFit;

impl IntrinsicFit {
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for IntrinsicFit {
    fn policy(&self) -> SizingPolicy {
        SizingPolicy::IntrinsicFit
    }

    fn resolve(
        &self,
        cells: &[CellDeclaration],
        bounds: GridBounds,
        parent: Size,
        children: &dyn IntrinsicSizes,
    ) -> Result<GridGeometry, TrellisError> {
        let ceiling = resolve_unit_size(parent, &bounds);
        if bounds.is_empty() {
            return Ok(GridGeometry::new(cells, bounds, ceiling));
        }

        let mut demand = Size::default();
        for (index, cell) in cells.iter().enumerate() {
            let intrinsic = children
                .intrinsic_size(index)
                .ok_or(TrellisError::IntrinsicSizeUnavailable { index })?;
            let per_unit = Size::new(
                per_unit(intrinsic.width(), cell.span_width()),
                per_unit(intrinsic.height(), cell.span_height()),
            );
            trace!(index = index, intrinsic:? = intrinsic, per_unit:? = per_unit; "Cell demand");
            demand = demand.max(per_unit);
        }

        let unit = demand.min(ceiling);
        debug!(
            bounds:% = bounds,
            demand:? = demand,
            unit:? = unit;
            "Resolved intrinsic grid unit"
        );
        Ok(GridGeometry::new(cells, bounds, unit))
    }
}

/// Share of `length` carried by each of `span` units, rounded up.
fn per_unit(length: i32, span: i32) -> i32 {
    let length = i64::from(length.max(0));
    let span = i64::from(span.max(1));
    saturate((length + span - 1) / span)
}
