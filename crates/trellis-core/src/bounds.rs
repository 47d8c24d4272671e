//! Aggregate extent of a set of cell declarations.

use std::fmt;

use crate::cell::CellDeclaration;

/// Bounding box of every declared cell, in grid units.
///
/// Minimum edges are inclusive and maximum edges are exclusive: a single cell
/// at `(1, 1)` spanning one unit has bounds `x: 1..2, y: 1..2`. Edges are
/// stored as `i64` so that spans starting near `i32::MAX` keep a positive
/// extent.
///
/// An empty declaration set produces [`GridBounds::EMPTY`], whose column and
/// row counts are both zero.
///
/// # Examples
///
/// ```
/// # use trellis_core::{bounds::GridBounds, cell::CellDeclaration};
/// let cells = [CellDeclaration::new(0, 0, 2, 1), CellDeclaration::unit(0, 1)];
/// let bounds = GridBounds::from_cells(&cells);
/// assert_eq!(bounds.columns(), 2);
/// assert_eq!(bounds.rows(), 2);
///
/// assert!(GridBounds::from_cells(&Vec::<CellDeclaration>::new()).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridBounds {
    min_x: i64,
    max_x: i64,
    min_y: i64,
    max_y: i64,
}

impl GridBounds {
    /// Sentinel for "no cells declared".
    ///
    /// Minima start at the largest value and maxima at the smallest, so the
    /// first included cell replaces every edge.
    pub const EMPTY: GridBounds = GridBounds {
        min_x: i64::MAX,
        max_x: i64::MIN,
        min_y: i64::MAX,
        max_y: i64::MIN,
    };

    /// Computes the bounds of `cells` in one scan.
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a CellDeclaration>) -> Self {
        cells
            .into_iter()
            .fold(Self::EMPTY, |bounds, cell| bounds.include(cell))
    }

    /// Returns these bounds grown to cover `cell`.
    pub fn include(self, cell: &CellDeclaration) -> Self {
        Self {
            min_x: self.min_x.min(i64::from(cell.grid_x())),
            max_x: self.max_x.max(cell.end_x()),
            min_y: self.min_y.min(i64::from(cell.grid_y())),
            max_y: self.max_y.max(cell.end_y()),
        }
    }

    /// Returns true when no cell has been included.
    pub fn is_empty(&self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }

    pub fn min_x(&self) -> i64 {
        self.min_x
    }

    pub fn max_x(&self) -> i64 {
        self.max_x
    }

    pub fn min_y(&self) -> i64 {
        self.min_y
    }

    pub fn max_y(&self) -> i64 {
        self.max_y
    }

    /// Number of grid columns covered, or zero when empty.
    pub fn columns(&self) -> i64 {
        if self.max_x > self.min_x {
            self.max_x - self.min_x
        } else {
            0
        }
    }

    /// Number of grid rows covered, or zero when empty.
    pub fn rows(&self) -> i64 {
        if self.max_y > self.min_y {
            self.max_y - self.min_y
        } else {
            0
        }
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for GridBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("empty");
        }
        write!(
            f,
            "x: {}..{}, y: {}..{}",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds() {
        let bounds = GridBounds::from_cells(&Vec::<CellDeclaration>::new());
        assert!(bounds.is_empty());
        assert_eq!(bounds, GridBounds::EMPTY);
        assert_eq!(bounds.columns(), 0);
        assert_eq!(bounds.rows(), 0);
        assert_eq!(bounds.to_string(), "empty");
    }

    #[test]
    fn test_two_cell_scenario() {
        let cells = [CellDeclaration::new(0, 0, 2, 1), CellDeclaration::unit(0, 1)];
        let bounds = GridBounds::from_cells(&cells);

        assert_eq!(bounds.min_x(), 0);
        assert_eq!(bounds.max_x(), 2);
        assert_eq!(bounds.min_y(), 0);
        assert_eq!(bounds.max_y(), 2);
    }

    #[test]
    fn test_offset_single_cell() {
        let bounds = GridBounds::from_cells(&[CellDeclaration::unit(1, 1)]);
        assert_eq!(bounds.min_x(), 1);
        assert_eq!(bounds.max_x(), 2);
        assert_eq!(bounds.min_y(), 1);
        assert_eq!(bounds.max_y(), 2);
        assert_eq!(bounds.to_string(), "x: 1..2, y: 1..2");
    }

    #[test]
    fn test_sparse_negative_cells() {
        let cells = [CellDeclaration::unit(-3, 5), CellDeclaration::new(4, -2, 1, 2)];
        let bounds = GridBounds::from_cells(&cells);
        assert_eq!(bounds.columns(), 8);
        assert_eq!(bounds.rows(), 8);
    }

    #[test]
    fn test_extreme_coordinates_keep_extent() {
        let bounds = GridBounds::from_cells(&[CellDeclaration::unit(i32::MAX, i32::MIN)]);
        assert!(!bounds.is_empty());
        assert_eq!(bounds.columns(), 1);
        assert_eq!(bounds.rows(), 1);
    }
}
