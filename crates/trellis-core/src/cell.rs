//! Grid cell declarations.
//!
//! A [`CellDeclaration`] says which part of the implicit grid a child
//! occupies: the grid coordinate of its top-left unit and how many units it
//! spans on each axis. Declarations are plain values; the pixel geometry
//! derived from them lives elsewhere and is rebuilt every pass.

use std::fmt;

use crate::identifier::Id;

/// Integer coordinate of a unit on the layout grid.
///
/// The grid is sparse and unbounded: coordinates may be negative and need not
/// be contiguous.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridCoord {
    x: i32,
    y: i32,
}

impl GridCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> i32 {
        self.x
    }

    pub fn y(self) -> i32 {
        self.y
    }
}

/// Number of grid units a child covers horizontally and vertically.
///
/// Both dimensions are always at least one. Non-positive inputs are clamped
/// rather than rejected.
///
/// # Examples
///
/// ```
/// # use trellis_core::cell::Span;
/// let span = Span::new(0, -3);
/// assert_eq!(span.width(), 1);
/// assert_eq!(span.height(), 1);
///
/// assert_eq!(Span::new(2, 1).width(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    width: i32,
    height: i32,
}

impl Span {
    /// A single grid unit.
    pub const UNIT: Span = Span {
        width: 1,
        height: 1,
    };

    /// Creates a span, clamping both dimensions to a minimum of one.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn width(self) -> i32 {
        self.width
    }

    pub fn height(self) -> i32 {
        self.height
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::UNIT
    }
}

/// The grid region a single child occupies.
///
/// Two declarations are equal when their origin and clamped span are equal;
/// that equality decides whether a slot survives from one pass to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellDeclaration {
    origin: GridCoord,
    span: Span,
}

impl CellDeclaration {
    /// Creates a declaration; `width` and `height` are clamped to at least one.
    pub fn new(grid_x: i32, grid_y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: GridCoord::new(grid_x, grid_y),
            span: Span::new(width, height),
        }
    }

    /// Creates a declaration covering a single unit.
    pub fn unit(grid_x: i32, grid_y: i32) -> Self {
        Self::new(grid_x, grid_y, 1, 1)
    }

    pub fn origin(&self) -> GridCoord {
        self.origin
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn grid_x(&self) -> i32 {
        self.origin.x
    }

    pub fn grid_y(&self) -> i32 {
        self.origin.y
    }

    pub fn span_width(&self) -> i32 {
        self.span.width
    }

    pub fn span_height(&self) -> i32 {
        self.span.height
    }

    /// Exclusive right edge in grid units.
    ///
    /// Widened to `i64` so a cell at `i32::MAX` still has a positive extent.
    pub fn end_x(&self) -> i64 {
        i64::from(self.origin.x) + i64::from(self.span.width)
    }

    /// Exclusive bottom edge in grid units.
    pub fn end_y(&self) -> i64 {
        i64::from(self.origin.y) + i64::from(self.span.height)
    }
}

impl fmt::Display for CellDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.origin.x, self.origin.y, self.span.width, self.span.height
        )
    }
}

/// Identity of a registry slot.
///
/// Named keys are supplied by the caller and stay attached to the same child
/// no matter what is declared before it. Positional keys are the declaration
/// index within a pass: when an earlier child appears or disappears, every
/// later positional slot shifts and may inherit a neighbour's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKey {
    Named(Id),
    Positional(usize),
}

impl CellKey {
    /// Returns true for caller-supplied keys.
    pub fn is_named(&self) -> bool {
        matches!(self, CellKey::Named(_))
    }
}

impl From<Id> for CellKey {
    fn from(id: Id) -> Self {
        CellKey::Named(id)
    }
}

impl From<&str> for CellKey {
    fn from(name: &str) -> Self {
        CellKey::Named(Id::new(name))
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKey::Named(id) => write!(f, "{id}"),
            CellKey::Positional(index) => write!(f, "#{index}"),
        }
    }
}
