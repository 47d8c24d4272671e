//! Error types for Trellis operations.
//!
//! Layout itself is permissive: clamped spans and empty grids never produce
//! an error. What does fail is a structurally inconsistent pass, and those
//! failures abort the pass instead of producing partial geometry.

use std::{io, ops::Range};

use thiserror::Error;

use trellis_core::cell::CellKey;

/// The main error type for Trellis operations.
#[derive(Debug, Error)]
pub enum TrellisError {
    /// The sealed cell list and the presented children are not index-aligned.
    #[error("{cells} cell(s) declared but {children} child(ren) presented for measurement")]
    CellCountMismatch { cells: usize, children: usize },

    /// Layout was requested before the registry was sealed.
    #[error("layout requested before the cell registry was sealed")]
    Unsealed,

    /// A cell was declared after `seal()` and before the pass finished.
    #[error("cell declared after the registry was sealed")]
    DeclaredAfterSeal,

    /// The same named key was declared twice within one pass.
    #[error("cell key `{0}` declared more than once in the same pass")]
    DuplicateKey(CellKey),

    /// The intrinsic sizing policy met a child that cannot report its size.
    #[error("child at index {index} has no intrinsic size; intrinsic-fit layout cannot proceed")]
    IntrinsicSizeUnavailable { index: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A scene description could not be loaded.
    #[error("{message}")]
    Scene {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },
}

impl TrellisError {
    /// Create a new `Scene` error with the associated source text.
    pub fn new_scene_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Scene {
            message: message.into(),
            span,
            src: src.into(),
        }
    }

    /// Returns true for errors caused by a malformed pass rather than bad input.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            Self::CellCountMismatch { .. }
                | Self::Unsealed
                | Self::DeclaredAfterSeal
                | Self::DuplicateKey(_)
        )
    }
}
