//! Export of laid-out scene frames.

pub mod svg;

use crate::{error::TrellisError, scene::Frame};

/// Writes a frame to some output format.
pub trait Exporter {
    fn export_frame(&self, frame: &Frame) -> Result<(), TrellisError>;
}
