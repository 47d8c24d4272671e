//! Trellis Core Types
//!
//! This crate provides the value types shared by the Trellis grid layout
//! engine. It includes:
//!
//! - **Geometry**: Integer pixel geometry ([`geometry`] module)
//! - **Cells**: Grid coordinates, spans, declarations and keys ([`cell`] module)
//! - **Bounds**: The aggregate grid extent of a pass ([`bounds::GridBounds`])
//! - **Identifiers**: Interned names for stable cell keys ([`identifier::Id`])
//! - **Colors**: CSS color handling ([`color::Color`])

pub mod bounds;
pub mod cell;
pub mod color;
pub mod geometry;
pub mod identifier;
