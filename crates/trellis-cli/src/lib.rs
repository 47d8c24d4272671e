//! CLI logic for the Trellis grid layout tool.
//!
//! Loads configuration and a scene, runs every pass of the scene and writes
//! the selected pass as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use trellis::{
    SceneBuilder, TrellisError,
    export::{Exporter, svg::Svg},
};

/// Run the Trellis CLI application
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene parsing errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), TrellisError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let mut builder = SceneBuilder::new(app_config);
    if let Some(policy) = args.policy {
        info!(policy:% = policy; "Overriding sizing policy");
        builder = builder.with_policy(policy);
    }
    let scene = builder.parse(&source)?;
    let frames = builder.run(&scene)?;

    let index = args.pass.unwrap_or(frames.len().saturating_sub(1));
    let frame = frames.get(index).ok_or_else(|| {
        TrellisError::Config(format!(
            "pass {index} requested but the scene has {} pass(es)",
            frames.len()
        ))
    })?;

    for (key, node) in frame.keyed_nodes() {
        if let Some(rect) = node.rect() {
            info!(
                key:% = key,
                label = node.label(),
                x = rect.x(),
                y = rect.y(),
                width = rect.width(),
                height = rect.height();
                "Placed child"
            );
        }
    }

    let exporter = Svg::new(&args.output, builder.config().style().clone());
    exporter.export_frame(frame)?;

    info!(output_file = args.output, pass = index; "SVG exported successfully");

    Ok(())
}
