//! Command-line argument definitions for the Trellis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the sizing policy, which pass to render, and logging verbosity.

use clap::Parser;

use trellis::SizingPolicy;

/// Command-line arguments for the Trellis grid layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input scene file
    #[arg(help = "Path to the input scene (TOML)")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Sizing policy overriding configuration (fixed_grid, intrinsic_fit)
    #[arg(long)]
    pub policy: Option<SizingPolicy>,

    /// Zero-based pass to render; defaults to the last pass
    #[arg(long)]
    pub pass: Option<usize>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
