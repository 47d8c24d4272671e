//! Configuration types for Trellis layout and rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file by the command line front end.
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Selects the [`SizingPolicy`] used by grid containers.
//! - [`StyleConfig`] - Visual options used when rendering a pass.
//!
//! # Example
//!
//! ```
//! # use trellis::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.style().cell_padding(), 8);
//! ```

use serde::Deserialize;

use trellis_core::color::Color;

use crate::resolve::SizingPolicy;

const DEFAULT_CELL_PADDING: i32 = 8;
const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Layout configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Default [`SizingPolicy`] for grid containers.
    #[serde(default)]
    policy: SizingPolicy,
}

impl LayoutConfig {
    pub fn new(policy: SizingPolicy) -> Self {
        Self { policy }
    }

    /// Returns the configured [`SizingPolicy`].
    pub fn policy(&self) -> SizingPolicy {
        self.policy
    }
}

/// Visual styling configuration for rendered passes.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] of the container, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Padding added around measured text on every side, in pixels.
    #[serde(default = "default_cell_padding")]
    cell_padding: i32,

    /// Font size used to measure and draw labels, in pixels.
    #[serde(default = "default_font_size")]
    font_size: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            cell_padding: DEFAULT_CELL_PADDING,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn cell_padding(&self) -> i32 {
        self.cell_padding.max(0)
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }
}

fn default_cell_padding() -> i32 {
    DEFAULT_CELL_PADDING
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}
