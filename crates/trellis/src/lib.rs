//! Trellis - a sparse grid layout engine for retained-mode UI trees.
//!
//! Children declare an origin cell and a span on an implicit grid; every
//! layout pass resolves those declarations into pixel rectangles for a given
//! parent size. The building blocks are:
//!
//! - [`registry`]: per-pass cell declarations with cross-pass reuse.
//! - [`resolve`]: unit size and cell rectangles under a [`SizingPolicy`].
//! - [`measure`] and [`place`]: fixed-constraint measurement and placement.
//! - [`container`]: the [`GridContainer`] driving a pass in order.
//! - [`scene`] and [`export`]: declarative passes rendered to SVG.
//!
//! [`SceneBuilder`] ties the scene pipeline together.

pub mod config;
pub mod container;
pub mod export;
pub mod measure;
pub mod place;
pub mod registry;
pub mod resolve;
pub mod scene;
pub mod text;

mod error;

pub use trellis_core::{bounds, cell, color, geometry, identifier};

pub use container::GridContainer;
pub use error::TrellisError;
pub use resolve::SizingPolicy;

use log::{debug, info, trace};

use config::AppConfig;
use scene::{Frame, Scene};

/// Builder for loading, laying out and rendering scenes.
///
/// # Examples
///
/// ```
/// use trellis::SceneBuilder;
///
/// let source = r#"
///     [parent]
///     width = 300
///     height = 200
///
///     [[passes]]
///     [[passes.children]]
///     label = "Hello"
///     x = 0
///     y = 0
///     preferred = { width = 10, height = 10 }
/// "#;
///
/// let builder = SceneBuilder::default();
/// let scene = builder.parse(source)?;
/// let frames = builder.run(&scene)?;
/// let svg = builder.render_svg(&frames[0])?;
/// assert!(svg.contains("<svg"));
/// # Ok::<(), trellis::TrellisError>(())
/// ```
#[derive(Debug, Default)]
pub struct SceneBuilder {
    config: AppConfig,
    policy: Option<SizingPolicy>,
}

impl SceneBuilder {
    /// Create a new scene builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            policy: None,
        }
    }

    /// Forces `policy` on every scene, over both the scene's own policy and
    /// the configured one.
    pub fn with_policy(mut self, policy: SizingPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML scene description.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Scene`] carrying the byte span of the offending
    /// TOML, when one is known.
    pub fn parse(&self, source: &str) -> Result<Scene, TrellisError> {
        info!("Parsing scene");

        let scene: Scene = toml::from_str(source).map_err(|err| {
            TrellisError::new_scene_error(err.message(), err.span(), source)
        })?;

        debug!(passes = scene.passes().len(); "Scene parsed successfully");
        trace!(scene:?; "Parsed scene");

        Ok(scene)
    }

    /// Run every pass of `scene`.
    ///
    /// # Errors
    ///
    /// Returns the first layout error of any pass.
    pub fn run(&self, scene: &Scene) -> Result<Vec<Frame>, TrellisError> {
        let policy = scene.resolve_policy(self.policy, &self.config);
        let frames = scene.run_with_policy(&self.config, policy)?;
        info!(frames = frames.len(), policy:% = policy; "Scene laid out");
        Ok(frames)
    }

    /// Render one frame to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Config`] for an invalid configured background.
    pub fn render_svg(&self, frame: &Frame) -> Result<String, TrellisError> {
        let doc = export::svg::render(frame, self.config.style())?;
        Ok(doc.to_string())
    }
}
