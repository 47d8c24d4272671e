//! Declarative scenes: a parent size and a sequence of layout passes.
//!
//! A scene stands in for an application that re-renders a grid several
//! times. Each pass lists the children rendered in that pass; a child with
//! `visible = false` is skipped entirely, exactly as if the application had
//! conditionally omitted it. Scenes are deserialized with serde, usually
//! from TOML:
//!
//! ```toml
//! [parent]
//! width = 300
//! height = 200
//!
//! [[passes]]
//! [[passes.children]]
//! label = "Hello"
//! x = 0
//! y = 0
//! width = 2
//! background = "red"
//! ```

use log::{debug, info};
use serde::{Deserialize, Deserializer, de::Error as _};

use trellis_core::{
    cell::CellKey,
    color::Color,
    geometry::{Point, Rect, Size},
};

use crate::{
    config::AppConfig,
    container::GridContainer,
    error::TrellisError,
    measure::{Constraints, GridChild},
    place::LayoutOutput,
    resolve::SizingPolicy,
    text::TextMeasurer,
};

/// A full scene description.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Overrides the configured sizing policy for this scene.
    #[serde(default)]
    policy: Option<SizingPolicy>,

    #[serde(deserialize_with = "deserialize_size")]
    parent: Size,

    #[serde(default)]
    passes: Vec<ScenePass>,
}

/// The children rendered in one pass, in declaration order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenePass {
    #[serde(default)]
    children: Vec<SceneChild>,
}

/// One child of a pass and the cell it declares.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneChild {
    #[serde(default)]
    label: String,

    /// Stable key; children without one are matched by position.
    #[serde(default)]
    key: Option<String>,

    x: i32,
    y: i32,

    #[serde(default = "default_span")]
    width: i32,

    #[serde(default = "default_span")]
    height: i32,

    /// CSS color string.
    #[serde(default)]
    background: Option<String>,

    #[serde(default = "default_visible")]
    visible: bool,

    /// Intrinsic size; when absent the label is measured.
    #[serde(default, deserialize_with = "deserialize_preferred")]
    preferred: Option<Size>,
}

fn default_span() -> i32 {
    1
}

fn check_size(size: Size) -> Result<Size, String> {
    if size.width() < 0 || size.height() < 0 {
        return Err(format!(
            "size must not be negative, got {}x{}",
            size.width(),
            size.height()
        ));
    }
    Ok(size)
}

fn deserialize_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Size, D::Error> {
    check_size(Size::deserialize(deserializer)?).map_err(D::Error::custom)
}

fn deserialize_preferred<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Size>, D::Error> {
    Option::<Size>::deserialize(deserializer)?
        .map(check_size)
        .transpose()
        .map_err(D::Error::custom)
}

fn default_visible() -> bool {
    true
}

impl Scene {
    pub fn new(parent: Size) -> Self {
        Self {
            policy: None,
            parent,
            passes: Vec::new(),
        }
    }

    /// Sets the scene's own policy, used over the configured one.
    pub fn with_policy(mut self, policy: SizingPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Appends a pass.
    pub fn with_pass(mut self, pass: ScenePass) -> Self {
        self.passes.push(pass);
        self
    }

    pub fn policy(&self) -> Option<SizingPolicy> {
        self.policy
    }

    pub fn parent(&self) -> Size {
        self.parent
    }

    pub fn passes(&self) -> &[ScenePass] {
        &self.passes
    }

    /// Picks the sizing policy for this scene.
    ///
    /// `override_policy` wins, then the scene's own policy, then the one in
    /// `config`.
    pub fn resolve_policy(
        &self,
        override_policy: Option<SizingPolicy>,
        config: &AppConfig,
    ) -> SizingPolicy {
        override_policy
            .or(self.policy)
            .unwrap_or_else(|| config.layout().policy())
    }

    /// Runs every pass through one [`GridContainer`] and returns a frame per pass.
    ///
    /// The scene's own policy wins over the one in `config`.
    ///
    /// # Errors
    ///
    /// See [`run_with_policy`](Self::run_with_policy).
    pub fn run(&self, config: &AppConfig) -> Result<Vec<Frame>, TrellisError> {
        self.run_with_policy(config, self.resolve_policy(None, config))
    }

    /// Runs every pass with `policy`, ignoring the scene's own policy.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Scene`] for a negative size or an invalid
    /// background color, and any layout error of a pass. Passes after a
    /// failing one are not run.
    pub fn run_with_policy(
        &self,
        config: &AppConfig,
        policy: SizingPolicy,
    ) -> Result<Vec<Frame>, TrellisError> {
        check_size(self.parent).map_err(|err| {
            TrellisError::new_scene_error(format!("invalid parent: {err}"), None, "")
        })?;
        let measurer = TextMeasurer::from_style(config.style());
        let mut container = GridContainer::new(policy);

        info!(policy:% = policy, passes = self.passes.len(); "Running scene");

        self.passes
            .iter()
            .enumerate()
            .map(|(index, pass)| self.run_pass(index, pass, &mut container, &measurer))
            .collect()
    }

    fn run_pass(
        &self,
        index: usize,
        pass: &ScenePass,
        container: &mut GridContainer,
        measurer: &TextMeasurer,
    ) -> Result<Frame, TrellisError> {
        let visible: Vec<&SceneChild> = pass.children.iter().filter(|c| c.visible).collect();
        let mut nodes = visible
            .iter()
            .map(|child| SceneNode::from_child(child, measurer))
            .collect::<Result<Vec<_>, _>>()?;

        let mut declarations = container.begin_pass();
        for child in &visible {
            let (x, y, width, height) = (child.x, child.y, child.width, child.height);
            match &child.key {
                Some(key) => declarations.keyed(key.as_str(), x, y, width, height)?,
                None => declarations.cell_span(x, y, width, height)?,
            };
        }
        let output = declarations.seal().layout(self.parent, &mut nodes)?;

        debug!(
            pass = index,
            children = nodes.len(),
            hidden = pass.children.len() - nodes.len();
            "Scene pass laid out"
        );

        Ok(Frame {
            index,
            output,
            nodes,
        })
    }
}

impl ScenePass {
    pub fn new(children: Vec<SceneChild>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[SceneChild] {
        &self.children
    }
}

impl SceneChild {
    /// A visible, positional child with a 1x1 span.
    pub fn new(label: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            label: label.into(),
            key: None,
            x,
            y,
            width: 1,
            height: 1,
            background: None,
            visible: true,
            preferred: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_span(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_preferred(mut self, size: Size) -> Self {
        self.preferred = Some(size);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// A rendered scene child: the grid sees it through [`GridChild`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    label: String,
    background: Option<Color>,
    intrinsic: Size,
    rect: Option<Rect>,
}

impl SceneNode {
    fn from_child(child: &SceneChild, measurer: &TextMeasurer) -> Result<Self, TrellisError> {
        let background = child
            .background
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| {
                TrellisError::new_scene_error(
                    format!("invalid background for `{}`: {err}", child.label),
                    None,
                    "",
                )
            })?;
        let preferred = child.preferred.map(check_size).transpose().map_err(|err| {
            TrellisError::new_scene_error(
                format!("invalid preferred size for `{}`: {err}", child.label),
                None,
                "",
            )
        })?;
        let intrinsic = preferred.unwrap_or_else(|| measurer.measure(&child.label));

        Ok(Self {
            label: child.label.clone(),
            background,
            intrinsic,
            rect: None,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Where the node was placed, once its pass has run.
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }
}

impl GridChild for SceneNode {
    fn measure(&mut self, constraints: Constraints) -> Size {
        constraints.constrain(self.intrinsic)
    }

    fn intrinsic_size(&self) -> Option<Size> {
        Some(self.intrinsic)
    }

    fn place(&mut self, position: Point, size: Size) {
        self.rect = Some(Rect::new(position, size));
    }
}

/// The result of one scene pass.
#[derive(Debug, Clone)]
pub struct Frame {
    index: usize,
    output: LayoutOutput,
    nodes: Vec<SceneNode>,
}

impl Frame {
    /// Zero-based pass index.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn output(&self) -> &LayoutOutput {
        &self.output
    }

    /// Placed nodes, index-aligned with `output().placements()`.
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Iterates each node with the key of the cell it was placed in.
    pub fn keyed_nodes(&self) -> impl Iterator<Item = (CellKey, &SceneNode)> {
        self.output
            .placements()
            .iter()
            .map(|placement| placement.key())
            .zip(&self.nodes)
    }
}
