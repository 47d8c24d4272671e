//! SVG rendering of a laid-out frame.
//!
//! The document is exactly the container's size. Each placed child becomes a
//! `<rect>` filled with its background color and a centered `<text>` label.

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use trellis_core::{color::Color, geometry::Rect};

use super::Exporter;
use crate::{config::StyleConfig, error::TrellisError, scene::Frame};

/// Renders `frame` into an SVG document.
///
/// # Errors
///
/// Returns [`TrellisError::Config`] if the configured background color is invalid.
pub fn render(frame: &Frame, style: &StyleConfig) -> Result<Document, TrellisError> {
    let size = frame.output().size();
    let width = size.width().max(0);
    let height = size.height().max(0);

    let mut doc = Document::new()
        .set("viewBox", (0, 0, width, height))
        .set("width", width)
        .set("height", height);

    if let Some(background) = style.background_color().map_err(TrellisError::Config)? {
        doc = doc.add(rectangle(Rect::from_xywh(0, 0, width, height), &background));
    }

    for node in frame.nodes() {
        let Some(rect) = node.rect() else {
            continue;
        };
        let fill = node.background().unwrap_or_default();
        doc = doc.add(rectangle(rect, &fill).set("stroke", "black"));

        let label = svg_element::Text::new("")
            .set("x", rect.x() + rect.width() / 2)
            .set("y", rect.y() + rect.height() / 2)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", "sans-serif")
            .set("font-size", style.font_size())
            .add(SvgText::new(node.label()));
        doc = doc.add(label);
    }

    debug!(frame = frame.index(), nodes = frame.nodes().len(); "SVG document rendered");
    Ok(doc)
}

fn rectangle(rect: Rect, fill: &Color) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", rect.x())
        .set("y", rect.y())
        .set("width", rect.width().max(0))
        .set("height", rect.height().max(0))
        .set("fill", fill.to_string())
        .set("fill-opacity", fill.alpha())
}

/// SVG exporter writing to a file.
#[derive(Debug, Clone)]
pub struct Svg {
    file_name: String,
    style: StyleConfig,
}

impl Svg {
    pub fn new(file_name: &str, style: StyleConfig) -> Self {
        Self {
            file_name: file_name.to_string(),
            style,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Writes an SVG document to the configured file.
    pub fn write_document(&self, doc: &Document) -> Result<(), TrellisError> {
        info!(file_name = self.file_name; "Creating SVG file");
        let mut file = File::create(&self.file_name).map_err(|err| {
            error!(file_name = self.file_name, err:err; "Failed to create SVG file");
            err
        })?;

        write!(file, "{doc}").map_err(|err| {
            error!(file_name = self.file_name, err:err; "Failed to write SVG content");
            err
        })?;

        Ok(())
    }
}

impl Exporter for Svg {
    fn export_frame(&self, frame: &Frame) -> Result<(), TrellisError> {
        let doc = render(frame, &self.style)?;
        self.write_document(&doc)
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::geometry::Size;

    use super::*;
    use crate::{
        config::AppConfig,
        scene::{Scene, SceneChild, ScenePass},
    };

    fn frame() -> Frame {
        let scene = Scene::new(Size::new(300, 200)).with_pass(ScenePass::new(vec![
            SceneChild::new("Hello", 0, 0)
                .with_span(2, 1)
                .with_background("red"),
            SceneChild::new("Small", 0, 1).with_background("blue"),
            SceneChild::new("Button", 1, 1).with_background("green"),
        ]));
        scene
            .run(&AppConfig::default())
            .unwrap()
            .pop()
            .unwrap()
    }

    #[test]
    fn test_one_rect_per_child() {
        let rendered = render(&frame(), &StyleConfig::default())
            .unwrap()
            .to_string();

        assert_eq!(rendered.matches("<rect").count(), 3);
        assert_eq!(rendered.matches("<text").count(), 3);
        assert!(rendered.contains("viewBox=\"0 0 300 200\""));
        assert!(rendered.contains(">Hello<") || rendered.contains(">\nHello\n<"));
    }

    #[test]
    fn test_invalid_background_is_config_error() {
        let style: StyleConfig = toml::from_str("background_color = \"nope\"").unwrap();
        let err = render(&frame(), &style).unwrap_err();
        assert!(matches!(err, TrellisError::Config(_)));
    }

    #[test]
    fn test_exporter_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.svg");
        let exporter = Svg::new(&path.to_string_lossy(), StyleConfig::default());

        exporter.export_frame(&frame()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
        assert_eq!(written.matches("<rect").count(), 3);
    }

    #[test]
    fn test_exporter_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.svg");
        let exporter = Svg::new(&path.to_string_lossy(), StyleConfig::default());

        let err = exporter.export_frame(&frame()).unwrap_err();

        assert!(matches!(err, TrellisError::Io(_)));
        assert_eq!(exporter.file_name(), path.to_string_lossy());
    }

    #[test]
    fn test_background_adds_rect() {
        let style: StyleConfig = toml::from_str("background_color = \"white\"").unwrap();
        let rendered = render(&frame(), &style).unwrap().to_string();
        assert_eq!(rendered.matches("<rect").count(), 4);
    }
}
