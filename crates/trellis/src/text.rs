//! Intrinsic text measurement backed by cosmic-text.
//!
//! Scene children without an explicit preferred size report the size of
//! their label, shaped with real font metrics, plus padding on every side.

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

use trellis_core::geometry::Size;

use crate::config::StyleConfig;

/// Line height as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Average glyph advance as a multiple of the font size, used when shaping
/// produced no layout runs.
const FALLBACK_ADVANCE_FACTOR: f32 = 0.55;

static FONT_SYSTEM: OnceLock<Mutex<FontSystem>> = OnceLock::new();

fn font_system() -> &'static Mutex<FontSystem> {
    FONT_SYSTEM.get_or_init(|| {
        info!("Initializing FontSystem");
        Mutex::new(FontSystem::new())
    })
}

/// Measures single or multi-line labels.
///
/// Results are rounded up to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMeasurer {
    font_size: f32,
    padding: i32,
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::from_style(&StyleConfig::default())
    }
}

impl TextMeasurer {
    pub fn new(font_size: f32, padding: i32) -> Self {
        Self {
            font_size: font_size.max(1.0),
            padding: padding.max(0),
        }
    }

    /// Creates a measurer using the font size and cell padding of `style`.
    pub fn from_style(style: &StyleConfig) -> Self {
        Self::new(style.font_size(), style.cell_padding())
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn padding(&self) -> i32 {
        self.padding
    }

    /// Size of `text` including padding. Empty text measures as padding only.
    pub fn measure(&self, text: &str) -> Size {
        self.measure_content(text).add_padding(self.padding)
    }

    fn measure_content(&self, text: &str) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = font_system().lock().expect("failed to lock FontSystem");
        let metrics = Metrics::new(self.font_size, self.font_size * LINE_HEIGHT_FACTOR);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);
        let attrs = Attrs::new().family(Family::SansSerif);

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        let mut runs = 0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
            runs += 1;
        }

        if runs == 0 {
            let longest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
            max_width = longest as f32 * self.font_size * FALLBACK_ADVANCE_FACTOR;
            total_height = text.lines().count().max(1) as f32 * metrics.line_height;
        }

        Size::new(to_pixels(max_width), to_pixels(total_height))
    }
}

fn to_pixels(value: f32) -> i32 {
    // `as` saturates for out-of-range floats and maps NaN to zero.
    value.ceil() as i32
}
