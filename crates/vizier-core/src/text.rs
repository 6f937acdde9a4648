//! Text measurement and wrapping.
//!
//! Layout decisions (card heights, two-line node labels, content bounds)
//! depend on how large a piece of text actually renders. This module keeps a
//! single reusable `cosmic-text` [`FontSystem`] and exposes measurement and
//! greedy wrapping on top of it.

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;
use serde::Deserialize;

use crate::geometry::Size;

/// Font weight for scene text. Only the two weights the renderers emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// Returns the SVG `font-weight` attribute value.
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

/// A font selection for a run of scene text.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    family: String,
    size: f32,
    weight: FontWeight,
}

impl FontSpec {
    pub fn new(family: &str, size: f32) -> Self {
        Self {
            family: family.to_string(),
            size,
            weight: FontWeight::Normal,
        }
    }

    /// Returns the same font at bold weight.
    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    /// Approximate height of one rendered line in this font.
    pub fn line_height(&self) -> f32 {
        self.size * PX_PER_PT * 1.15
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Arial", 14.0)
    }
}

// Points to pixels at standard DPI.
const PX_PER_PT: f32 = 1.33;

/// Measures the rendered size of `text` in the given font.
///
/// Multi-line input (embedded `\n`) is measured as a block: widest line by
/// total line height.
pub fn measure(text: &str, font: &FontSpec) -> Size {
    if text.is_empty() {
        return Size::default();
    }

    MEASURER.get_or_init(TextMeasurer::new).measure(text, font)
}

/// Greedily wraps `text` into lines no wider than `max_width`.
///
/// Splits on whitespace; a single word wider than `max_width` gets its own
/// line rather than being broken mid-word. Returns at least one line for
/// non-empty input.
pub fn wrap(text: &str, max_width: f32, font: &FontSpec) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if current.is_empty() || measure(&candidate, font).width() <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wraps a node label into at most two lines fitting `max_width`.
///
/// Labels too long for two lines keep the overflow on the second line; node
/// boxes have fixed dimensions, so truncation is a style decision left to
/// the renderer.
pub fn wrap_label(text: &str, max_width: f32, font: &FontSpec) -> Vec<String> {
    let lines = wrap(text, max_width, font);
    if lines.len() <= 2 {
        return lines;
    }
    let first = lines[0].clone();
    let rest = lines[1..].join(" ");
    vec![first, rest]
}

/// Holds the reusable FontSystem used for all measurements.
struct TextMeasurer {
    font_system: Mutex<FontSystem>,
}

impl TextMeasurer {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    fn measure(&self, text: &str, font: &FontSpec) -> Size {
        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        let font_size_px = font.size() * PX_PER_PT;
        let metrics = Metrics::new(font_size_px, font_size_px * 1.15);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(font.family()));

        // Unconstrained buffer so text flows to its natural width.
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if layout_runs.is_empty() {
            // Fallback estimate when no font is available for shaping.
            max_width = text.len() as f32 * (font_size_px * 0.55);
            total_height = metrics.line_height;
        } else {
            for run in &layout_runs {
                if let Some(last) = run.glyphs.last() {
                    max_width = max_width.max(last.x + last.w);
                }
                total_height += metrics.line_height;
            }
        }

        Size::new(max_width, total_height)
    }
}

static MEASURER: OnceLock<TextMeasurer> = OnceLock::new();
