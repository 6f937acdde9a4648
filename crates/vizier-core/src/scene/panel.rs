//! Styled box containers.
//!
//! Panels are the scene-side counterpart of the styled-box layout the
//! timeline, comparison and infographic renderers produce: absolutely
//! positioned rounded boxes with borders, nested children, text blocks and
//! optionally an embedded vector canvas (the comparison radar chart). Panels
//! carry [`Transient`] state separately from their geometry so the export
//! pipeline can strip it from clones.

use std::collections::BTreeMap;

use crate::{
    color::Color,
    geometry::{Bounds, Point},
    scene::{
        VectorCanvas,
        primitive::{Stroke, TextAnchor},
        transient::Transient,
    },
    text::FontSpec,
};

/// Identifies which box-layout diagram family a panel belongs to.
///
/// The export pipeline's smart strategy selection keys off these markers:
/// scenes containing any marked panel are not eligible for plain vector
/// serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Timeline,
    Comparison,
    Infographic,
}

impl Marker {
    pub fn name(self) -> &'static str {
        match self {
            Self::Timeline => "timeline",
            Self::Comparison => "comparison",
            Self::Infographic => "infographic",
        }
    }
}

/// Visual styling of a panel box.
#[derive(Debug, Clone, Default)]
pub struct BoxStyle {
    pub fill: Option<Color>,
    pub border: Option<Stroke>,
    pub corner_radius: f32,
}

impl BoxStyle {
    /// A filled box with no border.
    pub fn filled(color: Color, corner_radius: f32) -> Self {
        Self {
            fill: Some(color),
            border: None,
            corner_radius,
        }
    }

    /// A filled box with a border.
    pub fn outlined(fill: Color, border: Stroke, corner_radius: f32) -> Self {
        Self {
            fill: Some(fill),
            border: Some(border),
            corner_radius,
        }
    }
}

/// A block of laid-out text lines inside a panel.
///
/// `origin` anchors the top of the block; lines stack downward one line
/// height apart. The anchor controls how each line relates to `origin.x`.
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub origin: Point,
    pub lines: Vec<String>,
    pub font: FontSpec,
    pub color: Color,
    pub anchor: TextAnchor,
}

impl TextBlock {
    pub fn new(origin: Point, lines: Vec<String>, font: FontSpec, color: Color) -> Self {
        Self {
            origin,
            lines,
            font,
            color,
            anchor: TextAnchor::Start,
        }
    }

    /// Single-line block centered horizontally on `origin.x`.
    pub fn centered(origin: Point, content: &str, font: FontSpec, color: Color) -> Self {
        Self {
            origin,
            lines: vec![content.to_string()],
            font,
            color,
            anchor: TextAnchor::Middle,
        }
    }
}

/// A vector canvas embedded inside a panel at an absolute origin.
#[derive(Debug, Clone)]
pub struct PlacedCanvas {
    pub origin: Point,
    pub canvas: VectorCanvas,
}

/// One child of a [`Panel`].
#[derive(Debug, Clone)]
pub enum PanelNode {
    Panel(Panel),
    Text(TextBlock),
    Canvas(PlacedCanvas),
}

/// A styled, absolutely positioned box.
#[derive(Debug, Clone)]
pub struct Panel {
    pub bounds: Bounds,
    pub style: BoxStyle,
    pub marker: Option<Marker>,
    pub transient: Transient,
    pub children: Vec<PanelNode>,
}

impl Panel {
    /// Creates an unstyled, unmarked panel covering `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            style: BoxStyle::default(),
            marker: None,
            transient: Transient::default(),
            children: Vec::new(),
        }
    }

    /// Appends a nested panel.
    pub fn push_panel(&mut self, panel: Panel) {
        self.children.push(PanelNode::Panel(panel));
    }

    /// Appends a text block.
    pub fn push_text(&mut self, text: TextBlock) {
        self.children.push(PanelNode::Text(text));
    }

    /// Embeds a vector canvas at the given origin.
    pub fn push_canvas(&mut self, origin: Point, canvas: VectorCanvas) {
        self.children
            .push(PanelNode::Canvas(PlacedCanvas { origin, canvas }));
    }

    /// True when this panel or any descendant carries a diagram marker.
    pub fn has_marker(&self) -> bool {
        if self.marker.is_some() {
            return true;
        }
        self.children.iter().any(|child| match child {
            PanelNode::Panel(panel) => panel.has_marker(),
            _ => false,
        })
    }

    pub(crate) fn strip_transient(&mut self) {
        self.transient.clear();
        for child in &mut self.children {
            match child {
                PanelNode::Panel(panel) => panel.strip_transient(),
                PanelNode::Canvas(placed) => placed.canvas.strip_transient(),
                PanelNode::Text(_) => {}
            }
        }
    }

    pub(crate) fn census_into(&self, counts: &mut BTreeMap<&'static str, usize>) {
        *counts.entry("panel").or_default() += 1;
        for child in &self.children {
            match child {
                PanelNode::Panel(panel) => panel.census_into(counts),
                PanelNode::Text(_) => *counts.entry("text-block").or_default() += 1,
                PanelNode::Canvas(placed) => placed.canvas.census_into(counts),
            }
        }
    }
}
