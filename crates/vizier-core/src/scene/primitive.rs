//! Vector drawing units.
//!
//! Primitives are plain data records; the engine's SVG serializer turns them
//! into markup, and renderers construct them directly. Paint order is the
//! order primitives appear in their canvas or group.

use std::collections::BTreeMap;

use crate::{
    color::Color,
    geometry::{Bounds, Point},
    text::FontSpec,
    scene::transient::Transient,
};

/// Stroke appearance for lines, outlines and connectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Horizontal text anchoring, mapping to the SVG `text-anchor` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// A run of text inside a vector canvas.
///
/// `position` anchors the first line; additional lines stack downward one
/// line height apart.
#[derive(Debug, Clone)]
pub struct TextSpan {
    pub position: Point,
    pub lines: Vec<String>,
    pub font: FontSpec,
    pub color: Color,
    pub anchor: TextAnchor,
}

impl TextSpan {
    /// Single-line text centered on `position`.
    pub fn centered(position: Point, content: &str, font: FontSpec, color: Color) -> Self {
        Self {
            position,
            lines: vec![content.to_string()],
            font,
            color,
            anchor: TextAnchor::Middle,
        }
    }
}

/// A straight line segment, optionally ending in an arrowhead.
#[derive(Debug, Clone)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub stroke: Stroke,
    /// Arrowhead color; the serializer emits one shared marker per color.
    pub marker_end: Option<Color>,
}

/// A path given as SVG path data.
#[derive(Debug, Clone)]
pub struct PathShape {
    pub data: String,
    pub stroke: Stroke,
    pub fill: Option<Color>,
    pub marker_end: Option<Color>,
}

/// An axis-aligned rectangle, optionally with rounded corners.
#[derive(Debug, Clone)]
pub struct RectShape {
    pub bounds: Bounds,
    pub corner_radius: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone)]
pub struct CircleShape {
    pub center: Point,
    pub radius: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone)]
pub struct EllipseShape {
    pub center: Point,
    pub rx: f32,
    pub ry: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone)]
pub struct PolygonShape {
    pub points: Vec<Point>,
    pub fill: Option<Color>,
    pub fill_opacity: Option<f32>,
    pub stroke: Option<Stroke>,
}

/// A group of primitives sharing transient presentation state.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub children: Vec<Primitive>,
    pub transient: Transient,
}

/// One drawing unit inside a [`VectorCanvas`](crate::scene::VectorCanvas).
#[derive(Debug, Clone)]
pub enum Primitive {
    Line(Line),
    Path(PathShape),
    Rect(RectShape),
    Circle(CircleShape),
    Ellipse(EllipseShape),
    Polygon(PolygonShape),
    Text(TextSpan),
    Group(Group),
}

impl Primitive {
    /// Stable kind name used for composition censuses.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Line(_) => "line",
            Self::Path(_) => "path",
            Self::Rect(_) => "rect",
            Self::Circle(_) => "circle",
            Self::Ellipse(_) => "ellipse",
            Self::Polygon(_) => "polygon",
            Self::Text(_) => "text",
            Self::Group(_) => "group",
        }
    }

    pub(crate) fn strip_transient(&mut self) {
        if let Self::Group(group) = self {
            group.transient.clear();
            for child in &mut group.children {
                child.strip_transient();
            }
        }
    }

    pub(crate) fn census_into(&self, counts: &mut BTreeMap<&'static str, usize>) {
        *counts.entry(self.kind_name()).or_default() += 1;
        if let Self::Group(group) = self {
            for child in &group.children {
                child.census_into(counts);
            }
        }
    }
}
