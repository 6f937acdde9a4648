//! The typed diagram description model.
//!
//! A [`DiagramDescription`] is the single input the rendering engine
//! consumes: a tagged union over the six supported diagram families plus an
//! explicit [`UnknownDescription`] degraded variant for unrecognized tags.
//! Field names follow the JSON wire format produced by the text-to-structure
//! collaborator (`type`, `centerNode`, `nodes`, ...).
//!
//! Validation that depends on rendering context (endpoint resolution,
//! required coordinates) lives with the renderers; this module provides the
//! shared [`DescriptionError`] vocabulary and the style-record color
//! accessors.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::{color::Color, geometry::Point, identifier::Id};

/// A malformed or inconsistent diagram description.
///
/// Surfaced synchronously by the render pass; never retried automatically.
#[derive(Debug, Clone, Error)]
pub enum DescriptionError {
    #[error("{diagram} description is missing required field `{field}`")]
    MissingField {
        diagram: &'static str,
        field: &'static str,
    },

    #[error("{diagram} node `{id}` has no coordinates")]
    MissingCoordinates { diagram: &'static str, id: String },

    #[error("description tagged `{expected}` was dispatched to the {actual} renderer")]
    TagMismatch {
        expected: String,
        actual: &'static str,
    },

    #[error("connection {index} references unknown node id `{id}`")]
    UnknownEndpoint { index: usize, id: String },

    #[error("{diagram} description has no {what}")]
    Empty {
        diagram: &'static str,
        what: &'static str,
    },

    #[error("invalid color for `{field}`: {message}")]
    InvalidColor {
        field: &'static str,
        message: String,
    },
}

/// A connection between two nodes, optionally labelled.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection {
    pub from: Id,
    pub to: Id,
    #[serde(default)]
    pub label: Option<String>,
}

/// Color roles carried by a description's style record.
///
/// All roles are optional raw CSS strings; accessors parse on demand so an
/// invalid color surfaces as a [`DescriptionError`] naming the role. Missing
/// roles fall back to the engine palette at the call site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSpec {
    background_color: Option<String>,
    node_color: Option<String>,
    text_color: Option<String>,
    line_color: Option<String>,
    event_color: Option<String>,
    primary_color: Option<String>,
    secondary_color: Option<String>,
    accent_color: Option<String>,
    #[serde(default)]
    node_colors: HashMap<String, String>,
}

fn parse_role(
    field: &'static str,
    value: Option<&String>,
) -> Result<Option<Color>, DescriptionError> {
    value
        .map(|raw| Color::new(raw))
        .transpose()
        .map_err(|message| DescriptionError::InvalidColor { field, message })
}

impl StyleSpec {
    pub fn background_color(&self) -> Result<Option<Color>, DescriptionError> {
        parse_role("backgroundColor", self.background_color.as_ref())
    }

    pub fn node_color(&self) -> Result<Option<Color>, DescriptionError> {
        parse_role("nodeColor", self.node_color.as_ref())
    }

    pub fn text_color(&self) -> Result<Option<Color>, DescriptionError> {
        parse_role("textColor", self.text_color.as_ref())
    }

    pub fn line_color(&self) -> Result<Option<Color>, DescriptionError> {
        parse_role("lineColor", self.line_color.as_ref())
    }

    pub fn event_color(&self) -> Result<Option<Color>, DescriptionError> {
        parse_role("eventColor", self.event_color.as_ref())
    }

    pub fn primary_color(&self) -> Result<Option<Color>, DescriptionError> {
        parse_role("primaryColor", self.primary_color.as_ref())
    }

    pub fn secondary_color(&self) -> Result<Option<Color>, DescriptionError> {
        parse_role("secondaryColor", self.secondary_color.as_ref())
    }

    pub fn accent_color(&self) -> Result<Option<Color>, DescriptionError> {
        parse_role("accentColor", self.accent_color.as_ref())
    }

    /// Per-kind node color override for flowcharts (`nodeColors.start`, ...).
    pub fn node_color_for(&self, kind: &str) -> Result<Option<Color>, DescriptionError> {
        self.node_colors
            .get(kind)
            .map(|raw| Color::new(raw))
            .transpose()
            .map_err(|message| DescriptionError::InvalidColor {
                field: "nodeColors",
                message,
            })
    }
}

// ---------------------------------------------------------------------------
// Mindmap
// ---------------------------------------------------------------------------

/// One mindmap node. Coordinates are author-supplied and required; there is
/// no computed radial fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct MindmapNode {
    pub id: Id,
    #[serde(rename = "text")]
    pub label: String,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub parent: Option<Id>,
    #[serde(default)]
    pub level: u32,
}

impl MindmapNode {
    /// Returns the author-supplied position, or the error the render
    /// contract requires when coordinates are absent.
    pub fn position(&self, diagram: &'static str) -> Result<Point, DescriptionError> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => Err(DescriptionError::MissingCoordinates {
                diagram,
                id: self.id.resolve(),
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MindmapDescription {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub style: StyleSpec,
    #[serde(rename = "centerNode")]
    pub center_node: MindmapNode,
    #[serde(default)]
    pub nodes: Vec<MindmapNode>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

// ---------------------------------------------------------------------------
// Flowchart
// ---------------------------------------------------------------------------

/// The structural role of a flowchart node, deciding its rendered shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowNodeKind {
    Start,
    Process,
    Decision,
    End,
}

impl FlowNodeKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Process => "process",
            Self::Decision => "decision",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlowNode {
    pub id: Id,
    #[serde(rename = "text")]
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FlowNodeKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlowchartDescription {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub style: StyleSpec,
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// One timeline event. Column side and coordinates are computed by layout,
/// never supplied by the author.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineEvent {
    #[serde(default)]
    pub id: Option<Id>,
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimelineDescription {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub style: StyleSpec,
    pub events: Vec<TimelineEvent>,
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub name: String,
    #[serde(default)]
    pub value: String,
    /// Numeric score in the 0..=10 range.
    #[serde(default)]
    pub score: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonItem {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl ComparisonItem {
    /// Mean feature score, `0.0` for feature-less items.
    pub fn overall_score(&self) -> f32 {
        if self.features.is_empty() {
            return 0.0;
        }
        let total: f32 = self.features.iter().map(|f| f.score).sum();
        total / self.features.len() as f32
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonDescription {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub style: StyleSpec,
    pub items: Vec<ComparisonItem>,
}

// ---------------------------------------------------------------------------
// Hierarchy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct HierarchyNode {
    pub id: Id,
    #[serde(rename = "text")]
    pub label: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub parent: Option<Id>,
    #[serde(default)]
    pub children: Vec<Id>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HierarchyDescription {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub style: StyleSpec,
    pub nodes: Vec<HierarchyNode>,
    /// Explicit connections; when absent they are implied by parent links.
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl HierarchyDescription {
    /// Explicit connections when given, otherwise the parent → child edges
    /// implied by each node's `parent` field, in node order.
    pub fn effective_connections(&self) -> Vec<Connection> {
        if !self.connections.is_empty() {
            return self.connections.clone();
        }
        self.nodes
            .iter()
            .filter_map(|node| {
                node.parent.map(|parent| Connection {
                    from: parent,
                    to: node.id,
                    label: None,
                })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Infographic
// ---------------------------------------------------------------------------

/// A stat value that may arrive as a JSON number or string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for StatValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatItem {
    pub label: String,
    pub value: StatValue,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Chart flavor inside an infographic chart section. Only progress/bar rows
/// have a visual today; unrecognized flavors render nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartKind {
    Progress,
    #[default]
    Bar,
    Unknown,
}

impl<'de> serde::Deserialize<'de> for ChartKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "progress" => Self::Progress,
            "bar" => Self::Bar,
            _ => Self::Unknown,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartDatum {
    pub label: String,
    /// Percentage in the 0..=100 range.
    pub value: f32,
}

/// Per-section style overrides (header sections).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStyle {
    background_color: Option<String>,
    color: Option<String>,
}

impl SectionStyle {
    pub fn background_color(&self) -> Result<Option<Color>, DescriptionError> {
        parse_role("backgroundColor", self.background_color.as_ref())
    }

    pub fn color(&self) -> Result<Option<Color>, DescriptionError> {
        parse_role("color", self.color.as_ref())
    }
}

/// One stacked section of an infographic.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Section {
    Header {
        content: String,
        #[serde(default)]
        style: SectionStyle,
    },
    Stats {
        items: Vec<StatItem>,
    },
    Chart {
        #[serde(rename = "chartType", default)]
        chart_type: ChartKind,
        #[serde(default)]
        data: Vec<ChartDatum>,
    },
    Text {
        content: String,
    },
    /// Degraded mode: an unrecognized section kind renders an inline notice
    /// instead of failing the whole diagram.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InfographicDescription {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub style: StyleSpec,
    pub sections: Vec<Section>,
}

// ---------------------------------------------------------------------------
// Unknown / degraded
// ---------------------------------------------------------------------------

/// An unrecognized diagram tag, kept as a pretty-printed dump for the
/// raw-data preview renderer.
#[derive(Debug, Clone)]
pub struct UnknownDescription {
    pub tag: String,
    pub body: String,
}

// ---------------------------------------------------------------------------
// The tagged union
// ---------------------------------------------------------------------------

/// The input consumed by one render pass.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DiagramDescription {
    Mindmap(MindmapDescription),
    Flowchart(FlowchartDescription),
    Timeline(TimelineDescription),
    Comparison(ComparisonDescription),
    Hierarchy(HierarchyDescription),
    Infographic(InfographicDescription),
    #[serde(skip)]
    Unknown(UnknownDescription),
}

/// The six recognized diagram type tags, in declaration order.
pub const KNOWN_TAGS: [&str; 6] = [
    "mindmap",
    "flowchart",
    "timeline",
    "comparison",
    "hierarchy",
    "infographic",
];

impl DiagramDescription {
    /// Builds the degraded variant for an unrecognized tag.
    pub fn unknown(tag: &str, body: String) -> Self {
        Self::Unknown(UnknownDescription {
            tag: tag.to_string(),
            body,
        })
    }

    /// The description's type tag.
    pub fn tag(&self) -> &str {
        match self {
            Self::Mindmap(_) => "mindmap",
            Self::Flowchart(_) => "flowchart",
            Self::Timeline(_) => "timeline",
            Self::Comparison(_) => "comparison",
            Self::Hierarchy(_) => "hierarchy",
            Self::Infographic(_) => "infographic",
            Self::Unknown(unknown) => &unknown.tag,
        }
    }

    /// The description's display title, when one is present.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Mindmap(d) => d.title.as_deref(),
            Self::Flowchart(d) => d.title.as_deref(),
            Self::Timeline(d) => d.title.as_deref(),
            Self::Comparison(d) => d.title.as_deref(),
            Self::Hierarchy(d) => d.title.as_deref(),
            Self::Infographic(d) => d.title.as_deref(),
            Self::Unknown(_) => None,
        }
    }
}
