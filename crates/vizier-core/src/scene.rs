//! The retained scene tree.
//!
//! Every diagram renderer emits into a [`Scene`]: an ordered list of
//! top-level nodes, each either a [`VectorCanvas`] (a self-contained vector
//! drawing with its own view box) or a [`Panel`] (a styled box with absolute
//! bounds, nested children and text). The export pipeline reads scenes to
//! pick a rasterization strategy, clones them for isolated export, and
//! strips transient presentation state from the clones.
//!
//! # Overview
//!
//! - [`primitive`] - vector drawing units: lines, paths, shapes, text spans
//! - [`panel`] - styled box containers with markers and text blocks
//! - [`transient`] - animation/transition/transform state kept separate from
//!   layout so it can be stripped before rasterization

pub mod panel;
pub mod primitive;
pub mod transient;

use std::collections::BTreeMap;

pub use panel::{BoxStyle, Marker, Panel, PanelNode, PlacedCanvas, TextBlock};
pub use primitive::{
    CircleShape, EllipseShape, Group, Line, PathShape, PolygonShape, Primitive, RectShape, Stroke,
    TextAnchor, TextSpan,
};
pub use transient::{EntryAnimation, Transform, Transient};

use crate::{
    color::Color,
    geometry::{Bounds, Point, Size},
};

/// A self-contained vector drawing.
///
/// Corresponds to one top-level `<svg>` element in the serialized output:
/// a fixed view box, an optional opaque background, and an ordered list of
/// primitives painted in sequence.
#[derive(Debug, Clone)]
pub struct VectorCanvas {
    size: Size,
    view_box: Bounds,
    background: Option<Color>,
    nodes: Vec<Primitive>,
}

impl VectorCanvas {
    /// Creates an empty canvas whose view box matches `size` at the origin.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            view_box: Bounds::from_origin_size(Point::default(), size),
            background: None,
            nodes: Vec::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn view_box(&self) -> Bounds {
        self.view_box
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Sets the opaque background painted behind all primitives.
    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    /// Appends a primitive; paint order follows push order.
    pub fn push(&mut self, primitive: Primitive) {
        self.nodes.push(primitive);
    }

    pub fn nodes(&self) -> &[Primitive] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn strip_transient(&mut self) {
        for node in &mut self.nodes {
            node.strip_transient();
        }
    }

    pub(crate) fn census_into(&self, counts: &mut BTreeMap<&'static str, usize>) {
        *counts.entry("canvas").or_default() += 1;
        for node in &self.nodes {
            node.census_into(counts);
        }
    }
}

/// One top-level entry of a [`Scene`].
#[derive(Debug, Clone)]
pub enum SceneNode {
    Vector(VectorCanvas),
    Panel(Panel),
}

/// The full rendered content of one container.
///
/// Scenes are rebuilt wholesale on every render pass; there is no
/// incremental diffing.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vector canvas as a top-level node.
    pub fn push_canvas(&mut self, canvas: VectorCanvas) {
        self.nodes.push(SceneNode::Vector(canvas));
    }

    /// Appends a panel as a top-level node.
    pub fn push_panel(&mut self, panel: Panel) {
        self.nodes.push(SceneNode::Panel(panel));
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes all content.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Returns the single top-level vector canvas, if the scene consists of
    /// exactly one.
    pub fn sole_vector_canvas(&self) -> Option<&VectorCanvas> {
        let mut canvases = self.nodes.iter().filter_map(|node| match node {
            SceneNode::Vector(canvas) => Some(canvas),
            SceneNode::Panel(_) => None,
        });
        let first = canvases.next()?;
        if canvases.next().is_some() {
            return None;
        }
        Some(first)
    }

    /// Returns true when any panel in the scene carries a box-layout diagram
    /// marker (timeline, comparison, infographic).
    pub fn has_box_marker(&self) -> bool {
        self.nodes.iter().any(|node| match node {
            SceneNode::Vector(_) => false,
            SceneNode::Panel(panel) => panel.has_marker(),
        })
    }

    /// Union of the layout extents of all top-level nodes.
    ///
    /// Vector canvases sit at the origin; panels use their absolute bounds.
    pub fn content_bounds(&self) -> Bounds {
        let mut bounds: Option<Bounds> = None;
        for node in &self.nodes {
            let node_bounds = match node {
                SceneNode::Vector(canvas) => {
                    Bounds::from_origin_size(Point::default(), canvas.size())
                }
                SceneNode::Panel(panel) => panel.bounds,
            };
            bounds = Some(match bounds {
                Some(current) => current.merge(&node_bounds),
                None => node_bounds,
            });
        }
        bounds.unwrap_or_default()
    }

    /// Removes every animation, transition and transform from the whole
    /// tree, leaving layout untouched.
    pub fn strip_transient(&mut self) {
        for node in &mut self.nodes {
            match node {
                SceneNode::Vector(canvas) => canvas.strip_transient(),
                SceneNode::Panel(panel) => panel.strip_transient(),
            }
        }
    }

    /// Counts scene content by node kind.
    ///
    /// Two renders of the same description produce identical censuses, which
    /// is how tests check composition idempotence without comparing floats.
    pub fn primitive_census(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for node in &self.nodes {
            match node {
                SceneNode::Vector(canvas) => canvas.census_into(&mut counts),
                SceneNode::Panel(panel) => panel.census_into(&mut counts),
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::text::FontSpec;

    fn sample_panel(marker: Option<Marker>) -> Panel {
        let mut panel = Panel::new(Bounds::from_origin_size(
            Point::new(0.0, 0.0),
            Size::new(100.0, 50.0),
        ));
        panel.marker = marker;
        panel
    }

    #[test]
    fn test_sole_vector_canvas() {
        let mut scene = Scene::new();
        assert!(scene.sole_vector_canvas().is_none());

        scene.push_canvas(VectorCanvas::new(Size::new(10.0, 10.0)));
        assert!(scene.sole_vector_canvas().is_some());

        scene.push_canvas(VectorCanvas::new(Size::new(10.0, 10.0)));
        assert!(scene.sole_vector_canvas().is_none());
    }

    #[test]
    fn test_box_marker_detection() {
        let mut scene = Scene::new();
        scene.push_panel(sample_panel(None));
        assert!(!scene.has_box_marker());

        scene.push_panel(sample_panel(Some(Marker::Timeline)));
        assert!(scene.has_box_marker());
    }

    #[test]
    fn test_content_bounds_union() {
        let mut scene = Scene::new();
        scene.push_canvas(VectorCanvas::new(Size::new(800.0, 600.0)));
        let mut panel = sample_panel(None);
        panel.bounds = Bounds::from_origin_size(Point::new(0.0, 600.0), Size::new(400.0, 200.0));
        scene.push_panel(panel);

        let bounds = scene.content_bounds();
        assert_approx_eq!(f32, bounds.width(), 800.0);
        assert_approx_eq!(f32, bounds.height(), 800.0);
    }

    #[test]
    fn test_strip_transient_clears_everything() {
        let mut panel = sample_panel(Some(Marker::Comparison));
        panel.transient = Transient::slide_in_up(0.3);
        let mut inner = sample_panel(None);
        inner.transient = Transient::hover_lift();
        panel.children.push(PanelNode::Panel(inner));

        let mut scene = Scene::new();
        scene.push_panel(panel);

        let census_before = scene.primitive_census();
        scene.strip_transient();
        assert_eq!(scene.primitive_census(), census_before);

        match &scene.nodes()[0] {
            SceneNode::Panel(panel) => {
                assert!(panel.transient.is_empty());
                match &panel.children[0] {
                    PanelNode::Panel(inner) => assert!(inner.transient.is_empty()),
                    other => panic!("unexpected child: {other:?}"),
                }
            }
            other => panic!("unexpected node: {other:?}"),
        }
    }

    #[test]
    fn test_census_counts_by_kind() {
        let mut canvas = VectorCanvas::new(Size::new(100.0, 100.0));
        canvas.push(Primitive::Circle(CircleShape {
            center: Point::new(50.0, 50.0),
            radius: 10.0,
            fill: Some(Color::default()),
            stroke: None,
        }));
        canvas.push(Primitive::Text(TextSpan::centered(
            Point::new(50.0, 50.0),
            "hi",
            FontSpec::default(),
            Color::default(),
        )));

        let mut scene = Scene::new();
        scene.push_canvas(canvas);

        let census = scene.primitive_census();
        assert_eq!(census.get("canvas"), Some(&1));
        assert_eq!(census.get("circle"), Some(&1));
        assert_eq!(census.get("text"), Some(&1));
    }
}
