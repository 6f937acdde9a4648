//! Scene → SVG serialization.
//!
//! Turns a retained [`Scene`] into a `svg::Document`: vector canvases become
//! translated groups with their own background rect, panels become rounded
//! rects plus recursive children, text blocks become `<text>` runs of
//! tspans. Arrowhead markers are shared per color and collected into a
//! single `<defs>` block.

use indexmap::IndexMap;

use svg::Document;
use svg::node::{Text as RawText, element as svg_element};

use vizier_core::color::Color;
use vizier_core::geometry::{Point, Size};
use vizier_core::scene::{
    Panel, PanelNode, Primitive, Scene, SceneNode, Stroke, TextBlock, TextSpan, VectorCanvas,
};

/// Boxed SVG node, the serializer's working currency.
pub type SvgNode = Box<dyn svg::Node>;

/// Controls how a scene is serialized.
#[derive(Debug, Clone, Default)]
pub struct SerializeOptions {
    /// Opaque background painted behind the whole document.
    pub background: Option<Color>,
    /// Whether transient transforms are applied to the output. The live
    /// snapshot keeps them; isolated clones have already been stripped.
    pub include_transient: bool,
}

/// Serializes a whole scene into a document of the given size.
pub fn scene_to_document(scene: &Scene, size: Size, options: &SerializeOptions) -> Document {
    let mut serializer = Serializer::new(options.include_transient);

    let mut content: Vec<SvgNode> = Vec::new();
    if let Some(background) = options.background {
        content.push(Box::new(full_rect(size, background)));
    }
    for node in scene.nodes() {
        match node {
            SceneNode::Vector(canvas) => {
                content.push(serializer.canvas(canvas, Point::default()));
            }
            SceneNode::Panel(panel) => content.push(serializer.panel(panel)),
        }
    }

    serializer.into_document(size, content)
}

/// Serializes a single vector canvas with an injected opaque background.
///
/// This is the vector-serialize export path: the canvas is the document, and
/// a background shape becomes its first child because vector drawings are
/// otherwise transparent.
pub fn canvas_to_document(canvas: &VectorCanvas, fallback_background: Color) -> Document {
    let mut serializer = Serializer::new(false);

    let mut content: Vec<SvgNode> = Vec::new();
    content.push(Box::new(full_rect(
        canvas.size(),
        canvas.background().unwrap_or(fallback_background),
    )));
    for primitive in canvas.nodes() {
        content.push(serializer.primitive(primitive));
    }

    serializer.into_document(canvas.size(), content)
}

fn full_rect(size: Size, color: Color) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", 0)
        .set("y", 0)
        .set("width", size.width())
        .set("height", size.height())
        .set("fill", &color)
}

struct Serializer {
    include_transient: bool,
    /// Arrowhead colors keyed by their id-safe names.
    markers: IndexMap<String, Color>,
}

impl Serializer {
    fn new(include_transient: bool) -> Self {
        Self {
            include_transient,
            markers: IndexMap::new(),
        }
    }

    fn into_document(self, size: Size, content: Vec<SvgNode>) -> Document {
        let mut document = Document::new()
            .set("width", size.width())
            .set("height", size.height())
            .set("viewBox", (0.0, 0.0, size.width(), size.height()));

        if !self.markers.is_empty() {
            let mut defs = svg_element::Definitions::new();
            for (id, color) in &self.markers {
                let head = svg_element::Polygon::new()
                    .set("points", "0 0, 10 3.5, 0 7")
                    .set("fill", color);
                let marker = svg_element::Marker::new()
                    .set("id", format!("arrow_{id}"))
                    .set("markerWidth", 10)
                    .set("markerHeight", 7)
                    .set("refX", 9)
                    .set("refY", 3.5)
                    .set("orient", "auto")
                    .add(head);
                defs = defs.add(marker);
            }
            document = document.add(defs);
        }

        for node in content {
            document = document.add(node);
        }
        document
    }

    fn marker_ref(&mut self, color: Color) -> String {
        let id = color.to_id_safe_string();
        self.markers.entry(id.clone()).or_insert(color);
        format!("url(#arrow_{id})")
    }

    fn canvas(&mut self, canvas: &VectorCanvas, origin: Point) -> SvgNode {
        let mut group = svg_element::Group::new();
        if origin.x() != 0.0 || origin.y() != 0.0 {
            group = group.set("transform", format!("translate({} {})", origin.x(), origin.y()));
        }
        if let Some(background) = canvas.background() {
            group = group.add(full_rect(canvas.size(), background));
        }
        for primitive in canvas.nodes() {
            group = group.add(self.primitive(primitive));
        }
        Box::new(group)
    }

    fn primitive(&mut self, primitive: &Primitive) -> SvgNode {
        match primitive {
            Primitive::Line(line) => {
                let mut element = svg_element::Line::new()
                    .set("x1", line.from.x())
                    .set("y1", line.from.y())
                    .set("x2", line.to.x())
                    .set("y2", line.to.y());
                element = apply_stroke_line(element, line.stroke);
                if let Some(color) = line.marker_end {
                    element = element.set("marker-end", self.marker_ref(color));
                }
                Box::new(element)
            }
            Primitive::Path(path) => {
                let mut element = svg_element::Path::new()
                    .set("d", path.data.clone())
                    .set("fill", fill_value(path.fill));
                element = apply_stroke_path(element, path.stroke);
                if let Some(color) = path.marker_end {
                    element = element.set("marker-end", self.marker_ref(color));
                }
                Box::new(element)
            }
            Primitive::Rect(rect) => {
                let mut element = svg_element::Rectangle::new()
                    .set("x", rect.bounds.min_x())
                    .set("y", rect.bounds.min_y())
                    .set("width", rect.bounds.width())
                    .set("height", rect.bounds.height())
                    .set("fill", fill_value(rect.fill));
                if rect.corner_radius > 0.0 {
                    element = element.set("rx", rect.corner_radius);
                }
                if let Some(stroke) = rect.stroke {
                    element = apply_stroke_rect(element, stroke);
                }
                Box::new(element)
            }
            Primitive::Circle(circle) => {
                let mut element = svg_element::Circle::new()
                    .set("cx", circle.center.x())
                    .set("cy", circle.center.y())
                    .set("r", circle.radius)
                    .set("fill", fill_value(circle.fill));
                if let Some(stroke) = circle.stroke {
                    element = apply_stroke_circle(element, stroke);
                }
                Box::new(element)
            }
            Primitive::Ellipse(ellipse) => {
                let mut element = svg_element::Ellipse::new()
                    .set("cx", ellipse.center.x())
                    .set("cy", ellipse.center.y())
                    .set("rx", ellipse.rx)
                    .set("ry", ellipse.ry)
                    .set("fill", fill_value(ellipse.fill));
                if let Some(stroke) = ellipse.stroke {
                    element = apply_stroke_ellipse(element, stroke);
                }
                Box::new(element)
            }
            Primitive::Polygon(polygon) => {
                let points = polygon
                    .points
                    .iter()
                    .map(|point| format!("{},{}", point.x(), point.y()))
                    .collect::<Vec<_>>()
                    .join(" ");
                let mut element = svg_element::Polygon::new()
                    .set("points", points)
                    .set("fill", fill_value(polygon.fill));
                if let Some(opacity) = polygon.fill_opacity {
                    element = element.set("fill-opacity", opacity);
                }
                if let Some(stroke) = polygon.stroke {
                    element = apply_stroke_polygon(element, stroke);
                }
                Box::new(element)
            }
            Primitive::Text(span) => self.text_span(span),
            Primitive::Group(group) => {
                let mut element = svg_element::Group::new();
                if self.include_transient {
                    if let Some(transform) = group.transient.transform {
                        element = element.set("transform", transform.to_svg_value());
                    }
                }
                for child in &group.children {
                    element = element.add(self.primitive(child));
                }
                Box::new(element)
            }
        }
    }

    fn text_span(&mut self, span: &TextSpan) -> SvgNode {
        let line_height = span.font.line_height();
        // Center the block vertically on the anchor position.
        let block_height = span.lines.len() as f32 * line_height;
        let y_offset = -(block_height + line_height) / 2.0;

        let mut element = svg_element::Text::new("")
            .set("x", span.position.x())
            .set("y", span.position.y() + y_offset)
            .set("text-anchor", span.anchor.to_svg_value())
            .set("dominant-baseline", "central")
            .set("font-family", span.font.family())
            .set("font-size", span.font.size())
            .set("font-weight", span.font.weight().to_svg_value())
            .set("fill", &span.color);

        for line in &span.lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", span.position.x())
                .set("dy", line_height)
                .add(RawText::new(line.clone()));
            element = element.add(tspan);
        }
        Box::new(element)
    }

    fn text_block(&mut self, block: &TextBlock) -> SvgNode {
        let line_height = block.font.line_height();
        let mut element = svg_element::Text::new("")
            .set("x", block.origin.x())
            .set("y", block.origin.y())
            .set("text-anchor", block.anchor.to_svg_value())
            .set("dominant-baseline", "hanging")
            .set("font-family", block.font.family())
            .set("font-size", block.font.size())
            .set("font-weight", block.font.weight().to_svg_value())
            .set("fill", &block.color);

        for (index, line) in block.lines.iter().enumerate() {
            let tspan = svg_element::TSpan::new("")
                .set("x", block.origin.x())
                .set("dy", if index == 0 { 0.0 } else { line_height })
                .add(RawText::new(line.clone()));
            element = element.add(tspan);
        }
        Box::new(element)
    }

    fn panel(&mut self, panel: &Panel) -> SvgNode {
        let mut group = svg_element::Group::new();
        if let Some(marker) = panel.marker {
            group = group.set("data-marker", marker.name());
        }
        if self.include_transient {
            if let Some(transform) = panel.transient.transform {
                group = group.set("transform", transform.to_svg_value());
            }
        }

        if panel.style.fill.is_some() || panel.style.border.is_some() {
            let mut rect = svg_element::Rectangle::new()
                .set("x", panel.bounds.min_x())
                .set("y", panel.bounds.min_y())
                .set("width", panel.bounds.width())
                .set("height", panel.bounds.height())
                .set("fill", fill_value(panel.style.fill));
            if panel.style.corner_radius > 0.0 {
                rect = rect.set("rx", panel.style.corner_radius);
            }
            if let Some(border) = panel.style.border {
                rect = apply_stroke_rect(rect, border);
            }
            group = group.add(rect);
        }

        for child in &panel.children {
            match child {
                PanelNode::Panel(nested) => group = group.add(self.panel(nested)),
                PanelNode::Text(block) => group = group.add(self.text_block(block)),
                PanelNode::Canvas(placed) => {
                    group = group.add(self.canvas(&placed.canvas, placed.origin));
                }
            }
        }
        Box::new(group)
    }
}

fn fill_value(fill: Option<Color>) -> svg::node::Value {
    match fill {
        Some(color) => svg::node::Value::from(&color),
        None => svg::node::Value::from("none"),
    }
}

macro_rules! stroke_applier {
    ($name:ident, $element:ty) => {
        fn $name(element: $element, stroke: Stroke) -> $element {
            element
                .set("stroke", &stroke.color)
                .set("stroke-width", stroke.width)
        }
    };
}

stroke_applier!(apply_stroke_line, svg_element::Line);
stroke_applier!(apply_stroke_path, svg_element::Path);
stroke_applier!(apply_stroke_rect, svg_element::Rectangle);
stroke_applier!(apply_stroke_circle, svg_element::Circle);
stroke_applier!(apply_stroke_ellipse, svg_element::Ellipse);
stroke_applier!(apply_stroke_polygon, svg_element::Polygon);

#[cfg(test)]
mod tests {
    use vizier_core::geometry::Bounds;
    use vizier_core::scene::{BoxStyle, Line, Marker};
    use vizier_core::text::FontSpec;

    use super::*;

    #[test]
    fn test_canvas_document_injects_background_first() {
        let mut canvas = VectorCanvas::new(Size::new(100.0, 50.0));
        canvas.push(Primitive::Line(Line {
            from: Point::new(0.0, 0.0),
            to: Point::new(100.0, 50.0),
            stroke: Stroke::new(Color::new("#666").unwrap(), 2.0),
            marker_end: None,
        }));

        let markup = canvas_to_document(&canvas, Color::new("white").unwrap()).to_string();
        let rect_at = markup.find("<rect").unwrap();
        let line_at = markup.find("<line").unwrap();
        assert!(rect_at < line_at, "background rect precedes content");
        assert!(markup.contains("viewBox"));
    }

    #[test]
    fn test_marker_defs_shared_per_color() {
        let mut canvas = VectorCanvas::new(Size::new(100.0, 100.0));
        let color = Color::new("#666").unwrap();
        for index in 0..3 {
            canvas.push(Primitive::Line(Line {
                from: Point::new(0.0, index as f32),
                to: Point::new(50.0, index as f32),
                stroke: Stroke::new(color, 2.0),
                marker_end: Some(color),
            }));
        }

        let markup = canvas_to_document(&canvas, Color::new("white").unwrap()).to_string();
        assert_eq!(markup.matches("<marker").count(), 1);
        assert_eq!(markup.matches("marker-end").count(), 3);
    }

    #[test]
    fn test_panel_serializes_marker_and_text() {
        let mut panel = Panel::new(Bounds::from_origin_size(
            Point::default(),
            Size::new(200.0, 100.0),
        ));
        panel.marker = Some(Marker::Timeline);
        panel.style = BoxStyle::filled(Color::new("white").unwrap(), 12.0);
        panel.push_text(TextBlock::new(
            Point::new(10.0, 10.0),
            vec!["one".to_string(), "two".to_string()],
            FontSpec::default(),
            Color::new("#333").unwrap(),
        ));

        let mut scene = Scene::new();
        scene.push_panel(panel);
        let markup = scene_to_document(
            &scene,
            Size::new(200.0, 100.0),
            &SerializeOptions::default(),
        )
        .to_string();

        assert!(markup.contains("data-marker=\"timeline\""));
        assert_eq!(markup.matches("<tspan").count(), 2);
    }

    #[test]
    fn test_transient_transform_only_when_included() {
        let mut panel = Panel::new(Bounds::from_origin_size(
            Point::default(),
            Size::new(10.0, 10.0),
        ));
        panel.style = BoxStyle::filled(Color::new("white").unwrap(), 0.0);
        panel.transient.transform =
            Some(vizier_core::scene::Transform::Translate(Point::new(0.0, -5.0)));
        let mut scene = Scene::new();
        scene.push_panel(panel);

        let without = scene_to_document(
            &scene,
            Size::new(10.0, 10.0),
            &SerializeOptions::default(),
        )
        .to_string();
        assert!(!without.contains("transform="));

        let with = scene_to_document(
            &scene,
            Size::new(10.0, 10.0),
            &SerializeOptions {
                background: None,
                include_transient: true,
            },
        )
        .to_string();
        assert!(with.contains("translate(0 -5)"));
    }
}
