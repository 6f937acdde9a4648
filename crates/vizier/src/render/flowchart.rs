//! Flowchart renderer: shaped nodes with routed, arrowed connectors.

use vizier_core::description::{
    DescriptionError, DiagramDescription, FlowNode, FlowchartDescription,
};
use vizier_core::geometry::{Point, Size};
use vizier_core::scene::{
    EllipseShape, Line, PolygonShape, Primitive, RectShape, Scene, Stroke, TextSpan, VectorCanvas,
};

use crate::config::{EngineConfig, FlowchartMetrics};
use crate::layout::grid::{self, NodeShape};
use crate::render::{self, DiagramRenderer};

pub struct FlowchartRenderer;

impl DiagramRenderer for FlowchartRenderer {
    fn kind(&self) -> &'static str {
        "flowchart"
    }

    fn render(
        &self,
        description: &DiagramDescription,
        config: &EngineConfig,
        scene: &mut Scene,
    ) -> Result<(), DescriptionError> {
        let DiagramDescription::Flowchart(flowchart) = description else {
            return Err(render::tag_mismatch(description, self));
        };
        render_flowchart(flowchart, config, scene)
    }
}

fn render_flowchart(
    flowchart: &FlowchartDescription,
    config: &EngineConfig,
    scene: &mut Scene,
) -> Result<(), DescriptionError> {
    if flowchart.nodes.is_empty() {
        return Err(DescriptionError::Empty {
            diagram: "flowchart",
            what: "nodes",
        });
    }

    let palette = config.palette();
    let metrics = &config.metrics().flowchart;
    let background = render::role_or(flowchart.style.background_color(), palette.surface())?;
    let line_color = palette.line();

    let mut canvas = VectorCanvas::new(Size::new(metrics.width, metrics.height));
    canvas.set_background(Some(background));

    // Connectors below nodes.
    for connector in grid::route(&flowchart.nodes, &flowchart.connections, metrics)? {
        canvas.push(Primitive::Line(Line {
            from: connector.from,
            to: connector.to,
            stroke: Stroke::new(line_color, 2.0),
            marker_end: Some(line_color),
        }));
        if let Some(label) = connector.label {
            canvas.push(Primitive::Text(TextSpan::centered(
                connector.label_pos,
                &label,
                render::small_font(),
                palette.text(),
            )));
        }
    }

    for node in &flowchart.nodes {
        let fill = render::role_or(
            flowchart.style.node_color_for(node.kind.name()),
            palette.flow_node(),
        )?;
        let outline = Stroke::new(palette.surface(), 2.0);
        canvas.push(node_shape(node, metrics, fill, outline));
        canvas.push(Primitive::Text(TextSpan::centered(
            Point::new(node.x, node.y),
            &node.label,
            render::body_font().bold(),
            palette.surface(),
        )));
    }

    scene.push_canvas(canvas);
    Ok(())
}

fn node_shape(
    node: &FlowNode,
    metrics: &FlowchartMetrics,
    fill: vizier_core::color::Color,
    stroke: Stroke,
) -> Primitive {
    let center = Point::new(node.x, node.y);
    match grid::shape_for(node.kind) {
        NodeShape::Ellipse => Primitive::Ellipse(EllipseShape {
            center,
            rx: metrics.ellipse_rx,
            ry: metrics.ellipse_ry,
            fill: Some(fill),
            stroke: Some(stroke),
        }),
        NodeShape::Diamond => Primitive::Polygon(PolygonShape {
            points: vec![
                Point::new(node.x - metrics.diamond_half_width, node.y),
                Point::new(node.x, node.y - metrics.diamond_half_height),
                Point::new(node.x + metrics.diamond_half_width, node.y),
                Point::new(node.x, node.y + metrics.diamond_half_height),
            ],
            fill: Some(fill),
            fill_opacity: None,
            stroke: Some(stroke),
        }),
        NodeShape::RoundedRect => Primitive::Rect(RectShape {
            bounds: center.to_bounds(Size::new(metrics.process_width, metrics.process_height)),
            corner_radius: metrics.process_corner_radius,
            fill: Some(fill),
            stroke: Some(stroke),
        }),
    }
}
