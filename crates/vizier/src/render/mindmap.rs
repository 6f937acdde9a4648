//! Mindmap renderer: a single vector canvas of circles and spokes.

use vizier_core::color::Color;
use vizier_core::description::{DescriptionError, DiagramDescription, MindmapDescription};
use vizier_core::geometry::{Point, Size};
use vizier_core::scene::{CircleShape, Line, Primitive, Scene, Stroke, TextSpan, VectorCanvas};
use vizier_core::text::FontSpec;

use crate::config::EngineConfig;
use crate::layout::radial;
use crate::render::{self, DiagramRenderer};

pub struct MindmapRenderer;

impl DiagramRenderer for MindmapRenderer {
    fn kind(&self) -> &'static str {
        "mindmap"
    }

    fn render(
        &self,
        description: &DiagramDescription,
        config: &EngineConfig,
        scene: &mut Scene,
    ) -> Result<(), DescriptionError> {
        let DiagramDescription::Mindmap(mindmap) = description else {
            return Err(render::tag_mismatch(description, self));
        };
        render_mindmap(mindmap, config, scene)
    }
}

fn render_mindmap(
    mindmap: &MindmapDescription,
    config: &EngineConfig,
    scene: &mut Scene,
) -> Result<(), DescriptionError> {
    let palette = config.palette();
    let metrics = &config.metrics().mindmap;
    let layout = radial::layout(mindmap)?;

    let node_color = render::role_or(mindmap.style.node_color(), palette.node())?;
    let line_color = render::role_or(mindmap.style.line_color(), palette.line())?;
    let background = render::role_or(mindmap.style.background_color(), palette.background())?;
    let label_color = palette.surface();

    let mut canvas = VectorCanvas::new(Size::new(metrics.width, metrics.height));
    canvas.set_background(Some(background));

    // Spokes first so nodes paint over them.
    for (index, connection) in mindmap.connections.iter().enumerate() {
        let from = layout.endpoint_or_center(connection.from);
        let to = layout.nodes.get(&connection.to).copied().ok_or_else(|| {
            DescriptionError::UnknownEndpoint {
                index,
                id: connection.to.resolve(),
            }
        })?;

        canvas.push(Primitive::Line(Line {
            from,
            to,
            stroke: Stroke::new(line_color, 2.0),
            marker_end: None,
        }));
    }

    push_node(
        &mut canvas,
        layout.center,
        metrics.center_radius,
        &mindmap.center_node.label,
        node_color,
        label_color,
        14.0,
    );

    for node in &mindmap.nodes {
        let position = layout.nodes[&node.id];
        push_node(
            &mut canvas,
            position,
            metrics.node_radius,
            &node.label,
            node_color,
            label_color,
            12.0,
        );
    }

    scene.push_canvas(canvas);
    Ok(())
}

fn push_node(
    canvas: &mut VectorCanvas,
    center: Point,
    radius: f32,
    label: &str,
    fill: Color,
    label_color: Color,
    font_size: f32,
) {
    canvas.push(Primitive::Circle(CircleShape {
        center,
        radius,
        fill: Some(fill),
        stroke: Some(Stroke::new(label_color, 2.0)),
    }));
    canvas.push(Primitive::Text(TextSpan::centered(
        center,
        label,
        FontSpec::new("Arial", font_size).bold(),
        label_color,
    )));
}
