//! Hierarchy renderer: level-grid of rounded nodes joined by S-curves.

use vizier_core::description::{DescriptionError, DiagramDescription, HierarchyDescription};
use vizier_core::geometry::{Point, Size};
use vizier_core::scene::{
    CircleShape, PathShape, Primitive, RectShape, Scene, Stroke, TextAnchor, TextSpan, VectorCanvas,
};
use vizier_core::text::{self, FontSpec};

use crate::config::EngineConfig;
use crate::layout::levels;
use crate::render::{self, DiagramRenderer};

pub struct HierarchyRenderer;

impl DiagramRenderer for HierarchyRenderer {
    fn kind(&self) -> &'static str {
        "hierarchy"
    }

    fn render(
        &self,
        description: &DiagramDescription,
        config: &EngineConfig,
        scene: &mut Scene,
    ) -> Result<(), DescriptionError> {
        let DiagramDescription::Hierarchy(hierarchy) = description else {
            return Err(render::tag_mismatch(description, self));
        };
        render_hierarchy(hierarchy, config, scene)
    }
}

/// A vertical cubic with both control points on the midline, producing the
/// smooth S between a parent's bottom edge and a child's top edge.
fn s_curve(from: Point, to: Point) -> String {
    let mid_y = (from.y() + to.y()) / 2.0;
    format!(
        "M {} {} C {} {} {} {} {} {}",
        from.x(),
        from.y(),
        from.x(),
        mid_y,
        to.x(),
        mid_y,
        to.x(),
        to.y()
    )
}

fn render_hierarchy(
    hierarchy: &HierarchyDescription,
    config: &EngineConfig,
    scene: &mut Scene,
) -> Result<(), DescriptionError> {
    let palette = config.palette();
    let metrics = &config.metrics().hierarchy;
    let layout = levels::layout(&hierarchy.nodes, metrics)?;

    let line_color = render::role_or(hierarchy.style.line_color(), palette.line())?;
    let level_zero = hierarchy.style.node_color()?;

    let title_offset = if hierarchy.title.is_some() {
        metrics.title_height
    } else {
        0.0
    };
    let origin = Point::new(metrics.canvas_padding / 2.0, title_offset);

    let mut canvas = VectorCanvas::new(Size::new(
        layout.size.width() + metrics.canvas_padding,
        layout.size.height() + title_offset,
    ));
    canvas.set_background(Some(palette.surface()));

    if let Some(title) = &hierarchy.title {
        canvas.push(Primitive::Text(TextSpan::centered(
            Point::new(canvas.size().width() / 2.0, metrics.title_height / 2.0),
            title,
            render::heading_font(),
            palette.heading(),
        )));
    }

    // Connections first so nodes paint over curve ends.
    for (index, connection) in hierarchy.effective_connections().iter().enumerate() {
        let from =
            layout
                .get(connection.from)
                .ok_or_else(|| DescriptionError::UnknownEndpoint {
                    index,
                    id: connection.from.resolve(),
                })?;
        let to = layout
            .get(connection.to)
            .ok_or_else(|| DescriptionError::UnknownEndpoint {
                index,
                id: connection.to.resolve(),
            })?;

        canvas.push(Primitive::Path(PathShape {
            data: s_curve(
                from.bottom_anchor().add_point(origin),
                to.top_anchor().add_point(origin),
            ),
            stroke: Stroke::new(line_color, 2.0),
            fill: None,
            marker_end: Some(line_color),
        }));
    }

    let label_font = render::body_font().bold();
    let badge_font = FontSpec::new("Arial", 10.0).bold();

    for node in &hierarchy.nodes {
        let placed = layout.placements[&node.id];
        let center = placed.center.add_point(origin);
        let bounds = center.to_bounds(placed.size);
        let fill = palette.level_color(node.level, level_zero);

        canvas.push(Primitive::Rect(RectShape {
            bounds,
            corner_radius: 12.0,
            fill: Some(fill),
            stroke: Some(Stroke::new(palette.surface(), 3.0)),
        }));

        let lines = text::wrap_label(&node.label, placed.size.width() - 16.0, &label_font);
        canvas.push(Primitive::Text(TextSpan {
            position: center,
            lines,
            font: label_font.clone(),
            color: palette.surface(),
            anchor: TextAnchor::Middle,
        }));

        // Level badge in the node's top-right corner.
        let badge_center = Point::new(bounds.max_x() - 15.0, bounds.min_y() + 15.0);
        canvas.push(Primitive::Circle(CircleShape {
            center: badge_center,
            radius: 12.0,
            fill: Some(palette.surface()),
            stroke: Some(Stroke::new(fill, 2.0)),
        }));
        canvas.push(Primitive::Text(TextSpan::centered(
            badge_center,
            &format!("L{}", node.level),
            badge_font.clone(),
            fill,
        )));
    }

    scene.push_canvas(canvas);
    Ok(())
}
