//! Timeline renderer: alternating event cards along a central spine.
//!
//! Cards are styled panels with entry animations and hover transitions; the
//! spine, end caps and numbered dots are a vector overlay. The container
//! panel carries the timeline marker the export pipeline keys off.

use vizier_core::description::{DescriptionError, DiagramDescription, TimelineDescription};
use vizier_core::geometry::{Bounds, Point, Size};
use vizier_core::scene::{
    BoxStyle, CircleShape, Line, Marker, Panel, Primitive, Scene, Stroke, TextBlock, TextSpan,
    Transient, VectorCanvas,
};
use vizier_core::text::{self, FontSpec};

use crate::config::EngineConfig;
use crate::layout::timeline as layout;
use crate::render::{self, DiagramRenderer};

pub struct TimelineRenderer;

impl DiagramRenderer for TimelineRenderer {
    fn kind(&self) -> &'static str {
        "timeline"
    }

    fn render(
        &self,
        description: &DiagramDescription,
        config: &EngineConfig,
        scene: &mut Scene,
    ) -> Result<(), DescriptionError> {
        let DiagramDescription::Timeline(timeline) = description else {
            return Err(render::tag_mismatch(description, self));
        };
        render_timeline(timeline, config, scene)
    }
}

fn render_timeline(
    timeline: &TimelineDescription,
    config: &EngineConfig,
    scene: &mut Scene,
) -> Result<(), DescriptionError> {
    if timeline.events.is_empty() {
        return Err(DescriptionError::Empty {
            diagram: "timeline",
            what: "events",
        });
    }

    let palette = config.palette();
    let metrics = &config.metrics().timeline;
    let layout = layout::layout(timeline.events.len(), metrics);

    let line_color = render::role_or(timeline.style.line_color(), palette.line())?;
    let event_color = render::role_or(timeline.style.event_color(), line_color)?;
    let text_color = render::role_or(timeline.style.text_color(), palette.heading())?;

    let mut container = Panel::new(Bounds::from_origin_size(Point::default(), layout.size));
    container.style = BoxStyle::filled(palette.surface(), 12.0);
    container.marker = Some(Marker::Timeline);

    if let Some(title) = &timeline.title {
        container.push_text(TextBlock::centered(
            Point::new(layout.size.width() / 2.0, metrics.padding),
            title,
            render::heading_font(),
            palette.heading(),
        ));
    }

    for (slot, event) in layout.slots.iter().zip(&timeline.events) {
        // Connector stub from the card edge to the spine.
        let mut connector = Panel::new(slot.connector);
        connector.style = BoxStyle::filled(event_color, 1.0);
        container.push_panel(connector);

        container.push_panel(event_card(slot, event, config, event_color, text_color));
    }

    // Spine, caps and numbered dots paint over the cards' connectors.
    container.push_canvas(
        Point::default(),
        spine_overlay(&layout, line_color, event_color, palette.surface(), metrics),
    );

    scene.push_panel(container);
    Ok(())
}

fn event_card(
    slot: &layout::EventSlot,
    event: &vizier_core::description::TimelineEvent,
    config: &EngineConfig,
    event_color: vizier_core::color::Color,
    text_color: vizier_core::color::Color,
) -> Panel {
    let palette = config.palette();
    let padding = 15.0;
    let card = slot.card;

    let mut panel = Panel::new(card);
    panel.style = BoxStyle::outlined(palette.surface(), Stroke::new(event_color, 2.0), 12.0);
    // Staggered entry plus hover lift, stripped again before export.
    panel.transient = Transient::slide_in_up(slot.index as f32 * 0.2);
    panel.transient.merge(Transient::hover_lift());

    let date_font = FontSpec::new("Arial", 13.0).bold();
    let date_width = text::measure(&event.date, &date_font).width() + 24.0;
    let pill_origin = Point::new(card.min_x() + padding, card.min_y() + padding);
    let mut pill = Panel::new(Bounds::from_origin_size(
        pill_origin,
        Size::new(date_width, 24.0),
    ));
    pill.style = BoxStyle::filled(event_color, 12.0);
    pill.push_text(TextBlock::centered(
        Point::new(pill_origin.x() + date_width / 2.0, pill_origin.y() + 4.0),
        &event.date,
        date_font,
        palette.surface(),
    ));
    panel.push_panel(pill);

    panel.push_text(TextBlock::new(
        Point::new(card.min_x() + padding, card.min_y() + padding + 32.0),
        vec![event.title.clone()],
        FontSpec::new("Arial", 16.0).bold(),
        text_color,
    ));

    let body_font = FontSpec::new("Arial", 13.0);
    let mut lines = text::wrap(
        &event.description,
        card.width() - 2.0 * padding,
        &body_font,
    );
    lines.truncate(2);
    if !lines.is_empty() {
        panel.push_text(TextBlock::new(
            Point::new(card.min_x() + padding, card.min_y() + padding + 58.0),
            lines,
            body_font,
            palette.muted_text(),
        ));
    }

    panel
}

fn spine_overlay(
    layout: &layout::Layout,
    line_color: vizier_core::color::Color,
    event_color: vizier_core::color::Color,
    surface: vizier_core::color::Color,
    metrics: &crate::config::TimelineMetrics,
) -> VectorCanvas {
    let mut canvas = VectorCanvas::new(layout.size);

    canvas.push(Primitive::Line(Line {
        from: Point::new(layout.spine_x, layout.spine_top),
        to: Point::new(layout.spine_x, layout.spine_bottom),
        stroke: Stroke::new(line_color, 4.0),
        marker_end: None,
    }));

    // End caps.
    for y in [layout.spine_top, layout.spine_bottom] {
        canvas.push(Primitive::Circle(CircleShape {
            center: Point::new(layout.spine_x, y),
            radius: 6.0,
            fill: Some(line_color),
            stroke: Some(Stroke::new(surface, 3.0)),
        }));
    }

    let number_font = FontSpec::new("Arial", 10.0).bold();
    for slot in &layout.slots {
        canvas.push(Primitive::Circle(CircleShape {
            center: slot.dot_center,
            radius: metrics.dot_radius,
            fill: Some(event_color),
            stroke: Some(Stroke::new(surface, 4.0)),
        }));
        canvas.push(Primitive::Text(TextSpan::centered(
            slot.dot_center,
            &(slot.index + 1).to_string(),
            number_font.clone(),
            surface,
        )));
    }

    canvas
}

#[cfg(test)]
mod tests {
    use vizier_core::scene::{PanelNode, SceneNode};

    use super::*;

    fn sample() -> DiagramDescription {
        serde_json::from_str(
            r##"{
                "type": "timeline",
                "title": "History",
                "events": [
                    {"date": "2019", "title": "Founding", "description": "The beginning of it all"},
                    {"date": "2021", "title": "Growth", "description": "Scaling up"},
                    {"date": "2024", "title": "Today", "description": "Where we are now"}
                ],
                "style": {"lineColor": "#666", "eventColor": "#e74c3c"}
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn test_container_is_marked_timeline() {
        let mut scene = Scene::new();
        TimelineRenderer
            .render(&sample(), &EngineConfig::without_delays(), &mut scene)
            .unwrap();

        assert!(scene.has_box_marker());
        assert!(scene.sole_vector_canvas().is_none());
        match &scene.nodes()[0] {
            SceneNode::Panel(panel) => assert_eq!(panel.marker, Some(Marker::Timeline)),
            other => panic!("unexpected node: {other:?}"),
        }
    }

    #[test]
    fn test_cards_carry_entry_animation() {
        let mut scene = Scene::new();
        TimelineRenderer
            .render(&sample(), &EngineConfig::without_delays(), &mut scene)
            .unwrap();

        let SceneNode::Panel(container) = &scene.nodes()[0] else {
            panic!("expected a panel container");
        };
        let animated = container
            .children
            .iter()
            .filter(|child| match child {
                PanelNode::Panel(panel) => panel.transient.entry.is_some(),
                _ => false,
            })
            .count();
        assert_eq!(animated, 3, "each event card animates in");
    }

    #[test]
    fn test_dots_numbered_one_based() {
        let mut scene = Scene::new();
        TimelineRenderer
            .render(&sample(), &EngineConfig::without_delays(), &mut scene)
            .unwrap();
        // 3 dots + 2 caps; 3 number labels.
        let census = scene.primitive_census();
        assert_eq!(census.get("circle"), Some(&5));
        assert_eq!(census.get("text"), Some(&3));
    }

    #[test]
    fn test_empty_events_rejected() {
        let description: DiagramDescription =
            serde_json::from_str(r#"{"type": "timeline", "events": []}"#).unwrap();
        let mut scene = Scene::new();
        let err = TimelineRenderer
            .render(&description, &EngineConfig::without_delays(), &mut scene)
            .unwrap_err();
        assert!(matches!(err, DescriptionError::Empty { .. }));
    }
}
