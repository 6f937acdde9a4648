//! Comparison renderer: item cards in a responsive grid, with a radar chart
//! overlay when exactly two items are compared.
//!
//! Cards are styled panels (animated, hover-lifted); the radar chart is a
//! vector canvas embedded in its own sub-panel. The container carries the
//! comparison marker.
//!
//! When the two items' feature lists diverge, the radar plots each item
//! best-effort by index against the first item's axes: visually distorted,
//! never an error.

use vizier_core::color::Color;
use vizier_core::description::{
    ComparisonDescription, ComparisonItem, DescriptionError, DiagramDescription,
};
use vizier_core::geometry::{Bounds, Point, Size};
use vizier_core::scene::{
    BoxStyle, CircleShape, Line, Marker, Panel, PolygonShape, Primitive, Scene, Stroke, TextAnchor,
    TextBlock, TextSpan, Transient, VectorCanvas,
};
use vizier_core::text::{self, FontSpec};

use crate::config::{ComparisonMetrics, EngineConfig};
use crate::layout::comparison::{self as layout, RADAR_RINGS, RadarLayout};
use crate::render::{self, DiagramRenderer};

pub struct ComparisonRenderer;

impl DiagramRenderer for ComparisonRenderer {
    fn kind(&self) -> &'static str {
        "comparison"
    }

    fn render(
        &self,
        description: &DiagramDescription,
        config: &EngineConfig,
        scene: &mut Scene,
    ) -> Result<(), DescriptionError> {
        let DiagramDescription::Comparison(comparison) = description else {
            return Err(render::tag_mismatch(description, self));
        };
        render_comparison(comparison, config, scene)
    }
}

fn render_comparison(
    comparison: &ComparisonDescription,
    config: &EngineConfig,
    scene: &mut Scene,
) -> Result<(), DescriptionError> {
    if comparison.items.is_empty() {
        return Err(DescriptionError::Empty {
            diagram: "comparison",
            what: "items",
        });
    }

    let palette = config.palette();
    let metrics = &config.metrics().comparison;

    let overrides = [
        comparison.style.primary_color()?,
        comparison.style.secondary_color()?,
    ];

    let feature_counts: Vec<usize> = comparison
        .items
        .iter()
        .map(|item| item.features.len())
        .collect();
    let grid = layout::grid(&feature_counts, metrics);
    let radar = layout::radar(&comparison.items, metrics);

    let grid_top = metrics.header_height;
    let grid_bottom = grid_top + grid.size.height();

    let chart_block_height = radar.as_ref().map_or(0.0, |_| {
        40.0 + metrics.chart_height + metrics.legend_height + metrics.padding
    });
    let total = Size::new(
        metrics.width,
        grid_bottom + chart_block_height + metrics.padding,
    );

    let mut container = Panel::new(Bounds::from_origin_size(Point::default(), total));
    container.style = BoxStyle::filled(palette.surface(), 12.0);
    container.marker = Some(Marker::Comparison);

    if let Some(title) = &comparison.title {
        container.push_text(TextBlock::centered(
            Point::new(total.width() / 2.0, metrics.padding),
            title,
            render::heading_font(),
            palette.heading(),
        ));
    }

    for (index, (item, cell)) in comparison.items.iter().zip(&grid.cells).enumerate() {
        let color = palette.comparison_color(index, overrides);
        let cell = cell.translate(Point::new(0.0, grid_top));
        container.push_panel(item_card(item, index, cell, color, config, metrics));
    }

    if let Some(radar) = &radar {
        container.push_panel(chart_panel(
            comparison,
            radar,
            grid_bottom,
            overrides,
            config,
            metrics,
        ));
    }

    scene.push_panel(container);
    Ok(())
}

fn item_card(
    item: &ComparisonItem,
    index: usize,
    cell: Bounds,
    color: Color,
    config: &EngineConfig,
    metrics: &ComparisonMetrics,
) -> Panel {
    let palette = config.palette();

    let mut card = Panel::new(cell);
    card.style = BoxStyle::outlined(palette.surface(), Stroke::new(color, 3.0), 12.0);
    card.transient = Transient::slide_in_up(index as f32 * 0.3);
    card.transient.merge(Transient::hover_lift());

    // Title bar across the top of the card.
    let mut title_bar = Panel::new(Bounds::from_origin_size(
        cell.min_point(),
        Size::new(cell.width(), metrics.title_height),
    ));
    title_bar.style = BoxStyle::filled(color, 9.0);
    title_bar.push_text(TextBlock::centered(
        Point::new(cell.center().x(), cell.min_y() + 12.0),
        &item.title,
        FontSpec::new("Arial", 20.0).bold(),
        palette.surface(),
    ));
    card.push_panel(title_bar);

    let rows_top = cell.min_y() + metrics.title_height + metrics.card_padding;
    let row_width = cell.width() - 2.0 * metrics.card_padding;
    for (row_index, feature) in item.features.iter().enumerate() {
        let row_bounds = Bounds::from_origin_size(
            Point::new(
                cell.min_x() + metrics.card_padding,
                rows_top + row_index as f32 * metrics.feature_row_height,
            ),
            Size::new(row_width, metrics.feature_row_height - 8.0),
        );
        card.push_panel(feature_row(feature, row_bounds, color, palette));
    }

    // Overall mean score footer.
    let footer = Bounds::from_origin_size(
        Point::new(
            cell.min_x() + metrics.card_padding,
            cell.max_y() - metrics.card_padding - metrics.footer_height,
        ),
        Size::new(row_width, metrics.footer_height),
    );
    let mut footer_panel = Panel::new(footer);
    footer_panel.style = BoxStyle::filled(color, 8.0);
    footer_panel.push_text(TextBlock::centered(
        Point::new(footer.center().x(), footer.min_y() + 8.0),
        "Overall score",
        FontSpec::new("Arial", 14.0),
        palette.surface(),
    ));
    footer_panel.push_text(TextBlock::centered(
        Point::new(footer.center().x(), footer.min_y() + 28.0),
        &format!("{:.1}/10", item.overall_score()),
        render::heading_font(),
        palette.surface(),
    ));
    card.push_panel(footer_panel);

    card
}

fn feature_row(
    feature: &vizier_core::description::Feature,
    bounds: Bounds,
    color: Color,
    palette: &crate::config::Palette,
) -> Panel {
    let mut row = Panel::new(bounds);
    row.style = BoxStyle::filled(palette.secondary(), 8.0);

    // Accent strip along the left edge.
    let mut strip = Panel::new(Bounds::from_origin_size(
        bounds.min_point(),
        Size::new(4.0, bounds.height()),
    ));
    strip.style = BoxStyle::filled(color, 2.0);
    row.push_panel(strip);

    let text_y = bounds.min_y() + 8.0;
    row.push_text(TextBlock::new(
        Point::new(bounds.min_x() + 12.0, text_y),
        vec![feature.name.clone()],
        FontSpec::new("Arial", 13.0).bold(),
        palette.text(),
    ));
    if !feature.value.is_empty() {
        row.push_text(TextBlock::new(
            Point::new(bounds.min_x() + bounds.width() * 0.35, text_y),
            vec![feature.value.clone()],
            FontSpec::new("Arial", 12.0),
            palette.muted_text(),
        ));
    }

    // Score bar: a 60px track whose fill width is score * 10%.
    let track_bounds = Bounds::from_origin_size(
        Point::new(bounds.max_x() - 110.0, bounds.center().y() - 4.0),
        Size::new(60.0, 8.0),
    );
    let mut track = Panel::new(track_bounds);
    track.style = BoxStyle::filled(palette.track(), 4.0);
    let clamped = feature.score.clamp(0.0, 10.0);
    let mut fill = Panel::new(Bounds::from_origin_size(
        track_bounds.min_point(),
        Size::new(60.0 * clamped / 10.0, 8.0),
    ));
    fill.style = BoxStyle::filled(color, 4.0);
    track.push_panel(fill);
    row.push_panel(track);

    let mut score_text = TextBlock::new(
        Point::new(bounds.max_x() - 12.0, text_y),
        vec![format!("{}/10", feature.score)],
        FontSpec::new("Arial", 12.0).bold(),
        color,
    );
    score_text.anchor = TextAnchor::End;
    row.push_text(score_text);

    row
}

fn chart_panel(
    comparison: &ComparisonDescription,
    radar: &RadarLayout,
    grid_bottom: f32,
    overrides: [Option<Color>; 2],
    config: &EngineConfig,
    metrics: &ComparisonMetrics,
) -> Panel {
    let palette = config.palette();

    let block = Bounds::from_origin_size(
        Point::new(metrics.padding, grid_bottom + metrics.padding / 2.0),
        Size::new(
            metrics.width - 2.0 * metrics.padding,
            40.0 + metrics.chart_height + metrics.legend_height,
        ),
    );
    let mut panel = Panel::new(block);
    panel.style = BoxStyle::filled(palette.secondary(), 12.0);

    panel.push_text(TextBlock::centered(
        Point::new(block.center().x(), block.min_y() + 10.0),
        "Feature comparison radar",
        render::subheading_font(),
        palette.heading(),
    ));

    let canvas_origin = Point::new(
        block.center().x() - metrics.chart_width / 2.0,
        block.min_y() + 40.0,
    );
    panel.push_canvas(canvas_origin, radar_canvas(radar, overrides, config, metrics));

    // Legend row under the chart.
    let legend_font = FontSpec::new("Arial", 13.0).bold();
    let legend_y = block.max_y() - metrics.legend_height + 8.0;
    let swatch = 20.0;
    let gap = 30.0;
    let entry_widths: Vec<f32> = comparison
        .items
        .iter()
        .map(|item| swatch + 8.0 + text::measure(&item.title, &legend_font).width())
        .collect();
    let total_width: f32 =
        entry_widths.iter().sum::<f32>() + gap * (comparison.items.len() - 1) as f32;
    let mut x = block.center().x() - total_width / 2.0;

    for (index, item) in comparison.items.iter().enumerate() {
        let color = palette.comparison_color(index, overrides);
        let mut box_panel = Panel::new(Bounds::from_origin_size(
            Point::new(x, legend_y),
            Size::new(swatch, swatch),
        ));
        box_panel.style = BoxStyle::filled(color, 3.0);
        panel.push_panel(box_panel);
        panel.push_text(TextBlock::new(
            Point::new(x + swatch + 8.0, legend_y + 2.0),
            vec![item.title.clone()],
            legend_font.clone(),
            palette.text(),
        ));
        x += entry_widths[index] + gap;
    }

    panel
}

fn radar_canvas(
    radar: &RadarLayout,
    overrides: [Option<Color>; 2],
    config: &EngineConfig,
    metrics: &ComparisonMetrics,
) -> VectorCanvas {
    let palette = config.palette();
    let mut canvas = VectorCanvas::new(Size::new(metrics.chart_width, metrics.chart_height));

    // Concentric guide rings.
    for ring in 1..=RADAR_RINGS {
        canvas.push(Primitive::Circle(CircleShape {
            center: radar.center,
            radius: radar.radius * ring as f32 / RADAR_RINGS as f32,
            fill: None,
            stroke: Some(Stroke::new(palette.grid_line(), 1.0)),
        }));
    }

    // Axes with labels just beyond the rim.
    for axis in &radar.axes {
        canvas.push(Primitive::Line(Line {
            from: radar.center,
            to: axis.end,
            stroke: Stroke::new(palette.grid_line(), 1.0),
            marker_end: None,
        }));
        canvas.push(Primitive::Text(TextSpan::centered(
            axis.label_pos,
            &axis.label,
            render::small_font(),
            palette.text(),
        )));
    }

    // Translucent scored polygons, then their data points.
    for (index, points) in radar.polygons.iter().enumerate() {
        let color = palette.comparison_color(index, overrides);
        canvas.push(Primitive::Polygon(PolygonShape {
            points: points.clone(),
            fill: Some(color),
            fill_opacity: Some(0.3),
            stroke: Some(Stroke::new(color, 2.0)),
        }));
        for &point in points {
            canvas.push(Primitive::Circle(CircleShape {
                center: point,
                radius: 4.0,
                fill: Some(color),
                stroke: None,
            }));
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use vizier_core::scene::SceneNode;

    use super::*;

    fn sample(items: usize) -> DiagramDescription {
        let item = |id: &str, scores: [f32; 3]| {
            format!(
                r#"{{"id": "{id}", "title": "{id}", "features": [
                    {{"name": "speed", "value": "fast", "score": {}}},
                    {{"name": "price", "value": "low", "score": {}}},
                    {{"name": "quality", "value": "good", "score": {}}}
                ]}}"#,
                scores[0], scores[1], scores[2]
            )
        };
        let all: Vec<String> = (0..items)
            .map(|i| item(&format!("item{i}"), [8.0, 6.0, 9.0]))
            .collect();
        serde_json::from_str(&format!(
            r#"{{"type": "comparison", "title": "Face-off", "items": [{}]}}"#,
            all.join(",")
        ))
        .unwrap()
    }

    #[test]
    fn test_two_items_get_radar_overlay() {
        let mut scene = Scene::new();
        ComparisonRenderer
            .render(&sample(2), &EngineConfig::without_delays(), &mut scene)
            .unwrap();

        assert!(scene.has_box_marker());
        let census = scene.primitive_census();
        // Two translucent polygons plus the decision-free canvas exists.
        assert_eq!(census.get("polygon"), Some(&2));
        assert_eq!(census.get("canvas"), Some(&1));
        // 5 rings + 3*2 data point dots.
        assert_eq!(census.get("circle"), Some(&(5 + 6)));
    }

    #[test]
    fn test_three_items_have_no_radar() {
        let mut scene = Scene::new();
        ComparisonRenderer
            .render(&sample(3), &EngineConfig::without_delays(), &mut scene)
            .unwrap();
        let census = scene.primitive_census();
        assert_eq!(census.get("canvas"), None);
        assert_eq!(census.get("polygon"), None);
    }

    #[test]
    fn test_marker_is_comparison() {
        let mut scene = Scene::new();
        ComparisonRenderer
            .render(&sample(2), &EngineConfig::without_delays(), &mut scene)
            .unwrap();
        match &scene.nodes()[0] {
            SceneNode::Panel(panel) => assert_eq!(panel.marker, Some(Marker::Comparison)),
            other => panic!("unexpected node: {other:?}"),
        }
    }

    #[test]
    fn test_empty_items_rejected() {
        let description: DiagramDescription =
            serde_json::from_str(r#"{"type": "comparison", "items": []}"#).unwrap();
        let mut scene = Scene::new();
        let err = ComparisonRenderer
            .render(&description, &EngineConfig::without_delays(), &mut scene)
            .unwrap_err();
        assert!(matches!(err, DescriptionError::Empty { .. }));
    }

    #[test]
    fn test_divergent_feature_sets_render_without_error() {
        let description: DiagramDescription = serde_json::from_str(
            r#"{"type": "comparison", "items": [
                {"id": "a", "title": "A", "features": [
                    {"name": "x", "value": "", "score": 5}
                ]},
                {"id": "b", "title": "B", "features": [
                    {"name": "x", "value": "", "score": 5},
                    {"name": "y", "value": "", "score": 7}
                ]}
            ]}"#,
        )
        .unwrap();
        let mut scene = Scene::new();
        ComparisonRenderer
            .render(&description, &EngineConfig::without_delays(), &mut scene)
            .unwrap();
        assert!(scene.has_box_marker());
    }
}
