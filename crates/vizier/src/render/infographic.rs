//! Infographic renderer: stacked sections inside one column.

use vizier_core::description::{
    DescriptionError, DiagramDescription, InfographicDescription, Section,
};
use vizier_core::geometry::{Bounds, Point, Size};
use vizier_core::scene::{BoxStyle, Marker, Panel, Scene, TextAnchor, TextBlock};
use vizier_core::text::FontSpec;

use crate::config::{EngineConfig, InfographicMetrics};
use crate::layout::stack;
use crate::render::{self, DiagramRenderer};

pub struct InfographicRenderer;

impl DiagramRenderer for InfographicRenderer {
    fn kind(&self) -> &'static str {
        "infographic"
    }

    fn render(
        &self,
        description: &DiagramDescription,
        config: &EngineConfig,
        scene: &mut Scene,
    ) -> Result<(), DescriptionError> {
        let DiagramDescription::Infographic(infographic) = description else {
            return Err(render::tag_mismatch(description, self));
        };
        render_infographic(infographic, config, scene)
    }
}

fn render_infographic(
    infographic: &InfographicDescription,
    config: &EngineConfig,
    scene: &mut Scene,
) -> Result<(), DescriptionError> {
    if infographic.sections.is_empty() {
        return Err(DescriptionError::Empty {
            diagram: "infographic",
            what: "sections",
        });
    }

    let palette = config.palette();
    let metrics = &config.metrics().infographic;
    let body_font = render::body_font();
    let layout = stack::layout(&infographic.sections, metrics, &body_font);

    let primary = render::role_or(infographic.style.primary_color(), palette.primary())?;
    let surface_tint = render::role_or(infographic.style.secondary_color(), palette.secondary())?;
    let accent = render::role_or(infographic.style.accent_color(), palette.accent())?;

    let mut container = Panel::new(Bounds::from_origin_size(Point::default(), layout.size));
    container.style = BoxStyle::filled(surface_tint, 12.0);
    container.marker = Some(Marker::Infographic);

    for (section, slot) in infographic.sections.iter().zip(&layout.slots) {
        match section {
            Section::Header { content, style } => {
                let fill = render::role_or(style.background_color(), accent)?;
                let text_color = render::role_or(style.color(), palette.surface())?;
                let mut header = Panel::new(slot.bounds);
                header.style = BoxStyle::filled(fill, 0.0);
                header.push_text(TextBlock::centered(
                    Point::new(slot.bounds.center().x(), slot.bounds.min_y() + 20.0),
                    content,
                    render::heading_font(),
                    text_color,
                ));
                container.push_panel(header);
            }
            Section::Stats { items } => {
                for (item, cell) in items.iter().zip(stack::stats_grid(
                    items.len(),
                    slot.bounds,
                    metrics,
                )) {
                    container.push_panel(stat_tile(item, cell, primary, config));
                }
            }
            Section::Chart { chart_type, data } => {
                if stack::chart_renders_rows(*chart_type) {
                    for (index, datum) in data.iter().enumerate() {
                        push_chart_row(
                            &mut container,
                            datum,
                            slot.bounds,
                            index,
                            primary,
                            config,
                            metrics,
                        );
                    }
                }
            }
            Section::Text { content: _ } => {
                let inner = Bounds::from_origin_size(
                    Point::new(
                        slot.bounds.min_x() + metrics.section_padding,
                        slot.bounds.min_y() + metrics.section_padding,
                    ),
                    Size::new(
                        slot.bounds.width() - 2.0 * metrics.section_padding,
                        slot.bounds.height() - 2.0 * metrics.section_padding,
                    ),
                );
                let mut block = Panel::new(inner);
                block.style = BoxStyle::filled(palette.surface(), 8.0);
                block.push_text(TextBlock::new(
                    Point::new(
                        inner.min_x() + metrics.section_padding,
                        inner.min_y() + metrics.section_padding,
                    ),
                    slot.text_lines.clone(),
                    body_font.clone(),
                    palette.text(),
                ));
                container.push_panel(block);
            }
            Section::Unknown => {
                container.push_text(TextBlock::new(
                    Point::new(
                        slot.bounds.min_x() + metrics.section_padding,
                        slot.bounds.min_y() + metrics.section_padding,
                    ),
                    vec!["Unrecognized section kind".to_string()],
                    body_font.clone(),
                    palette.muted_text(),
                ));
            }
        }
    }

    scene.push_panel(container);
    Ok(())
}

fn stat_tile(
    item: &vizier_core::description::StatItem,
    cell: Bounds,
    primary: vizier_core::color::Color,
    config: &EngineConfig,
) -> Panel {
    let palette = config.palette();
    let mut tile = Panel::new(cell);
    tile.style = BoxStyle::filled(palette.surface(), 8.0);

    let value = match &item.unit {
        Some(unit) => format!("{} {unit}", item.value),
        None => item.value.to_string(),
    };
    tile.push_text(TextBlock::centered(
        Point::new(cell.center().x(), cell.min_y() + 16.0),
        &value,
        FontSpec::new("Arial", 32.0).bold(),
        primary,
    ));
    tile.push_text(TextBlock::centered(
        Point::new(cell.center().x(), cell.max_y() - 30.0),
        &item.label,
        render::body_font(),
        palette.muted_text(),
    ));
    tile
}

fn push_chart_row(
    container: &mut Panel,
    datum: &vizier_core::description::ChartDatum,
    band: Bounds,
    index: usize,
    primary: vizier_core::color::Color,
    config: &EngineConfig,
    metrics: &InfographicMetrics,
) {
    let palette = config.palette();
    let row_top = band.min_y() + metrics.section_padding + index as f32 * metrics.chart_row_height;
    let inner_x = band.min_x() + metrics.section_padding;
    let inner_width = band.width() - 2.0 * metrics.section_padding;

    container.push_text(TextBlock::new(
        Point::new(inner_x, row_top),
        vec![datum.label.clone()],
        render::body_font().bold(),
        palette.text(),
    ));
    let mut percent = TextBlock::new(
        Point::new(inner_x + inner_width, row_top),
        vec![format!("{}%", datum.value)],
        render::body_font(),
        palette.text(),
    );
    percent.anchor = TextAnchor::End;
    container.push_text(percent);

    let track_bounds = Bounds::from_origin_size(
        Point::new(inner_x, row_top + 20.0),
        Size::new(inner_width, 24.0),
    );
    let mut track = Panel::new(track_bounds);
    track.style = BoxStyle::filled(palette.track(), 12.0);
    let fraction = (datum.value / 100.0).clamp(0.0, 1.0);
    let mut fill = Panel::new(Bounds::from_origin_size(
        track_bounds.min_point(),
        Size::new(inner_width * fraction, 24.0),
    ));
    fill.style = BoxStyle::filled(primary, 12.0);
    track.push_panel(fill);
    container.push_panel(track);
}
