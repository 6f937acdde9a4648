//! Stacked-section layout for infographics.
//!
//! Sections are laid out top-to-bottom in input order inside one column.
//! Stats and chart sections sub-lay their items into a responsive grid /
//! fixed-height rows; text sections take the height of their wrapped lines.

use vizier_core::description::Section;
use vizier_core::geometry::{Bounds, Point, Size};
use vizier_core::text::{self, FontSpec};

use crate::config::InfographicMetrics;

/// The vertical band assigned to one section.
#[derive(Debug, Clone)]
pub struct SectionSlot {
    pub bounds: Bounds,
    /// Wrapped lines for text sections, empty otherwise.
    pub text_lines: Vec<String>,
}

/// The computed infographic layout.
#[derive(Debug, Clone)]
pub struct Layout {
    pub slots: Vec<SectionSlot>,
    pub size: Size,
}

/// Computes the vertical band for each section.
///
/// `body_font` sizes text sections; wrapping is part of layout so the
/// reported height matches what the renderer will draw.
pub fn layout(sections: &[Section], metrics: &InfographicMetrics, body_font: &FontSpec) -> Layout {
    let inner_width = metrics.width - 2.0 * metrics.section_padding;

    let mut slots = Vec::with_capacity(sections.len());
    let mut y = 0.0_f32;

    for section in sections {
        let mut text_lines = Vec::new();
        let height = match section {
            Section::Header { .. } => metrics.header_height,
            Section::Stats { items } => {
                let rows = stats_rows(items.len(), inner_width, metrics);
                rows as f32 * (metrics.stat_height + metrics.grid_gap) - metrics.grid_gap
                    + 2.0 * metrics.section_padding
            }
            Section::Chart { data, chart_type } => {
                let rows = if chart_renders_rows(*chart_type) {
                    data.len()
                } else {
                    0
                };
                rows as f32 * metrics.chart_row_height + 2.0 * metrics.section_padding
            }
            Section::Text { content } => {
                text_lines = text::wrap(content, inner_width - 2.0 * metrics.section_padding, body_font);
                text_lines.len().max(1) as f32 * metrics.text_line_height
                    + 4.0 * metrics.section_padding
            }
            Section::Unknown => metrics.notice_height,
        };

        slots.push(SectionSlot {
            bounds: Bounds::from_origin_size(
                Point::new(0.0, y),
                Size::new(metrics.width, height),
            ),
            text_lines,
        });
        y += height;
    }

    Layout {
        slots,
        size: Size::new(metrics.width, y),
    }
}

/// Number of grid columns stat tiles fit into.
pub fn stats_columns(count: usize, inner_width: f32, metrics: &InfographicMetrics) -> usize {
    let fit = ((inner_width + metrics.grid_gap) / (metrics.stat_min_width + metrics.grid_gap))
        as usize;
    fit.clamp(1, count.max(1))
}

fn stats_rows(count: usize, inner_width: f32, metrics: &InfographicMetrics) -> usize {
    count.div_ceil(stats_columns(count, inner_width, metrics)).max(1)
}

/// Cell bounds for stat tiles inside a stats section band.
pub fn stats_grid(
    count: usize,
    band: Bounds,
    metrics: &InfographicMetrics,
) -> Vec<Bounds> {
    let inner_width = band.width() - 2.0 * metrics.section_padding;
    let columns = stats_columns(count, inner_width, metrics);
    let cell_width =
        (inner_width - (columns as f32 - 1.0) * metrics.grid_gap) / columns as f32;

    (0..count)
        .map(|index| {
            let column = index % columns;
            let row = index / columns;
            let x = band.min_x()
                + metrics.section_padding
                + column as f32 * (cell_width + metrics.grid_gap);
            let y = band.min_y()
                + metrics.section_padding
                + row as f32 * (metrics.stat_height + metrics.grid_gap);
            Bounds::from_origin_size(
                Point::new(x, y),
                Size::new(cell_width, metrics.stat_height),
            )
        })
        .collect()
}

/// Whether a chart flavor has a row visualization.
pub fn chart_renders_rows(kind: vizier_core::description::ChartKind) -> bool {
    matches!(
        kind,
        vizier_core::description::ChartKind::Progress | vizier_core::description::ChartKind::Bar
    )
}
