//! Side-by-side grid with radial-chart overlay for comparison diagrams.
//!
//! Items fill a responsive grid (auto-fit with a minimum column width). When
//! exactly two items are present, an additional radial ("spider") chart is
//! computed: its axes are the feature names of the *first* item, axis `k` of
//! `n` sits at angle `k·(2π/n) − π/2` (feature 0 points straight up,
//! proceeding clockwise), and a score maps to `(score / 10) · radius` from
//! the center. Items whose feature lists diverge from the first item's are
//! plotted best-effort by index: visually distorted, never an error.

use std::f32::consts::{FRAC_PI_2, TAU};

use vizier_core::description::ComparisonItem;
use vizier_core::geometry::{Bounds, Point, Size};

use crate::config::ComparisonMetrics;

/// Number of concentric guide rings drawn behind a radar chart.
pub const RADAR_RINGS: usize = 5;

/// The responsive card grid.
#[derive(Debug, Clone)]
pub struct GridLayout {
    /// One card bounds per item, in item order (row-major).
    pub cells: Vec<Bounds>,
    pub columns: usize,
    pub card_height: f32,
    /// Total grid extent.
    pub size: Size,
}

/// Arranges `feature_counts.len()` cards into an auto-fit grid.
///
/// Card height is uniform, sized for the longest feature list so rows line
/// up.
pub fn grid(feature_counts: &[usize], metrics: &ComparisonMetrics) -> GridLayout {
    let count = feature_counts.len();
    let inner_width = metrics.width - 2.0 * metrics.padding;

    let fit = ((inner_width + metrics.column_gap)
        / (metrics.min_column_width + metrics.column_gap)) as usize;
    let columns = fit.clamp(1, count.max(1));

    let column_width =
        (inner_width - (columns as f32 - 1.0) * metrics.column_gap) / columns as f32;

    let max_features = feature_counts.iter().copied().max().unwrap_or(0);
    let card_height = metrics.title_height
        + max_features as f32 * metrics.feature_row_height
        + metrics.footer_height
        + 2.0 * metrics.card_padding;

    let mut cells = Vec::with_capacity(count);
    for index in 0..count {
        let column = index % columns;
        let row = index / columns;
        let x = metrics.padding + column as f32 * (column_width + metrics.column_gap);
        let y = row as f32 * (card_height + metrics.column_gap);
        cells.push(Bounds::from_origin_size(
            Point::new(x, y),
            Size::new(column_width, card_height),
        ));
    }

    let rows = count.div_ceil(columns).max(1);
    let size = Size::new(
        metrics.width,
        rows as f32 * (card_height + metrics.column_gap) - metrics.column_gap,
    );

    GridLayout {
        cells,
        columns,
        card_height,
        size,
    }
}

/// One radar axis: direction plus label placement.
#[derive(Debug, Clone)]
pub struct RadarAxis {
    pub label: String,
    pub angle: f32,
    /// Axis endpoint on the outer ring.
    pub end: Point,
    /// Label anchor just beyond the outer ring.
    pub label_pos: Point,
}

/// The computed radar chart overlay.
#[derive(Debug, Clone)]
pub struct RadarLayout {
    pub center: Point,
    pub radius: f32,
    pub axes: Vec<RadarAxis>,
    /// One scored polygon per item, points in axis order.
    pub polygons: Vec<Vec<Point>>,
}

/// Angle of axis `k` out of `n`, measured so axis 0 points straight up.
pub fn axis_angle(k: usize, n: usize) -> f32 {
    k as f32 * (TAU / n as f32) - FRAC_PI_2
}

/// Point at `distance` from `center` along `angle`.
pub fn point_at(center: Point, angle: f32, distance: f32) -> Point {
    Point::new(
        center.x() + angle.cos() * distance,
        center.y() + angle.sin() * distance,
    )
}

/// Computes the radar overlay, present only when exactly two items are
/// compared and the first item has at least one feature.
pub fn radar(items: &[ComparisonItem], metrics: &ComparisonMetrics) -> Option<RadarLayout> {
    if items.len() != 2 {
        return None;
    }
    let axis_count = items[0].features.len();
    if axis_count == 0 {
        return None;
    }

    let center = Point::new(metrics.chart_width / 2.0, metrics.chart_height / 2.0);
    let radius = metrics.chart_radius;

    let axes = items[0]
        .features
        .iter()
        .enumerate()
        .map(|(k, feature)| {
            let angle = axis_angle(k, axis_count);
            RadarAxis {
                label: feature.name.clone(),
                angle,
                end: point_at(center, angle, radius),
                label_pos: point_at(center, angle, radius + metrics.axis_label_offset),
            }
        })
        .collect();

    // Each item is plotted by feature index against the first item's axis
    // count; diverging feature sets distort rather than fail.
    let polygons = items
        .iter()
        .map(|item| {
            item.features
                .iter()
                .enumerate()
                .map(|(k, feature)| {
                    let angle = axis_angle(k, axis_count);
                    let distance = (feature.score / 10.0) * radius;
                    point_at(center, angle, distance)
                })
                .collect()
        })
        .collect();

    Some(RadarLayout {
        center,
        radius,
        axes,
        polygons,
    })
}
