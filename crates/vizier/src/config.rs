//! Engine configuration.
//!
//! All tunable values (palette roles, per-diagram layout metrics, timing
//! floors, export scale) live in one immutable [`EngineConfig`] built at
//! construction time and passed by reference. Nothing here is process-wide
//! state, so tests can inject palettes and zeroed timings and stay
//! deterministic. All types implement [`serde::Deserialize`] for loading
//! from external sources.

use std::time::Duration;

use serde::Deserialize;

use vizier_core::color::Color;

fn color(value: &str) -> Color {
    Color::new(value).expect("palette literals are valid CSS colors")
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    palette: Palette,
    metrics: LayoutMetrics,
    timing: TimingConfig,
    export: ExportConfig,
}

impl EngineConfig {
    /// Returns the color palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Returns the per-diagram layout metrics.
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Returns the timing configuration.
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// A configuration with all timing floors zeroed, for deterministic and
    /// fast tests.
    pub fn without_delays() -> Self {
        Self {
            timing: TimingConfig {
                loading_hold_ms: 0,
                settle_ms: 0,
            },
            ..Self::default()
        }
    }
}

/// Engine color roles with the product defaults.
///
/// Description style records override these per render; the palette is the
/// fallback for every missing role.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Palette {
    primary: Color,
    secondary: Color,
    accent: Color,
    text: Color,
    muted_text: Color,
    heading: Color,
    background: Color,
    surface: Color,
    line: Color,
    node: Color,
    flow_node: Color,
    track: Color,
    grid_line: Color,
    /// Colors cycled by hierarchy level.
    level_cycle: Vec<Color>,
    /// The two colors paired in comparison diagrams.
    comparison_pair: [Color; 2],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: color("#4a90e2"),
            secondary: color("#f8f9fa"),
            accent: color("#e74c3c"),
            text: color("#333333"),
            muted_text: color("#666666"),
            heading: color("#2c3e50"),
            background: color("#f5f5f5"),
            surface: color("white"),
            line: color("#666666"),
            node: color("#4a90e2"),
            flow_node: color("#007bff"),
            track: color("#e9ecef"),
            grid_line: color("#dddddd"),
            level_cycle: vec![
                color("#2c3e50"),
                color("#3498db"),
                color("#e74c3c"),
                color("#f39c12"),
                color("#9b59b6"),
                color("#1abc9c"),
            ],
            comparison_pair: [color("#007bff"), color("#28a745")],
        }
    }
}

impl Palette {
    pub fn primary(&self) -> Color {
        self.primary
    }

    pub fn secondary(&self) -> Color {
        self.secondary
    }

    pub fn accent(&self) -> Color {
        self.accent
    }

    pub fn text(&self) -> Color {
        self.text
    }

    pub fn muted_text(&self) -> Color {
        self.muted_text
    }

    pub fn heading(&self) -> Color {
        self.heading
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn surface(&self) -> Color {
        self.surface
    }

    pub fn line(&self) -> Color {
        self.line
    }

    pub fn node(&self) -> Color {
        self.node
    }

    pub fn flow_node(&self) -> Color {
        self.flow_node
    }

    pub fn track(&self) -> Color {
        self.track
    }

    pub fn grid_line(&self) -> Color {
        self.grid_line
    }

    /// Color for a hierarchy node at the given level, cycling through the
    /// configured sequence. The provided override replaces level 0.
    pub fn level_color(&self, level: u32, level_zero: Option<Color>) -> Color {
        let index = level as usize % self.level_cycle.len();
        if index == 0 {
            return level_zero.unwrap_or(self.level_cycle[0]);
        }
        self.level_cycle[index]
    }

    /// Color for the comparison item at `index`, alternating the pair.
    pub fn comparison_color(&self, index: usize, overrides: [Option<Color>; 2]) -> Color {
        let slot = index % 2;
        overrides[slot].unwrap_or(self.comparison_pair[slot])
    }
}

/// Durations for the engine's two deliberate suspension points.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Minimum time the loading placeholder stays visible, in milliseconds.
    /// A UX floor so fast renders remain perceptible, not a correctness
    /// requirement.
    loading_hold_ms: u64,
    /// Settle time before rasterizing a live or cloned scene, in
    /// milliseconds.
    settle_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            loading_hold_ms: 500,
            settle_ms: 300,
        }
    }
}

impl TimingConfig {
    pub fn loading_hold(&self) -> Duration {
        Duration::from_millis(self.loading_hold_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// Export pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Linear rasterization scale; 2.0 doubles both pixel dimensions for
    /// sharpness.
    scale: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { scale: 2.0 }
    }
}

impl ExportConfig {
    pub fn scale(&self) -> f32 {
        self.scale
    }
}

/// Layout metrics per diagram family.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub mindmap: MindmapMetrics,
    pub flowchart: FlowchartMetrics,
    pub hierarchy: HierarchyMetrics,
    pub timeline: TimelineMetrics,
    pub comparison: ComparisonMetrics,
    pub infographic: InfographicMetrics,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MindmapMetrics {
    pub width: f32,
    pub height: f32,
    pub center_radius: f32,
    pub node_radius: f32,
}

impl Default for MindmapMetrics {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            center_radius: 50.0,
            node_radius: 30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlowchartMetrics {
    pub width: f32,
    pub height: f32,
    /// Vertical distance from a node center to the connector attachment
    /// point on its edge.
    pub node_half_height: f32,
    pub ellipse_rx: f32,
    pub ellipse_ry: f32,
    pub process_width: f32,
    pub process_height: f32,
    pub process_corner_radius: f32,
    pub diamond_half_width: f32,
    pub diamond_half_height: f32,
}

impl Default for FlowchartMetrics {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 700.0,
            node_half_height: 25.0,
            ellipse_rx: 60.0,
            ellipse_ry: 30.0,
            process_width: 120.0,
            process_height: 50.0,
            process_corner_radius: 8.0,
            diamond_half_width: 50.0,
            diamond_half_height: 25.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HierarchyMetrics {
    pub node_width: f32,
    pub node_height: f32,
    pub level_height: f32,
    pub node_spacing: f32,
    pub top_margin: f32,
    pub canvas_padding: f32,
    pub title_height: f32,
}

impl Default for HierarchyMetrics {
    fn default() -> Self {
        Self {
            node_width: 160.0,
            node_height: 80.0,
            level_height: 120.0,
            node_spacing: 40.0,
            top_margin: 60.0,
            canvas_padding: 40.0,
            title_height: 44.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimelineMetrics {
    pub width: f32,
    pub padding: f32,
    pub header_height: f32,
    pub row_height: f32,
    pub card_height: f32,
    pub card_max_width: f32,
    /// Fraction of the container width available to each column.
    pub column_ratio: f32,
    pub connector_length: f32,
    pub dot_radius: f32,
}

impl Default for TimelineMetrics {
    fn default() -> Self {
        Self {
            width: 800.0,
            padding: 20.0,
            header_height: 70.0,
            row_height: 180.0,
            card_height: 120.0,
            card_max_width: 320.0,
            column_ratio: 0.45,
            connector_length: 40.0,
            dot_radius: 10.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComparisonMetrics {
    pub width: f32,
    pub padding: f32,
    pub header_height: f32,
    pub min_column_width: f32,
    pub column_gap: f32,
    pub card_padding: f32,
    pub title_height: f32,
    pub feature_row_height: f32,
    pub footer_height: f32,
    pub chart_width: f32,
    pub chart_height: f32,
    pub chart_radius: f32,
    pub axis_label_offset: f32,
    pub legend_height: f32,
}

impl Default for ComparisonMetrics {
    fn default() -> Self {
        Self {
            width: 800.0,
            padding: 20.0,
            header_height: 70.0,
            min_column_width: 350.0,
            column_gap: 30.0,
            card_padding: 25.0,
            title_height: 50.0,
            feature_row_height: 40.0,
            footer_height: 70.0,
            chart_width: 500.0,
            chart_height: 400.0,
            chart_radius: 120.0,
            axis_label_offset: 20.0,
            legend_height: 40.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InfographicMetrics {
    pub width: f32,
    pub header_height: f32,
    pub section_padding: f32,
    pub stat_min_width: f32,
    pub stat_height: f32,
    pub grid_gap: f32,
    pub chart_row_height: f32,
    pub text_line_height: f32,
    pub notice_height: f32,
}

impl Default for InfographicMetrics {
    fn default() -> Self {
        Self {
            width: 800.0,
            header_height: 70.0,
            section_padding: 20.0,
            stat_min_width: 200.0,
            stat_height: 90.0,
            grid_gap: 20.0,
            chart_row_height: 50.0,
            text_line_height: 22.0,
            notice_height: 60.0,
        }
    }
}
