//! Raw-data preview renderer for unrecognized diagram tags.
//!
//! Degraded mode by design: instead of failing, an unknown tag renders a
//! pretty-printed dump of the description body so the user can see what the
//! engine received.

use vizier_core::description::{DescriptionError, DiagramDescription};
use vizier_core::geometry::{Bounds, Point, Size};
use vizier_core::scene::{BoxStyle, Panel, Scene, TextBlock};
use vizier_core::text::FontSpec;

use crate::config::EngineConfig;
use crate::render::{self, DiagramRenderer};

pub struct PreviewRenderer;

impl DiagramRenderer for PreviewRenderer {
    fn kind(&self) -> &'static str {
        "preview"
    }

    fn render(
        &self,
        description: &DiagramDescription,
        config: &EngineConfig,
        scene: &mut Scene,
    ) -> Result<(), DescriptionError> {
        let palette = config.palette();

        let body = match description {
            DiagramDescription::Unknown(unknown) => unknown.body.clone(),
            // A recognized description routed here still gets a dump rather
            // than an error; the preview accepts anything.
            other => format!("{other:#?}"),
        };

        let mono = FontSpec::new("monospace", 12.0);
        let lines: Vec<String> = body.lines().map(str::to_string).collect();
        let line_height = mono.line_height();
        let height = 70.0 + lines.len() as f32 * line_height + 20.0;

        let mut panel = Panel::new(Bounds::from_origin_size(
            Point::default(),
            Size::new(800.0, height),
        ));
        panel.style = BoxStyle::filled(palette.surface(), 12.0);
        panel.push_text(TextBlock::new(
            Point::new(20.0, 20.0),
            vec![format!("Data preview ({})", description.tag())],
            render::subheading_font(),
            palette.heading(),
        ));
        panel.push_text(TextBlock::new(
            Point::new(20.0, 60.0),
            lines,
            mono,
            palette.text(),
        ));

        scene.push_panel(panel);
        Ok(())
    }
}
