//! Diagram renderers, one per diagram family.
//!
//! Every renderer consumes a [`DiagramDescription`] plus the engine
//! configuration and emits scene primitives into a fresh [`Scene`]. The
//! contract: a renderer never panics for well-formed input; malformed input
//! (missing required field, tag/payload mismatch, dangling connection
//! endpoint) surfaces as a [`DescriptionError`] naming the violation.
//! Renderers depend only on scene primitives and layout algorithms, never on
//! each other.

pub mod comparison;
pub mod flowchart;
pub mod hierarchy;
pub mod infographic;
pub mod mindmap;
pub mod preview;
pub mod timeline;

use vizier_core::color::Color;
use vizier_core::description::{DescriptionError, DiagramDescription};
use vizier_core::scene::Scene;
use vizier_core::text::FontSpec;

use crate::config::EngineConfig;

/// A renderer for one diagram family.
///
/// Implementations are stateless unit structs; [`renderer_for`] is the pure
/// tag → renderer mapping the dispatcher uses.
pub trait DiagramRenderer {
    /// The type tag this renderer accepts.
    fn kind(&self) -> &'static str;

    /// Renders `description` into `scene`.
    ///
    /// # Errors
    ///
    /// [`DescriptionError::TagMismatch`] when the description's variant does
    /// not match [`kind`](Self::kind); other [`DescriptionError`] values for
    /// malformed payloads.
    fn render(
        &self,
        description: &DiagramDescription,
        config: &EngineConfig,
        scene: &mut Scene,
    ) -> Result<(), DescriptionError>;
}

/// Selects the renderer for a type tag.
///
/// An unrecognized tag routes to the raw-data preview renderer; degraded
/// mode, not an error path.
pub fn renderer_for(tag: &str) -> &'static dyn DiagramRenderer {
    match tag {
        "mindmap" => &mindmap::MindmapRenderer,
        "flowchart" => &flowchart::FlowchartRenderer,
        "timeline" => &timeline::TimelineRenderer,
        "comparison" => &comparison::ComparisonRenderer,
        "hierarchy" => &hierarchy::HierarchyRenderer,
        "infographic" => &infographic::InfographicRenderer,
        _ => &preview::PreviewRenderer,
    }
}

/// Builds the tag-mismatch error for a renderer handed the wrong variant.
pub(crate) fn tag_mismatch(
    description: &DiagramDescription,
    renderer: &dyn DiagramRenderer,
) -> DescriptionError {
    DescriptionError::TagMismatch {
        expected: description.tag().to_string(),
        actual: renderer.kind(),
    }
}

/// Unwraps an optional style role, falling back to the palette.
pub(crate) fn role_or(
    role: Result<Option<Color>, DescriptionError>,
    fallback: Color,
) -> Result<Color, DescriptionError> {
    Ok(role?.unwrap_or(fallback))
}

pub(crate) fn heading_font() -> FontSpec {
    FontSpec::new("Arial", 24.0).bold()
}

pub(crate) fn subheading_font() -> FontSpec {
    FontSpec::new("Arial", 18.0).bold()
}

pub(crate) fn body_font() -> FontSpec {
    FontSpec::new("Arial", 14.0)
}

pub(crate) fn small_font() -> FontSpec {
    FontSpec::new("Arial", 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_selection_is_pure_mapping() {
        for tag in vizier_core::description::KNOWN_TAGS {
            assert_eq!(renderer_for(tag).kind(), tag);
        }
        // Unknown tags degrade to the preview renderer.
        assert_eq!(renderer_for("wordcloud").kind(), "preview");
    }

    #[test]
    fn test_tag_mismatch_reported() {
        let description: DiagramDescription = serde_json::from_str(
            r#"{"type": "timeline", "events": [
                {"date": "2020", "title": "Start", "description": ""}
            ]}"#,
        )
        .unwrap();

        let mut scene = Scene::new();
        let err = mindmap::MindmapRenderer
            .render(&description, &EngineConfig::without_delays(), &mut scene)
            .unwrap_err();
        assert!(matches!(
            err,
            DescriptionError::TagMismatch {
                actual: "mindmap",
                ..
            }
        ));
    }
}
