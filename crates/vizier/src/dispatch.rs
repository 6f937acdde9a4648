//! The render dispatcher.
//!
//! Owns the lifecycle of a single render pass over one container:
//! `Idle → Loading → Rendered` with `Loading → Failed` on error, every state
//! re-entrant: a new render call always goes back through `Loading`. The
//! dispatcher resolves its container lazily, shows a transient loading
//! placeholder held for a configured minimum duration, selects the renderer
//! by the description's type tag (unknown tags degrade to the raw-data
//! preview) and replaces the container's scene wholesale.
//!
//! Concurrency: everything runs on the calling thread; the loading hold is a
//! blocking sleep. Callers must not re-enter `render` from within a render
//! or export of the same dispatcher; a documented obligation, not an
//! enforced lock.

use std::thread;

use log::{debug, error, info};

use vizier_core::description::DiagramDescription;
use vizier_core::geometry::{Bounds, Point, Size};
use vizier_core::scene::{BoxStyle, Panel, Scene, TextBlock};

use crate::config::EngineConfig;
use crate::container::{ContainerRef, ContainerRegistry};
use crate::error::VizierError;
use crate::render::{self, subheading_font};

/// Lifecycle state of the dispatcher's container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    Loading,
    Rendered,
    /// Holds the human-readable failure message also shown in the container.
    Failed(String),
}

/// Dispatches descriptions to diagram renderers and manages the container
/// lifecycle.
pub struct Dispatcher {
    registry: ContainerRegistry,
    container_id: String,
    /// Resolved lazily; the container may not exist at construction time.
    container: Option<ContainerRef>,
    config: EngineConfig,
    state: RenderState,
}

impl Dispatcher {
    /// Creates a dispatcher for the given container id.
    ///
    /// The container does not need to exist yet; resolution is retried on
    /// first use.
    pub fn new(registry: ContainerRegistry, container_id: &str, config: EngineConfig) -> Self {
        let container = registry.resolve(container_id);
        if container.is_none() {
            debug!(container_id; "Container not yet available, will re-resolve before first render");
        }
        Self {
            registry,
            container_id: container_id.to_string(),
            container,
            config,
            state: RenderState::Idle,
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn resolve_container(&mut self) -> Result<ContainerRef, VizierError> {
        if self.container.is_none() {
            self.container = self.registry.resolve(&self.container_id);
        }
        self.container
            .clone()
            .ok_or_else(|| VizierError::ContainerUnavailable {
                id: self.container_id.clone(),
            })
    }

    /// Renders a description into the container.
    ///
    /// On success the container holds the new scene and the dispatcher is
    /// `Rendered`. On failure the container shows a textual error, the
    /// dispatcher is `Failed`, and the error is returned; nothing is retried
    /// automatically.
    pub fn render(&mut self, description: &DiagramDescription) -> Result<(), VizierError> {
        let container = self.resolve_container()?;

        info!(
            container_id = self.container_id,
            diagram_kind = description.tag();
            "Rendering diagram",
        );

        // Transient progress placeholder, held so fast renders stay
        // perceptible.
        self.state = RenderState::Loading;
        container.borrow_mut().install(loading_scene(&self.config));
        let hold = self.config.timing().loading_hold();
        if !hold.is_zero() {
            thread::sleep(hold);
        }
        container.borrow_mut().clear();

        let renderer = render::renderer_for(description.tag());
        let mut scene = Scene::new();
        match renderer.render(description, &self.config, &mut scene) {
            Ok(()) => {
                container.borrow_mut().install(scene);
                self.state = RenderState::Rendered;
                debug!(container_id = self.container_id; "Render complete");
                Ok(())
            }
            Err(err) => {
                let message = err.to_string();
                error!(container_id = self.container_id, err:% = err; "Render failed");
                container
                    .borrow_mut()
                    .install(failure_scene(&message, &self.config));
                self.state = RenderState::Failed(message);
                Err(err.into())
            }
        }
    }
}

fn notice_scene(message: &str, config: &EngineConfig) -> Scene {
    let palette = config.palette();
    let mut panel = Panel::new(Bounds::from_origin_size(
        Point::default(),
        Size::new(800.0, 120.0),
    ));
    panel.style = BoxStyle::filled(palette.secondary(), 12.0);
    panel.push_text(TextBlock::centered(
        Point::new(400.0, 48.0),
        message,
        subheading_font(),
        palette.heading(),
    ));

    let mut scene = Scene::new();
    scene.push_panel(panel);
    scene
}

fn loading_scene(config: &EngineConfig) -> Scene {
    notice_scene("Rendering visualization...", config)
}

fn failure_scene(message: &str, config: &EngineConfig) -> Scene {
    notice_scene(&format!("Render failed: {message}"), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline_json() -> DiagramDescription {
        serde_json::from_str(
            r#"{"type": "timeline", "events": [
                {"date": "2020", "title": "Start", "description": "begin"}
            ]}"#,
        )
        .unwrap()
    }

    fn broken_mindmap() -> DiagramDescription {
        serde_json::from_str(
            r#"{"type": "mindmap",
                "centerNode": {"id": "c", "text": "Core"},
                "nodes": [], "connections": []}"#,
        )
        .unwrap()
    }

    fn dispatcher(register: bool) -> (Dispatcher, ContainerRegistry) {
        let registry = ContainerRegistry::new();
        if register {
            registry.register("canvas");
        }
        (
            Dispatcher::new(registry.clone(), "canvas", EngineConfig::without_delays()),
            registry,
        )
    }

    #[test]
    fn test_render_success_transitions_to_rendered() {
        let (mut dispatcher, registry) = dispatcher(true);
        assert_eq!(*dispatcher.state(), RenderState::Idle);

        dispatcher.render(&timeline_json()).unwrap();
        assert_eq!(*dispatcher.state(), RenderState::Rendered);

        let container = registry.resolve("canvas").unwrap();
        assert!(container.borrow().scene().is_some());
    }

    #[test]
    fn test_render_failure_shows_error_scene() {
        let (mut dispatcher, registry) = dispatcher(true);
        let err = dispatcher.render(&broken_mindmap()).unwrap_err();
        assert!(matches!(err, VizierError::Description(_)));
        assert!(matches!(dispatcher.state(), RenderState::Failed(_)));

        // The container shows the textual error rather than being empty.
        let container = registry.resolve("canvas").unwrap();
        let borrowed = container.borrow();
        let census = borrowed.scene().unwrap().primitive_census();
        assert_eq!(census.get("text-block"), Some(&1));
    }

    #[test]
    fn test_failed_state_is_reentrant() {
        let (mut dispatcher, _registry) = dispatcher(true);
        dispatcher.render(&broken_mindmap()).unwrap_err();
        dispatcher.render(&timeline_json()).unwrap();
        assert_eq!(*dispatcher.state(), RenderState::Rendered);
    }

    #[test]
    fn test_container_resolved_lazily() {
        let (mut dispatcher, registry) = dispatcher(false);
        // Unresolvable at render time is a hard error...
        let err = dispatcher.render(&timeline_json()).unwrap_err();
        assert!(matches!(err, VizierError::ContainerUnavailable { .. }));

        // ...but registering the container afterwards is enough.
        registry.register("canvas");
        dispatcher.render(&timeline_json()).unwrap();
        assert_eq!(*dispatcher.state(), RenderState::Rendered);
    }

    #[test]
    fn test_unknown_tag_renders_preview_not_failure() {
        let (mut dispatcher, registry) = dispatcher(true);
        let description = DiagramDescription::unknown("wordcloud", "{ \"a\": 1 }".to_string());
        dispatcher.render(&description).unwrap();
        assert_eq!(*dispatcher.state(), RenderState::Rendered);

        let container = registry.resolve("canvas").unwrap();
        let borrowed = container.borrow();
        assert!(!borrowed.scene().unwrap().is_empty());
    }

    #[test]
    fn test_render_twice_is_composition_idempotent() {
        let (mut dispatcher, registry) = dispatcher(true);
        let description = timeline_json();

        dispatcher.render(&description).unwrap();
        let container = registry.resolve("canvas").unwrap();
        let first = container.borrow().scene().unwrap().primitive_census();

        dispatcher.render(&description).unwrap();
        let second = container.borrow().scene().unwrap().primitive_census();
        assert_eq!(first, second);
    }
}
