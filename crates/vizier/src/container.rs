//! Render containers and the registry that resolves them.
//!
//! A container is a named display surface owning at most one [`Scene`] plus
//! the viewport state (declared size, clipping, scroll offset) the export
//! pipeline has to account for. The engine receives container *ids*, not
//! containers: the [`ContainerRegistry`] resolves ids lazily, so a container
//! registered after the dispatcher was constructed is still found on first
//! use.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use vizier_core::geometry::{Point, Size};
use vizier_core::scene::Scene;

/// Shared handle to a resolved container.
pub type ContainerRef = Rc<RefCell<Container>>;

/// Scroll and clipping state of a container's viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Declared size of the visible area.
    pub size: Size,
    /// Whether content outside the viewport is clipped.
    pub clip: bool,
    /// Current vertical scroll offset.
    pub scroll_top: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            size: Size::new(800.0, 600.0),
            clip: true,
            scroll_top: 0.0,
        }
    }
}

/// A named display surface.
#[derive(Debug, Default)]
pub struct Container {
    id: String,
    scene: Option<Scene>,
    viewport: Viewport,
    /// Offset of the container in document space; staging containers are
    /// parked far off-screen.
    offset: Point,
}

impl Container {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Replaces the container's content wholesale. The previous scene, if
    /// any, is dropped.
    pub fn install(&mut self, scene: Scene) {
        self.scene = Some(scene);
    }

    /// Removes the current scene, leaving the container empty.
    pub fn clear(&mut self) {
        self.scene = None;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// The true content size: the maximum of the declared viewport and the
    /// scene's layout extents, mirroring `max(scrollHeight, offsetHeight)`
    /// measurement before a snapshot.
    pub fn content_size(&self) -> Size {
        let layout = self
            .scene
            .as_ref()
            .map(|scene| scene.content_bounds().to_size())
            .unwrap_or_default();
        self.viewport.size.max(layout)
    }
}

/// A registry of containers by id, shared between the dispatcher and the
/// export pipeline.
///
/// Cloning the registry clones the handle, not the containers.
#[derive(Debug, Clone, Default)]
pub struct ContainerRegistry {
    containers: Rc<RefCell<HashMap<String, ContainerRef>>>,
}

impl ContainerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an empty container under `id`, replacing any previous one,
    /// and returns its handle.
    pub fn register(&self, id: &str) -> ContainerRef {
        let container = Rc::new(RefCell::new(Container::new(id)));
        self.containers
            .borrow_mut()
            .insert(id.to_string(), Rc::clone(&container));
        container
    }

    /// Inserts a pre-built container (used for export staging).
    pub fn insert(&self, container: Container) -> ContainerRef {
        let id = container.id().to_string();
        let handle = Rc::new(RefCell::new(container));
        self.containers.borrow_mut().insert(id, Rc::clone(&handle));
        handle
    }

    /// Resolves a container id, if registered.
    pub fn resolve(&self, id: &str) -> Option<ContainerRef> {
        self.containers.borrow().get(id).map(Rc::clone)
    }

    /// Removes a container, returning whether it existed.
    pub fn remove(&self, id: &str) -> bool {
        self.containers.borrow_mut().remove(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use vizier_core::geometry::Bounds;
    use vizier_core::scene::Panel;

    use super::*;

    #[test]
    fn test_registry_resolves_after_registration() {
        let registry = ContainerRegistry::new();
        assert!(registry.resolve("canvas").is_none());

        registry.register("canvas");
        assert!(registry.resolve("canvas").is_some());

        assert!(registry.remove("canvas"));
        assert!(registry.resolve("canvas").is_none());
    }

    #[test]
    fn test_registry_clone_shares_state() {
        let registry = ContainerRegistry::new();
        let clone = registry.clone();
        registry.register("shared");
        assert!(clone.resolve("shared").is_some());
    }

    #[test]
    fn test_install_replaces_scene() {
        let registry = ContainerRegistry::new();
        let container = registry.register("canvas");

        let mut scene = Scene::new();
        scene.push_panel(Panel::new(Bounds::from_origin_size(
            Point::default(),
            Size::new(10.0, 10.0),
        )));
        container.borrow_mut().install(scene);
        assert!(container.borrow().scene().is_some());

        container.borrow_mut().clear();
        assert!(container.borrow().scene().is_none());
    }

    #[test]
    fn test_content_size_is_max_of_viewport_and_layout() {
        let mut container = Container::new("canvas");
        let mut scene = Scene::new();
        scene.push_panel(Panel::new(Bounds::from_origin_size(
            Point::default(),
            Size::new(400.0, 1200.0),
        )));
        container.install(scene);

        let size = container.content_size();
        assert_approx_eq!(f32, size.width(), 800.0); // viewport wins on width
        assert_approx_eq!(f32, size.height(), 1200.0); // layout wins on height
    }
}
