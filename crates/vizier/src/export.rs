//! The export pipeline.
//!
//! Converts a rendered container into a standalone PNG payload through one
//! of three interchangeable strategies:
//!
//! 1. **Vector-serialize**: the container's single vector drawing is
//!    serialized to SVG text (with an injected opaque background) and
//!    rasterized. Fails when no sole vector drawing is present.
//! 2. **Direct rasterize**: the live scene is snapshotted. The container's
//!    clipping is neutralized behind an RAII guard, the true content size is
//!    measured (max of viewport and layout extents), the whole scene is
//!    serialized and rasterized. Always applicable, but bakes in whatever
//!    transient presentation state the scene carries.
//! 3. **Isolated-clone rasterize**: the scene is deep-cloned into an
//!    off-screen staging container, stripped of every animation, transition
//!    and transform, then rasterized. Used for the box-layout diagram
//!    families whose live state makes strategy 2 unreliable.
//!
//! Smart selection prefers strategy 1 for pure vector scenes (falling back
//! to 2 on failure) and strategy 2 otherwise; callers can always invoke a
//! specific strategy explicitly.

pub mod raster;
pub mod svg;

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;

use log::{debug, info, warn};
use thiserror::Error;

use vizier_core::geometry::Point;

use crate::config::EngineConfig;
use crate::container::{Container, ContainerRef, ContainerRegistry, Viewport};
use crate::export::raster::{RasterError, Rasterizer};
use crate::export::svg::SerializeOptions;

pub use raster::RasterError as RasterizationError;

/// Reserved id of the off-screen staging container used by the
/// isolated-clone strategy.
const STAGING_ID: &str = "__vizier_export_staging__";

/// One of the three interchangeable export strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    VectorSerialize,
    DirectRaster,
    IsolatedClone,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Self::VectorSerialize => "vector-serialize",
            Self::DirectRaster => "direct-raster",
            Self::IsolatedClone => "isolated-clone",
        }
    }
}

/// A self-contained encoded raster image.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImagePayload {
    pub(crate) fn new(bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            bytes,
            width,
            height,
        }
    }

    /// Encoded PNG bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the payload, returning the PNG bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Pixel width after scaling.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height after scaling.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Export pipeline failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("container `{0}` cannot be resolved for export")]
    ContainerUnavailable(String),

    #[error("container `{0}` holds no rendered scene")]
    EmptyScene(String),

    #[error("no vector drawing found; the vector-serialize strategy needs exactly one")]
    NoVectorContent,

    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// The export pipeline, sharing the dispatcher's container registry.
///
/// The rasterization backend is brought up lazily on the first strategy that
/// needs it and cached for the life of the exporter.
pub struct Exporter {
    registry: ContainerRegistry,
    config: EngineConfig,
    rasterizer: RefCell<Option<Rc<Rasterizer>>>,
}

impl Exporter {
    pub fn new(registry: ContainerRegistry, config: EngineConfig) -> Self {
        Self {
            registry,
            config,
            rasterizer: RefCell::new(None),
        }
    }

    /// Runs one specific strategy against the container.
    pub fn export(&self, container_id: &str, strategy: Strategy) -> Result<ImagePayload, Error> {
        let container = self
            .registry
            .resolve(container_id)
            .ok_or_else(|| Error::ContainerUnavailable(container_id.to_string()))?;

        info!(container_id, strategy = strategy.name(); "Exporting container");
        match strategy {
            Strategy::VectorSerialize => self.vector_serialize(&container),
            Strategy::DirectRaster => self.direct_raster(&container),
            Strategy::IsolatedClone => self.isolated_clone(&container),
        }
    }

    /// Picks a strategy from the container's primitive composition: a sole
    /// vector drawing with no box-layout markers goes through
    /// vector-serialize (falling back to direct rasterization on failure);
    /// anything else is rasterized directly.
    pub fn smart_export(&self, container_id: &str) -> Result<ImagePayload, Error> {
        let container = self
            .registry
            .resolve(container_id)
            .ok_or_else(|| Error::ContainerUnavailable(container_id.to_string()))?;

        let prefer_vector = {
            let borrowed = container.borrow();
            let scene = borrowed
                .scene()
                .ok_or_else(|| Error::EmptyScene(container_id.to_string()))?;
            scene.sole_vector_canvas().is_some() && !scene.has_box_marker()
        };

        if prefer_vector {
            debug!(container_id; "Smart export trying vector serialization");
            match self.vector_serialize(&container) {
                Ok(payload) => return Ok(payload),
                Err(err) => {
                    warn!(container_id, err:% = err; "Vector export failed, falling back");
                }
            }
        }

        self.direct_raster(&container)
    }

    fn rasterizer(&self) -> Result<Rc<Rasterizer>, RasterError> {
        if let Some(rasterizer) = self.rasterizer.borrow().as_ref() {
            return Ok(Rc::clone(rasterizer));
        }
        let rasterizer = Rc::new(Rasterizer::load()?);
        *self.rasterizer.borrow_mut() = Some(Rc::clone(&rasterizer));
        Ok(rasterizer)
    }

    fn settle(&self) {
        let settle = self.config.timing().settle();
        if !settle.is_zero() {
            thread::sleep(settle);
        }
    }

    /// Strategy 1: serialize the sole vector drawing and rasterize the text.
    fn vector_serialize(&self, container: &ContainerRef) -> Result<ImagePayload, Error> {
        let markup = {
            let borrowed = container.borrow();
            let scene = borrowed
                .scene()
                .ok_or_else(|| Error::EmptyScene(borrowed.id().to_string()))?;
            let canvas = scene.sole_vector_canvas().ok_or(Error::NoVectorContent)?;
            svg::canvas_to_document(canvas, self.config.palette().surface()).to_string()
        };

        let payload = self
            .rasterizer()?
            .rasterize(&markup, self.config.export().scale())?;
        Ok(payload)
    }

    /// Strategy 2: snapshot the live scene.
    ///
    /// Clipping is neutralized for the duration and restored unconditionally
    /// by the guard, including when rasterization fails.
    fn direct_raster(&self, container: &ContainerRef) -> Result<ImagePayload, Error> {
        let _guard = ClipGuard::neutralize(container);
        self.settle();

        let (markup, id) = {
            let borrowed = container.borrow();
            let scene = borrowed
                .scene()
                .ok_or_else(|| Error::EmptyScene(borrowed.id().to_string()))?;
            let size = borrowed.content_size();
            let options = SerializeOptions {
                background: Some(self.config.palette().surface()),
                include_transient: true,
            };
            (
                svg::scene_to_document(scene, size, &options).to_string(),
                borrowed.id().to_string(),
            )
        };
        debug!(container_id = id; "Serialized live scene for direct rasterization");

        let payload = self
            .rasterizer()?
            .rasterize(&markup, self.config.export().scale())?;
        Ok(payload)
    }

    /// Strategy 3: clone into off-screen staging, strip transient state,
    /// rasterize, remove staging unconditionally.
    fn isolated_clone(&self, container: &ContainerRef) -> Result<ImagePayload, Error> {
        let mut scene = {
            let borrowed = container.borrow();
            borrowed
                .scene()
                .cloned()
                .ok_or_else(|| Error::EmptyScene(borrowed.id().to_string()))?
        };
        scene.strip_transient();

        let mut staging = Container::new(STAGING_ID);
        staging.set_offset(Point::new(-9999.0, -9999.0));
        staging.set_viewport(Viewport {
            clip: false,
            ..Viewport::default()
        });
        staging.install(scene);
        let staging = self.registry.insert(staging);
        let _guard = StagingGuard {
            registry: &self.registry,
        };

        self.settle();

        let markup = {
            let borrowed = staging.borrow();
            let scene = borrowed.scene().expect("staging container was just filled");
            let size = borrowed.content_size();
            let options = SerializeOptions {
                background: Some(self.config.palette().surface()),
                include_transient: false,
            };
            svg::scene_to_document(scene, size, &options).to_string()
        };

        let payload = self
            .rasterizer()?
            .rasterize(&markup, self.config.export().scale())?;
        Ok(payload)
    }
}

/// Scoped neutralization of a container's scroll and clipping state.
///
/// Acquiring the guard expands the viewport (clipping off, scroll reset);
/// dropping it restores the saved state on every path, error or not.
struct ClipGuard {
    container: ContainerRef,
    saved: Viewport,
}

impl ClipGuard {
    fn neutralize(container: &ContainerRef) -> Self {
        let saved = container.borrow().viewport();
        container.borrow_mut().set_viewport(Viewport {
            clip: false,
            scroll_top: 0.0,
            ..saved
        });
        Self {
            container: Rc::clone(container),
            saved,
        }
    }
}

impl Drop for ClipGuard {
    fn drop(&mut self) {
        self.container.borrow_mut().set_viewport(self.saved);
    }
}

/// Removes the staging container when dropped, on every path.
struct StagingGuard<'a> {
    registry: &'a ContainerRegistry,
}

impl Drop for StagingGuard<'_> {
    fn drop(&mut self) {
        self.registry.remove(STAGING_ID);
    }
}

#[cfg(test)]
mod tests {
    use vizier_core::geometry::{Bounds, Size};
    use vizier_core::scene::{Marker, Panel, Scene, Transient, VectorCanvas};

    use super::*;

    fn exporter() -> (Exporter, ContainerRegistry) {
        let registry = ContainerRegistry::new();
        registry.register("canvas");
        (
            Exporter::new(registry.clone(), EngineConfig::without_delays()),
            registry,
        )
    }

    fn vector_scene() -> Scene {
        let mut scene = Scene::new();
        scene.push_canvas(VectorCanvas::new(Size::new(100.0, 100.0)));
        scene
    }

    fn marked_scene() -> Scene {
        let mut scene = Scene::new();
        let mut panel = Panel::new(Bounds::from_origin_size(
            Point::default(),
            Size::new(100.0, 100.0),
        ));
        panel.marker = Some(Marker::Comparison);
        panel.transient = Transient::slide_in_up(0.1);
        scene.push_panel(panel);
        scene
    }

    #[test]
    fn test_export_unresolvable_container() {
        let (exporter, _registry) = exporter();
        let err = exporter
            .export("missing", Strategy::DirectRaster)
            .unwrap_err();
        assert!(matches!(err, Error::ContainerUnavailable(_)));
    }

    #[test]
    fn test_export_empty_scene() {
        let (exporter, _registry) = exporter();
        let err = exporter.smart_export("canvas").unwrap_err();
        assert!(matches!(err, Error::EmptyScene(_)));
    }

    #[test]
    fn test_vector_strategy_requires_vector_content() {
        let (exporter, registry) = exporter();
        let container = registry.resolve("canvas").unwrap();
        container.borrow_mut().install(marked_scene());

        let err = exporter
            .export("canvas", Strategy::VectorSerialize)
            .unwrap_err();
        assert!(matches!(err, Error::NoVectorContent));
    }

    #[test]
    fn test_clip_guard_restores_viewport_on_failure() {
        let (exporter, registry) = exporter();
        let container = registry.resolve("canvas").unwrap();
        let original = Viewport {
            size: Size::new(800.0, 400.0),
            clip: true,
            scroll_top: 120.0,
        };
        container.borrow_mut().set_viewport(original);

        // No scene installed: direct raster fails after acquiring the guard.
        let err = exporter
            .export("canvas", Strategy::DirectRaster)
            .unwrap_err();
        assert!(matches!(err, Error::EmptyScene(_)));
        assert_eq!(container.borrow().viewport(), original);
    }

    #[test]
    fn test_staging_removed_after_isolated_clone() {
        let (exporter, registry) = exporter();
        let container = registry.resolve("canvas").unwrap();
        container.borrow_mut().install(marked_scene());

        // Whether rasterization succeeds depends on system fonts; either
        // way the staging container must be gone afterwards.
        let _ = exporter.export("canvas", Strategy::IsolatedClone);
        assert!(registry.resolve(STAGING_ID).is_none());
    }

    #[test]
    fn test_smart_export_prefers_vector_for_pure_vector_scene() {
        let (exporter, registry) = exporter();
        let container = registry.resolve("canvas").unwrap();
        container.borrow_mut().install(vector_scene());

        match exporter.smart_export("canvas") {
            Ok(payload) => {
                assert!(!payload.is_empty());
                assert_eq!(payload.width(), 200); // 100 at 2x scale
            }
            // Environments without system fonts cannot rasterize at all.
            Err(Error::Raster(RasterError::Unavailable(_))) => {}
            Err(err) => panic!("unexpected export error: {err}"),
        }
    }
}
