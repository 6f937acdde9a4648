//! Vizier - a diagram rendering, layout and export engine.
//!
//! Vizier consumes typed diagram descriptions (mindmap, flowchart, timeline,
//! comparison, hierarchy, infographic), lays them out with per-family
//! algorithms, renders them into retained scenes, and exports scenes as
//! standalone PNG images through a multi-strategy pipeline.
//!
//! # Pipeline
//!
//! ```text
//! DiagramDescription
//!     ↓ dispatch (tag → renderer, Idle → Loading → Rendered | Failed)
//! Layout (pure per-family coordinate assignment)
//!     ↓ render
//! Scene (vector canvases + styled panels in a container)
//!     ↓ export (vector-serialize | direct raster | isolated clone)
//! PNG payload
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use vizier::{ContainerRegistry, Dispatcher, EngineConfig, Exporter};
//! use vizier::description::DiagramDescription;
//!
//! let registry = ContainerRegistry::new();
//! registry.register("canvas");
//!
//! let config = EngineConfig::default();
//! let mut dispatcher = Dispatcher::new(registry.clone(), "canvas", config.clone());
//!
//! let description: DiagramDescription = serde_json::from_str(
//!     r#"{"type": "timeline", "events": [
//!         {"date": "2020", "title": "Start", "description": ""}
//!     ]}"#,
//! ).expect("valid description");
//!
//! dispatcher.render(&description).expect("render succeeds");
//!
//! let exporter = Exporter::new(registry, config);
//! let payload = exporter.smart_export("canvas").expect("export succeeds");
//! std::fs::write("out.png", payload.bytes()).expect("write succeeds");
//! ```

pub mod config;
pub mod container;
pub mod dispatch;
pub mod export;
pub mod layout;
pub mod render;

mod error;

pub use vizier_core::{color, description, geometry, identifier, scene, text};

pub use config::EngineConfig;
pub use container::{Container, ContainerRef, ContainerRegistry, Viewport};
pub use dispatch::{Dispatcher, RenderState};
pub use error::VizierError;
pub use export::{Exporter, ImagePayload, Strategy};
