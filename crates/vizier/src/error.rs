//! Error types for Vizier operations.
//!
//! This module provides the main error type [`VizierError`] which wraps the
//! error conditions that can occur while rendering and exporting diagrams.

use std::io;

use thiserror::Error;

use vizier_core::description::DescriptionError;

/// The main error type for Vizier operations.
#[derive(Debug, Error)]
pub enum VizierError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed or tag-mismatched input; the diagram is left in the
    /// `Failed` state with a human-readable message.
    #[error("Description error: {0}")]
    Description(#[from] DescriptionError),

    /// The render target could not be resolved; the caller must
    /// re-initialize the container before retrying.
    #[error("Container `{id}` cannot be resolved")]
    ContainerUnavailable { id: String },

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}
