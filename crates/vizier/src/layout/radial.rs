//! Radial layout for mindmaps.
//!
//! Mindmap positions are author-supplied: the center node is fixed and every
//! child node carries its own coordinates. This algorithm validates and
//! collects those positions; a node without coordinates is rejected (there
//! is deliberately no computed polar fallback).

use indexmap::IndexMap;

use vizier_core::description::{DescriptionError, MindmapDescription};
use vizier_core::geometry::Point;
use vizier_core::identifier::Id;

/// The collected mindmap positions.
#[derive(Debug, Clone)]
pub struct Layout {
    pub center: Point,
    /// Child node positions in input order.
    pub nodes: IndexMap<Id, Point>,
}

impl Layout {
    /// Resolves a connection endpoint. An id matching no child falls back to
    /// the center node, which acts as the implicit root.
    pub fn endpoint_or_center(&self, id: Id) -> Point {
        self.nodes.get(&id).copied().unwrap_or(self.center)
    }
}

/// Validates and collects author-supplied mindmap positions.
///
/// # Errors
///
/// Returns [`DescriptionError::MissingCoordinates`] for any node (center
/// included) without both coordinates.
pub fn layout(description: &MindmapDescription) -> Result<Layout, DescriptionError> {
    let center = description.center_node.position("mindmap")?;

    let mut nodes = IndexMap::with_capacity(description.nodes.len());
    for node in &description.nodes {
        nodes.insert(node.id, node.position("mindmap")?);
    }

    Ok(Layout { center, nodes })
}
