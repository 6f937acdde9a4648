//! Level-grid layout for hierarchy diagrams.
//!
//! Nodes are grouped by their integer level. A first pass finds the widest
//! row; a second pass centers every row inside that width, so a lone root
//! sits exactly above the midpoint of a wider child row regardless of the
//! order levels appear in the input. Within a level, x-order follows input
//! order, with no sorting.

use indexmap::IndexMap;

use vizier_core::description::{DescriptionError, HierarchyNode};
use vizier_core::geometry::{Point, Size};
use vizier_core::identifier::Id;

use crate::config::HierarchyMetrics;
use crate::layout::PlacedNode;

/// The computed hierarchy layout.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Placements in input order.
    pub placements: IndexMap<Id, PlacedNode>,
    /// Canvas size needed to contain all rows plus padding.
    pub size: Size,
}

impl Layout {
    pub fn get(&self, id: Id) -> Option<&PlacedNode> {
        self.placements.get(&id)
    }
}

/// Computes the level-grid layout for the given nodes.
///
/// # Errors
///
/// Returns [`DescriptionError::Empty`] when `nodes` is empty.
pub fn layout(
    nodes: &[HierarchyNode],
    metrics: &HierarchyMetrics,
) -> Result<Layout, DescriptionError> {
    if nodes.is_empty() {
        return Err(DescriptionError::Empty {
            diagram: "hierarchy",
            what: "nodes",
        });
    }

    // Group nodes by level, keeping input order within each level.
    let mut levels: IndexMap<u32, Vec<&HierarchyNode>> = IndexMap::new();
    for node in nodes {
        levels.entry(node.level).or_default().push(node);
    }
    levels.sort_keys();

    let row_width = |count: usize| {
        count as f32 * (metrics.node_width + metrics.node_spacing) - metrics.node_spacing
    };

    // Pass 1: the widest row defines the horizontal extent.
    let max_width = levels
        .values()
        .map(|row| row_width(row.len()))
        .fold(0.0_f32, f32::max);

    // Pass 2: center each row inside the widest one.
    let node_size = Size::new(metrics.node_width, metrics.node_height);
    let mut placements = IndexMap::with_capacity(nodes.len());
    let mut max_level = 0;

    for (&level, row) in &levels {
        max_level = max_level.max(level);
        let level_width = row_width(row.len());
        let start_x = (max_width - level_width) / 2.0 + metrics.node_width / 2.0;
        let y = level as f32 * metrics.level_height + metrics.top_margin;

        for (index, node) in row.iter().enumerate() {
            let x = start_x + index as f32 * (metrics.node_width + metrics.node_spacing);
            placements.insert(node.id, PlacedNode::new(Point::new(x, y), node_size));
        }
    }

    let size = Size::new(
        max_width + metrics.canvas_padding,
        max_level as f32 * metrics.level_height + metrics.node_height + metrics.canvas_padding,
    );

    Ok(Layout { placements, size })
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn node(id: &str, level: u32, parent: Option<&str>) -> HierarchyNode {
        HierarchyNode {
            id: Id::new(id),
            label: id.to_string(),
            level,
            parent: parent.map(Id::new),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_empty_is_an_error() {
        let err = layout(&[], &HierarchyMetrics::default()).unwrap_err();
        assert!(matches!(err, DescriptionError::Empty { .. }));
    }

    #[test]
    fn test_root_centered_above_two_children() {
        let nodes = vec![
            node("root", 0, None),
            node("a", 1, Some("root")),
            node("b", 1, Some("root")),
        ];
        let layout = layout(&nodes, &HierarchyMetrics::default()).unwrap();

        let root = layout.get(Id::new("root")).unwrap();
        let a = layout.get(Id::new("a")).unwrap();
        let b = layout.get(Id::new("b")).unwrap();

        // Root sits centered above the pair.
        assert_approx_eq!(
            f32,
            root.center.x(),
            (a.center.x() + b.center.x()) / 2.0
        );
        assert!(root.center.y() < a.center.y());

        // Children's horizontal spans are disjoint.
        assert!(!a.bounds().overlaps_horizontally(&b.bounds()));
    }

    #[test]
    fn test_rows_centered_even_when_widest_level_comes_last() {
        // Input lists the narrow level first; a single-pass running maximum
        // would fail to center it.
        let nodes = vec![
            node("root", 0, None),
            node("a", 1, Some("root")),
            node("b", 1, Some("root")),
            node("c", 1, Some("root")),
        ];
        let layout = layout(&nodes, &HierarchyMetrics::default()).unwrap();

        let metrics = HierarchyMetrics::default();
        let max_width = 3.0 * (metrics.node_width + metrics.node_spacing) - metrics.node_spacing;
        let root = layout.get(Id::new("root")).unwrap();
        assert_approx_eq!(f32, root.center.x(), max_width / 2.0);
    }

    #[test]
    fn test_input_order_preserved_within_level() {
        let nodes = vec![
            node("z", 1, None),
            node("a", 1, None),
            node("m", 1, None),
        ];
        let layout = layout(&nodes, &HierarchyMetrics::default()).unwrap();
        let xs: Vec<f32> = ["z", "a", "m"]
            .iter()
            .map(|id| layout.get(Id::new(id)).unwrap().center.x())
            .collect();
        assert!(xs[0] < xs[1] && xs[1] < xs[2]);
    }

    #[test]
    fn test_vertical_position_follows_level() {
        let metrics = HierarchyMetrics::default();
        let nodes = vec![node("r", 0, None), node("c", 2, None)];
        let layout = layout(&nodes, &metrics).unwrap();
        let r = layout.get(Id::new("r")).unwrap();
        let c = layout.get(Id::new("c")).unwrap();
        assert_approx_eq!(f32, r.center.y(), metrics.top_margin);
        assert_approx_eq!(
            f32,
            c.center.y(),
            2.0 * metrics.level_height + metrics.top_margin
        );
    }
}
