//! Flowchart connector routing and shape selection.
//!
//! Flowchart node coordinates are author-supplied; the layout work is
//! picking a shape per node kind and routing each connection as a straight
//! line between the source's bottom edge midpoint and the target's top edge
//! midpoint.

use std::collections::HashMap;

use vizier_core::description::{Connection, DescriptionError, FlowNode, FlowNodeKind};
use vizier_core::geometry::Point;
use vizier_core::identifier::Id;

use crate::config::FlowchartMetrics;

/// The rendered shape of a flowchart node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// Start and end nodes.
    Ellipse,
    /// Decision nodes.
    Diamond,
    /// Everything else.
    RoundedRect,
}

/// Maps a node kind to its shape.
pub fn shape_for(kind: FlowNodeKind) -> NodeShape {
    match kind {
        FlowNodeKind::Start | FlowNodeKind::End => NodeShape::Ellipse,
        FlowNodeKind::Decision => NodeShape::Diamond,
        FlowNodeKind::Process => NodeShape::RoundedRect,
    }
}

/// A routed connector with an optional label midpoint.
#[derive(Debug, Clone)]
pub struct Connector {
    pub from: Point,
    pub to: Point,
    pub label: Option<String>,
    pub label_pos: Point,
}

/// Routes every connection between author-positioned nodes.
///
/// # Errors
///
/// Returns [`DescriptionError::UnknownEndpoint`] when a connection names a
/// node id that does not exist.
pub fn route(
    nodes: &[FlowNode],
    connections: &[Connection],
    metrics: &FlowchartMetrics,
) -> Result<Vec<Connector>, DescriptionError> {
    let by_id: HashMap<Id, &FlowNode> = nodes.iter().map(|node| (node.id, node)).collect();

    let resolve = |id: Id, index: usize| {
        by_id
            .get(&id)
            .copied()
            .ok_or(DescriptionError::UnknownEndpoint {
                index,
                id: id.resolve(),
            })
    };

    connections
        .iter()
        .enumerate()
        .map(|(index, connection)| {
            let source = resolve(connection.from, index)?;
            let target = resolve(connection.to, index)?;

            let from = Point::new(source.x, source.y + metrics.node_half_height);
            let to = Point::new(target.x, target.y - metrics.node_half_height);

            Ok(Connector {
                from,
                to,
                label: connection.label.clone(),
                label_pos: Point::new(source.x, source.y).midpoint(Point::new(target.x, target.y)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn node(id: &str, kind: FlowNodeKind, x: f32, y: f32) -> FlowNode {
        FlowNode {
            id: Id::new(id),
            label: id.to_string(),
            kind,
            x,
            y,
        }
    }

    fn connection(from: &str, to: &str) -> Connection {
        Connection {
            from: Id::new(from),
            to: Id::new(to),
            label: None,
        }
    }

    #[test]
    fn test_shape_selection() {
        assert_eq!(shape_for(FlowNodeKind::Start), NodeShape::Ellipse);
        assert_eq!(shape_for(FlowNodeKind::End), NodeShape::Ellipse);
        assert_eq!(shape_for(FlowNodeKind::Decision), NodeShape::Diamond);
        assert_eq!(shape_for(FlowNodeKind::Process), NodeShape::RoundedRect);
    }

    #[test]
    fn test_connector_attaches_to_edge_midpoints() {
        let metrics = FlowchartMetrics::default();
        let nodes = vec![
            node("a", FlowNodeKind::Start, 400.0, 50.0),
            node("b", FlowNodeKind::Process, 400.0, 150.0),
        ];
        let connectors = route(&nodes, &[connection("a", "b")], &metrics).unwrap();

        assert_eq!(connectors.len(), 1);
        let connector = &connectors[0];
        assert_approx_eq!(f32, connector.from.x(), 400.0);
        assert_approx_eq!(f32, connector.from.y(), 50.0 + metrics.node_half_height);
        assert_approx_eq!(f32, connector.to.y(), 150.0 - metrics.node_half_height);
        assert_approx_eq!(f32, connector.label_pos.y(), 100.0);
    }

    #[test]
    fn test_unknown_endpoint_is_an_error() {
        let nodes = vec![node("a", FlowNodeKind::Start, 0.0, 0.0)];
        let err = route(
            &nodes,
            &[connection("a", "ghost")],
            &FlowchartMetrics::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DescriptionError::UnknownEndpoint { index: 0, .. }
        ));
    }
}
