//! Mutation operations: atomic, reducer-style edits of a [`Snapshot`].
//!
//! DESIGN
//! ======
//! Each [`Op`] is applied by [`apply`], which reads the current snapshot and
//! returns a new one (or `None` when the op is a no-op). Validation happens
//! before anything is built, so a rejected op never leaves a half-applied
//! state for the renderer to see.

#[cfg(test)]
#[path = "ops_test.rs"]
mod ops_test;

use rand::Rng;

use crate::consts::{CURSOR_OFFSET_X, CURSOR_OFFSET_Y, SCATTER_BAND};
use crate::doc::Snapshot;
use crate::input::Connection;
use crate::model::{Edge, EdgeId, EdgeStyle, Node, NodeId, NodeKind, Position};

// =============================================================================
// TYPES
// =============================================================================

/// An atomic edit of the diagram.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Append a node.
    AddNode(Node),
    /// Remove a node and every edge incident to it.
    DeleteNode { id: NodeId },
    /// Remove a single edge.
    DeleteEdge { id: EdgeId },
    /// Add an edge between two anchors.
    Connect { id: EdgeId, connection: Connection },
    /// Move a node.
    Reposition { id: NodeId, position: Position },
    /// Replace a node's label and description.
    Relabel { id: NodeId, label: String, description: Option<String> },
    /// Remove every node and edge.
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),
    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeId),
    #[error("duplicate node id: {0}")]
    DuplicateNode(NodeId),
    #[error("duplicate edge id: {0}")]
    DuplicateEdge(EdgeId),
}

/// Where a freshly added node goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Near a canvas click, offset so the cursor lands inside the node.
    Cursor(Position),
    /// Somewhere in the kind's scatter band.
    Scatter,
}

// =============================================================================
// APPLY
// =============================================================================

/// Apply `op` to `snapshot`.
///
/// Returns `Ok(None)` when the op is valid but would not change anything:
/// connecting two anchors that are already connected, moving a node onto its
/// own position, or relabeling with the current text.
///
/// # Errors
///
/// Returns [`OpError`] when the op names a missing node or edge, or would
/// introduce a duplicate id.
pub fn apply(snapshot: &Snapshot, op: &Op) -> Result<Option<Snapshot>, OpError> {
    match op {
        Op::AddNode(node) => {
            if snapshot.contains_node(&node.id) {
                return Err(OpError::DuplicateNode(node.id.clone()));
            }
            let mut nodes = snapshot.nodes().to_vec();
            nodes.push(node.clone());
            Ok(Some(snapshot.with_nodes(nodes)))
        }
        Op::DeleteNode { id } => {
            require_node(snapshot, id)?;
            Ok(Some(snapshot.without_node(id)))
        }
        Op::DeleteEdge { id } => {
            if !snapshot.contains_edge(id) {
                return Err(OpError::EdgeNotFound(id.clone()));
            }
            Ok(Some(snapshot.without_edge(id)))
        }
        Op::Connect { id, connection } => {
            require_node(snapshot, &connection.source)?;
            require_node(snapshot, &connection.target)?;
            if snapshot.edges().iter().any(|e| same_connection(e, connection)) {
                return Ok(None);
            }
            if snapshot.contains_edge(id) {
                return Err(OpError::DuplicateEdge(id.clone()));
            }
            let mut edges = snapshot.edges().to_vec();
            edges.push(connected_edge(id.clone(), connection));
            Ok(Some(snapshot.with_edges(edges)))
        }
        Op::Reposition { id, position } => {
            let node = require_node(snapshot, id)?;
            if node.position == *position {
                return Ok(None);
            }
            Ok(Some(snapshot.map_node(id, |n| n.position = *position)))
        }
        Op::Relabel { id, label, description } => {
            let node = require_node(snapshot, id)?;
            if node.label == *label && node.description == *description {
                return Ok(None);
            }
            Ok(Some(snapshot.map_node(id, |n| {
                n.label.clone_from(label);
                n.description.clone_from(description);
            })))
        }
        Op::Clear => {
            if snapshot.is_empty() {
                return Ok(None);
            }
            Ok(Some(Snapshot::default()))
        }
    }
}

fn require_node<'a>(snapshot: &'a Snapshot, id: &str) -> Result<&'a Node, OpError> {
    snapshot.node(id).ok_or_else(|| OpError::NodeNotFound(id.to_owned()))
}

fn same_connection(edge: &Edge, connection: &Connection) -> bool {
    edge.source == connection.source
        && edge.target == connection.target
        && edge.source_handle == connection.source_handle
        && edge.target_handle == connection.target_handle
}

fn connected_edge(id: EdgeId, connection: &Connection) -> Edge {
    Edge {
        id,
        source: connection.source.clone(),
        target: connection.target.clone(),
        source_handle: connection.source_handle.clone(),
        target_handle: connection.target_handle.clone(),
        label: None,
        style: EdgeStyle::connected(),
    }
}

// =============================================================================
// NODE FACTORY
// =============================================================================

/// Build a node for a direct-manipulation add.
///
/// `ordinal` is the 1-based position the node will take in the diagram and
/// shows up in the default label, `New Node <ordinal>`.
#[must_use]
pub fn new_node(id: NodeId, kind: NodeKind, ordinal: usize, placement: Placement, rng: &mut impl Rng) -> Node {
    let position = match placement {
        Placement::Cursor(at) => Position::new(at.x - CURSOR_OFFSET_X, at.y - CURSOR_OFFSET_Y),
        Placement::Scatter => {
            let origin = kind.scatter_origin();
            Position::new(
                origin + rng.random::<f64>() * SCATTER_BAND,
                origin + rng.random::<f64>() * SCATTER_BAND,
            )
        }
    };
    Node {
        id,
        kind,
        position,
        label: format!("New Node {ordinal}"),
        description: kind.default_description().map(str::to_owned),
        data: serde_json::Map::new(),
    }
}
