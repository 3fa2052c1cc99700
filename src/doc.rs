//! Graph model store: immutable snapshots and the live store that owns one.
//!
//! A [`Snapshot`] is a consistent `(nodes, edges)` pair plus selection. It is
//! never edited in place; replacements, renderer deltas, and mutation
//! operations all build a new snapshot and swap it in. The renderer holds an
//! `Arc<Snapshot>` and sees either the old state or the new one, never a mix.
//!
//! Two write paths exist:
//!
//! - full replacement (`set_nodes`, `set_edges`, `replace`) for parser output,
//! - deltas (`apply_node_changes`, `apply_edge_changes`) for drag and
//!   selection reported by the renderer, and `apply` for mutation operations.
//!
//! Every path bumps `revision` when the snapshot actually changed.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{Diagram, Edge, EdgeId, HandleId, Node, NodeId, Position};
use crate::ops::{self, Op, OpError};

// =============================================================================
// SNAPSHOT
// =============================================================================

/// One consistent state of the diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    selected_nodes: BTreeSet<NodeId>,
    selected_edges: BTreeSet<EdgeId>,
}

/// A structural oddity tolerated in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// An edge endpoint names a node that is not in the snapshot.
    DanglingEndpoint { edge_id: EdgeId, node_id: NodeId },
    /// An edge names a handle outside the anchor vocabulary.
    UnknownHandle { edge_id: EdgeId, handle: String },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingEndpoint { edge_id, node_id } => {
                write!(f, "edge `{edge_id}` references missing node `{node_id}`")
            }
            Self::UnknownHandle { edge_id, handle } => {
                write!(f, "edge `{edge_id}` uses unknown handle `{handle}`")
            }
        }
    }
}

impl Snapshot {
    /// Build a snapshot, rejecting duplicate node or edge ids.
    ///
    /// # Errors
    ///
    /// Returns [`OpError::DuplicateNode`] or [`OpError::DuplicateEdge`].
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, OpError> {
        ensure_unique(nodes.iter().map(|n| n.id.as_str())).map_err(OpError::DuplicateNode)?;
        ensure_unique(edges.iter().map(|e| e.id.as_str())).map_err(OpError::DuplicateEdge)?;
        Ok(Self { nodes, edges, selected_nodes: BTreeSet::new(), selected_edges: BTreeSet::new() })
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    #[must_use]
    pub fn contains_edge(&self, id: &str) -> bool {
        self.edge(id).is_some()
    }

    /// Edges whose source or target is `node_id`.
    pub fn incident_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.touches(node_id))
    }

    /// Edges with at least one endpoint missing from the snapshot.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter(|e| !self.contains_node(&e.source) || !self.contains_node(&e.target))
    }

    /// Every tolerated structural oddity, in edge order.
    #[must_use]
    pub fn anomalies(&self) -> Vec<Anomaly> {
        let mut out = Vec::new();
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !self.contains_node(endpoint) {
                    out.push(Anomaly::DanglingEndpoint { edge_id: edge.id.clone(), node_id: endpoint.clone() });
                }
            }
            for handle in [&edge.source_handle, &edge.target_handle].into_iter().flatten() {
                if let HandleId::Other(raw) = handle {
                    out.push(Anomaly::UnknownHandle { edge_id: edge.id.clone(), handle: raw.clone() });
                }
            }
        }
        out
    }

    #[must_use]
    pub fn is_node_selected(&self, id: &str) -> bool {
        self.selected_nodes.contains(id)
    }

    #[must_use]
    pub fn is_edge_selected(&self, id: &str) -> bool {
        self.selected_edges.contains(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    // --- Builders used by reducers. Each returns a fresh snapshot. ---

    pub(crate) fn with_nodes(&self, nodes: Vec<Node>) -> Self {
        let mut next = Self { nodes, edges: self.edges.clone(), ..Self::default() };
        next.selected_nodes = self.selected_nodes.iter().filter(|id| next.contains_node(id)).cloned().collect();
        next.selected_edges.clone_from(&self.selected_edges);
        next
    }

    pub(crate) fn with_edges(&self, edges: Vec<Edge>) -> Self {
        let mut next = Self { nodes: self.nodes.clone(), edges, ..Self::default() };
        next.selected_nodes.clone_from(&self.selected_nodes);
        next.selected_edges = self.selected_edges.iter().filter(|id| next.contains_edge(id)).cloned().collect();
        next
    }

    pub(crate) fn without_node(&self, id: &str) -> Self {
        let nodes = self.nodes.iter().filter(|n| n.id != id).cloned().collect();
        let edges = self.edges.iter().filter(|e| !e.touches(id)).cloned().collect();
        self.with_nodes(nodes).with_edges(edges)
    }

    pub(crate) fn without_edge(&self, id: &str) -> Self {
        self.with_edges(self.edges.iter().filter(|e| e.id != id).cloned().collect())
    }

    pub(crate) fn map_node(&self, id: &str, f: impl FnOnce(&mut Node)) -> Self {
        let mut nodes = self.nodes.clone();
        if let Some(node) = nodes.iter_mut().find(|n| n.id == id) {
            f(node);
        }
        Self { nodes, ..self.clone() }
    }
}

fn ensure_unique<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), String> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(id.to_owned());
        }
    }
    Ok(())
}

// =============================================================================
// RENDERER DELTAS
// =============================================================================

/// A node change reported by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeChange {
    /// The node was dragged.
    Position { id: NodeId, position: Position },
    /// The node was selected or deselected.
    Select { id: NodeId, selected: bool },
    /// The node was removed (e.g. a delete key in the renderer).
    Remove { id: NodeId },
}

/// An edge change reported by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EdgeChange {
    Select { id: EdgeId, selected: bool },
    Remove { id: EdgeId },
}

// =============================================================================
// STORE
// =============================================================================

/// The live diagram the renderer observes.
#[derive(Debug, Default)]
pub struct GraphStore {
    current: Arc<Snapshot>,
    revision: u64,
}

impl GraphStore {
    /// Create an empty store at revision 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    /// Borrow the current snapshot.
    #[must_use]
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// Counter bumped on every change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace all nodes. Edges are kept even if they now dangle.
    ///
    /// # Errors
    ///
    /// Returns [`OpError::DuplicateNode`] and leaves the store untouched if
    /// two nodes share an id.
    pub fn set_nodes(&mut self, nodes: Vec<Node>) -> Result<(), OpError> {
        ensure_unique(nodes.iter().map(|n| n.id.as_str())).map_err(OpError::DuplicateNode)?;
        let next = self.current.with_nodes(nodes);
        self.commit(next);
        Ok(())
    }

    /// Replace all edges.
    ///
    /// # Errors
    ///
    /// Returns [`OpError::DuplicateEdge`] and leaves the store untouched if
    /// two edges share an id.
    pub fn set_edges(&mut self, edges: Vec<Edge>) -> Result<(), OpError> {
        ensure_unique(edges.iter().map(|e| e.id.as_str())).map_err(OpError::DuplicateEdge)?;
        let next = self.current.with_edges(edges);
        self.commit(next);
        Ok(())
    }

    /// Replace nodes and edges together with a parsed diagram. Selection is
    /// cleared.
    ///
    /// # Errors
    ///
    /// Returns a duplicate-id error and leaves the store untouched.
    pub fn replace(&mut self, diagram: Diagram) -> Result<(), OpError> {
        let next = Snapshot::new(diagram.nodes, diagram.edges)?;
        let dangling = next.dangling_edges().count();
        if dangling > 0 {
            tracing::debug!(dangling, "diagram installed with dangling edges");
        }
        self.commit(next);
        Ok(())
    }

    /// Apply a mutation operation atomically.
    ///
    /// Returns `Ok(false)` when the operation was valid but changed nothing.
    ///
    /// # Errors
    ///
    /// Returns the operation's [`OpError`]; the store is untouched.
    pub fn apply(&mut self, op: &Op) -> Result<bool, OpError> {
        match ops::apply(&self.current, op)? {
            Some(next) if next != *self.current => {
                self.commit(next);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Apply renderer node deltas. Removing a node also removes its edges.
    /// Unknown ids are skipped. Returns whether anything changed.
    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) -> bool {
        let mut next = (*self.current).clone();
        let mut changed = false;
        for change in changes {
            let id = match change {
                NodeChange::Position { id, .. } | NodeChange::Select { id, .. } | NodeChange::Remove { id } => id,
            };
            if !next.contains_node(id) {
                tracing::debug!(node_id = %id, "node change for unknown node ignored");
                continue;
            }
            let applied = match change {
                NodeChange::Position { id, position } => {
                    let moved = next.node(id).is_some_and(|n| n.position != *position);
                    if moved {
                        next = next.map_node(id, |n| n.position = *position);
                    }
                    moved
                }
                NodeChange::Select { id, selected } => {
                    if *selected {
                        next.selected_nodes.insert(id.clone())
                    } else {
                        next.selected_nodes.remove(id)
                    }
                }
                NodeChange::Remove { id } => {
                    next = next.without_node(id);
                    true
                }
            };
            changed |= applied;
        }
        if changed {
            self.commit(next);
        }
        changed
    }

    /// Apply renderer edge deltas. Unknown ids are skipped. Returns whether
    /// anything changed.
    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) -> bool {
        let mut next = (*self.current).clone();
        let mut changed = false;
        for change in changes {
            let id = match change {
                EdgeChange::Select { id, .. } | EdgeChange::Remove { id } => id,
            };
            if !next.contains_edge(id) {
                tracing::debug!(edge_id = %id, "edge change for unknown edge ignored");
                continue;
            }
            let applied = match change {
                EdgeChange::Select { id, selected } => {
                    if *selected {
                        next.selected_edges.insert(id.clone())
                    } else {
                        next.selected_edges.remove(id)
                    }
                }
                EdgeChange::Remove { id } => {
                    next = next.without_edge(id);
                    true
                }
            };
            changed |= applied;
        }
        if changed {
            self.commit(next);
        }
        changed
    }

    /// Install `next` as the current snapshot.
    pub fn commit(&mut self, next: Snapshot) {
        self.current = Arc::new(next);
        self.revision = self.revision.wrapping_add(1);
    }
}
