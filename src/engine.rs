//! Mode controller and gesture dispatch.
//!
//! [`Engine`] ties the pieces together: it keeps the diagram text, the live
//! [`GraphStore`], the current [`Mode`], and the active text edit. The host
//! forwards text changes, toolbar controls, and renderer callbacks to it, and
//! processes the returned [`Action`]s (repaint, show an error, tell the user
//! their direct edits were dropped).
//!
//! In [`Mode::Declarative`] the text is authoritative: every change re-parses
//! and replaces the model, and structural gestures are ignored. In
//! [`Mode::DirectEdit`] gestures drive the model and the text is only kept.
//! Switching back to declarative re-parses the last text and throws away
//! whatever was edited directly; nothing flows from the model back into text.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::doc::{EdgeChange, GraphStore, NodeChange, Snapshot};
use crate::edit::{ActiveEdit, EditField, EditKey, KeyOutcome};
use crate::ids::IdGen;
use crate::input::{Connection, Modifiers};
use crate::layout::{self, LayoutConfig};
use crate::model::{EdgeId, NodeId, NodeKind, Position};
use crate::ops::{self, Op, Placement};
use crate::parse::{self, ParseError};
use crate::render::Scene;
use crate::samples::Sample;

/// Who may write to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The diagram text drives the model.
    #[default]
    Declarative,
    /// Gestures and controls drive the model.
    DirectEdit,
}

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The model was rebuilt from text.
    DiagramLoaded { nodes: usize, edges: usize },
    /// The text did not parse; the previous model is still shown.
    ParseFailed(ParseError),
    NodeAdded { id: NodeId },
    /// A node and the edges that went with it were removed.
    NodeDeleted { id: NodeId, edges: Vec<EdgeId> },
    EdgeAdded { id: EdgeId },
    EdgeDeleted { id: EdgeId },
    NodeMoved { id: NodeId },
    NodeRelabeled { id: NodeId },
    Cleared,
    ModeChanged(Mode),
    /// Returning to declarative mode dropped this many direct changes.
    DirectEditsDiscarded { changes: u64 },
    EditStarted { id: NodeId },
    EditCancelled { id: NodeId },
    RenderNeeded,
}

/// The diagram session.
pub struct Engine<R = StdRng> {
    text: String,
    mode: Mode,
    store: GraphStore,
    ids: IdGen,
    rng: R,
    layout: LayoutConfig,
    parse_error: Option<ParseError>,
    active_edit: Option<ActiveEdit>,
    /// Model changes made since direct-edit mode was last entered.
    direct_changes: u64,
}

impl Engine<StdRng> {
    /// Create an empty engine in declarative mode.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_parts(config, IdGen::from_clock(), StdRng::from_os_rng())
    }
}

impl<R: Rng> Engine<R> {
    /// Create an engine with explicit id and randomness sources.
    #[must_use]
    pub fn with_parts(config: &Config, ids: IdGen, rng: R) -> Self {
        Self {
            text: String::new(),
            mode: Mode::Declarative,
            store: GraphStore::new(),
            ids,
            rng,
            layout: config.layout,
            parse_error: None,
            active_edit: None,
            direct_changes: 0,
        }
    }

    // --- Text ---

    /// Replace the diagram text. In declarative mode this re-parses.
    pub fn set_text(&mut self, text: impl Into<String>) -> Vec<Action> {
        self.text = text.into();
        match self.mode {
            Mode::Declarative => self.reload(),
            Mode::DirectEdit => Vec::new(),
        }
    }

    /// Replace the text with a sample diagram.
    pub fn load_sample(&mut self, sample: Sample) -> Vec<Action> {
        self.set_text(sample.text())
    }

    fn reload(&mut self) -> Vec<Action> {
        let mut diagram = match parse::parse_with(&self.text, &mut self.ids) {
            Ok(diagram) => diagram,
            Err(e) => return self.parse_failed(e),
        };
        layout::assign(&mut diagram, &self.layout);
        let (nodes, edges) = (diagram.nodes.len(), diagram.edges.len());
        if let Err(e) = self.store.replace(diagram) {
            tracing::warn!(error = %e, "parsed diagram rejected by store");
            return Vec::new();
        }
        self.parse_error = None;
        self.active_edit = None;
        vec![Action::DiagramLoaded { nodes, edges }, Action::RenderNeeded]
    }

    fn parse_failed(&mut self, e: ParseError) -> Vec<Action> {
        tracing::warn!(error = %e, "diagram text rejected; keeping previous model");
        self.parse_error = Some(e.clone());
        vec![Action::ParseFailed(e)]
    }

    // --- Mode ---

    /// Flip between declarative and direct-edit mode.
    pub fn toggle_mode(&mut self) -> Vec<Action> {
        let next = match self.mode {
            Mode::Declarative => Mode::DirectEdit,
            Mode::DirectEdit => Mode::Declarative,
        };
        self.set_mode(next)
    }

    /// Switch mode. Entering declarative mode re-parses the current text and
    /// replaces the model, dropping direct edits.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<Action> {
        if mode == self.mode {
            return Vec::new();
        }
        self.mode = mode;
        tracing::info!(?mode, "mode changed");
        let mut actions = vec![Action::ModeChanged(mode)];
        if mode == Mode::DirectEdit {
            self.direct_changes = 0;
        } else {
            self.active_edit = None;
            let changes = std::mem::take(&mut self.direct_changes);
            let reloaded = self.reload();
            let loaded = reloaded.iter().any(|a| matches!(a, Action::DiagramLoaded { .. }));
            if loaded && changes > 0 {
                tracing::info!(changes, "direct edits discarded");
                actions.push(Action::DirectEditsDiscarded { changes });
            }
            actions.extend(reloaded);
        }
        actions
    }

    fn direct_edit(&self, gesture: &str) -> bool {
        if self.mode == Mode::DirectEdit {
            return true;
        }
        tracing::debug!(gesture, "ignored outside direct-edit mode");
        false
    }

    // --- Renderer callbacks ---

    /// Anchor-to-anchor drag finished.
    pub fn on_connect(&mut self, connection: Connection) -> Vec<Action> {
        if !self.direct_edit("connect") {
            return Vec::new();
        }
        let current = self.store.current();
        let id = self
            .ids
            .edge_id(&connection.source, &connection.target, |candidate| current.contains_edge(candidate));
        self.run(Op::Connect { id, connection })
    }

    /// Click on empty canvas. Ctrl/Cmd-click adds a plain node at `at`.
    pub fn on_canvas_click(&mut self, modifiers: Modifiers, at: Position) -> Vec<Action> {
        if !modifiers.command() || !self.direct_edit("canvas-click") {
            return Vec::new();
        }
        self.add_node_at(NodeKind::Plain, Placement::Cursor(at))
    }

    /// Click on a node. Shift-click deletes it with its edges.
    pub fn on_node_click(&mut self, modifiers: Modifiers, id: &str) -> Vec<Action> {
        if !modifiers.shift || !self.direct_edit("node-click") {
            return Vec::new();
        }
        self.run(Op::DeleteNode { id: id.to_owned() })
    }

    /// Click on an edge. Shift-click deletes it.
    pub fn on_edge_click(&mut self, modifiers: Modifiers, id: &str) -> Vec<Action> {
        if !modifiers.shift || !self.direct_edit("edge-click") {
            return Vec::new();
        }
        self.run(Op::DeleteEdge { id: id.to_owned() })
    }

    /// Double-click on a node's text starts an in-place edit.
    pub fn on_node_double_click(&mut self, id: &str) -> Vec<Action> {
        self.begin_edit(id)
    }

    /// Renderer node deltas. Drags and selection are accepted in either
    /// mode and, in declarative mode, last until the next re-parse. Removals
    /// only apply in direct-edit mode.
    pub fn on_nodes_change(&mut self, changes: &[NodeChange]) -> Vec<Action> {
        let structural = self.mode == Mode::DirectEdit;
        let accepted: Vec<NodeChange> = changes
            .iter()
            .filter(|c| !matches!(c, NodeChange::Remove { .. }) || self.direct_edit("remove-delta"))
            .cloned()
            .collect();
        let current = self.store.current();
        let removed: Vec<(NodeId, Vec<EdgeId>)> = accepted
            .iter()
            .filter_map(|c| match c {
                NodeChange::Remove { id } if current.contains_node(id) => {
                    Some((id.clone(), self.incident_edge_ids(id)))
                }
                _ => None,
            })
            .collect();
        let edits = accepted
            .iter()
            .filter(|c| match c {
                NodeChange::Position { id, position } => current.node(id).is_some_and(|n| n.position != *position),
                NodeChange::Remove { id } => current.contains_node(id),
                NodeChange::Select { .. } => false,
            })
            .count();
        if !self.store.apply_node_changes(&accepted) {
            return Vec::new();
        }
        if structural {
            self.direct_changes = self.direct_changes.saturating_add(u64::try_from(edits).unwrap_or(u64::MAX));
        }
        self.drop_edit_if_gone();
        let mut actions: Vec<Action> = removed
            .into_iter()
            .map(|(id, edges)| Action::NodeDeleted { id, edges })
            .collect();
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Renderer edge deltas. Selection is accepted in either mode; removals
    /// only apply in direct-edit mode.
    pub fn on_edges_change(&mut self, changes: &[EdgeChange]) -> Vec<Action> {
        let accepted: Vec<EdgeChange> = changes
            .iter()
            .filter(|c| !matches!(c, EdgeChange::Remove { .. }) || self.direct_edit("remove-delta"))
            .cloned()
            .collect();
        let current = self.store.current();
        let removals = accepted
            .iter()
            .filter(|c| matches!(c, EdgeChange::Remove { id } if current.contains_edge(id)))
            .count();
        if !self.store.apply_edge_changes(&accepted) {
            return Vec::new();
        }
        self.direct_changes = self.direct_changes.saturating_add(u64::try_from(removals).unwrap_or(u64::MAX));
        vec![Action::RenderNeeded]
    }

    // --- Controls ---

    /// Toolbar add: a node of `kind` dropped somewhere in its scatter band.
    pub fn add_node(&mut self, kind: NodeKind) -> Vec<Action> {
        if !self.direct_edit("add-node") {
            return Vec::new();
        }
        self.add_node_at(kind, Placement::Scatter)
    }

    /// Move a node programmatically.
    pub fn move_node(&mut self, id: &str, position: Position) -> Vec<Action> {
        if !self.direct_edit("move-node") {
            return Vec::new();
        }
        self.run(Op::Reposition { id: id.to_owned(), position })
    }

    /// Remove every node and edge.
    pub fn clear(&mut self) -> Vec<Action> {
        if !self.direct_edit("clear") {
            return Vec::new();
        }
        self.active_edit = None;
        self.run(Op::Clear)
    }

    fn add_node_at(&mut self, kind: NodeKind, placement: Placement) -> Vec<Action> {
        let current = self.store.current();
        let ordinal = current.nodes().len() + 1;
        let id = self.ids.node_id(kind, |candidate| current.contains_node(candidate));
        let node = ops::new_node(id, kind, ordinal, placement, &mut self.rng);
        self.run(Op::AddNode(node))
    }

    // --- Text editing ---

    /// Start editing `id`'s label and description. Any other edit in
    /// progress is committed first.
    pub fn begin_edit(&mut self, id: &str) -> Vec<Action> {
        if !self.direct_edit("begin-edit") {
            return Vec::new();
        }
        if !self.store.current().contains_node(id) {
            tracing::debug!(node_id = %id, "edit requested for unknown node");
            return Vec::new();
        }
        // Commit first so a re-edit of the same node seeds from the committed text.
        let mut actions = self.commit_edit();
        if let Some(node) = self.store.current().node(id) {
            self.active_edit = Some(ActiveEdit::begin(node));
            actions.push(Action::EditStarted { id: id.to_owned() });
        }
        actions
    }

    /// Replace a draft in the active edit.
    pub fn update_edit(&mut self, field: EditField, text: impl Into<String>) -> bool {
        self.active_edit.as_mut().is_some_and(|edit| edit.set(field, text))
    }

    /// Key pressed inside the editor.
    pub fn edit_key(&mut self, key: EditKey) -> Vec<Action> {
        let Some(edit) = &self.active_edit else {
            return Vec::new();
        };
        match edit.outcome(key) {
            KeyOutcome::Commit => self.commit_edit(),
            KeyOutcome::Cancel => self.cancel_edit(),
            KeyOutcome::Ignore => Vec::new(),
        }
    }

    /// Editor lost focus: commit.
    pub fn blur_edit(&mut self) -> Vec<Action> {
        self.commit_edit()
    }

    /// Drop the active edit without touching the model.
    pub fn cancel_edit(&mut self) -> Vec<Action> {
        match self.active_edit.take() {
            Some(edit) => vec![Action::EditCancelled { id: edit.node_id().to_owned() }],
            None => Vec::new(),
        }
    }

    fn commit_edit(&mut self) -> Vec<Action> {
        match self.active_edit.take() {
            Some(edit) => self.run(edit.into_op()),
            None => Vec::new(),
        }
    }

    fn drop_edit_if_gone(&mut self) {
        let gone = self
            .active_edit
            .as_ref()
            .is_some_and(|edit| !self.store.current().contains_node(edit.node_id()));
        if gone {
            self.active_edit = None;
        }
    }

    // --- Apply ---

    fn run(&mut self, op: Op) -> Vec<Action> {
        let removed_edges = match &op {
            Op::DeleteNode { id } => self.incident_edge_ids(id),
            _ => Vec::new(),
        };
        match self.store.apply(&op) {
            Ok(true) => {}
            Ok(false) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "mutation rejected");
                return Vec::new();
            }
        }
        if self.mode == Mode::DirectEdit {
            self.direct_changes = self.direct_changes.saturating_add(1);
        }
        self.drop_edit_if_gone();
        let action = match op {
            Op::AddNode(node) => Action::NodeAdded { id: node.id },
            Op::DeleteNode { id } => Action::NodeDeleted { id, edges: removed_edges },
            Op::DeleteEdge { id } => Action::EdgeDeleted { id },
            Op::Connect { id, .. } => Action::EdgeAdded { id },
            Op::Reposition { id, .. } => Action::NodeMoved { id },
            Op::Relabel { id, .. } => Action::NodeRelabeled { id },
            Op::Clear => Action::Cleared,
        };
        tracing::debug!(?action, revision = self.store.revision(), "mutation applied");
        vec![action, Action::RenderNeeded]
    }

    fn incident_edge_ids(&self, node_id: &str) -> Vec<EdgeId> {
        self.store.current().incident_edges(node_id).map(|e| e.id.clone()).collect()
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shared handle to the current model.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store.snapshot()
    }

    #[must_use]
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// The error from the last failed parse, cleared by the next success.
    #[must_use]
    pub fn parse_error(&self) -> Option<&ParseError> {
        self.parse_error.as_ref()
    }

    #[must_use]
    pub fn active_edit(&self) -> Option<&ActiveEdit> {
        self.active_edit.as_ref()
    }

    /// The scene the renderer should draw now.
    #[must_use]
    pub fn scene(&self) -> Scene {
        Scene::build(self.store.current())
    }
}
