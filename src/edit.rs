//! In-place text edit session for a node's label and description.
//!
//! At most one edit is active at a time and the engine owns it. Drafts live
//! here, not on the node, so cancelling is just dropping the session.

#[cfg(test)]
#[path = "edit_test.rs"]
mod edit_test;

use crate::model::{Node, NodeId, NodeKind};
use crate::ops::Op;

/// Which draft a keystroke goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Label,
    Description,
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter { shift: bool },
    Escape,
}

/// What a key does to the active edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Commit,
    Cancel,
    Ignore,
}

/// An edit in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEdit {
    node_id: NodeId,
    kind: NodeKind,
    label: String,
    description: String,
    original_description: Option<String>,
}

impl ActiveEdit {
    /// Start editing `node`, seeding drafts from its current text.
    #[must_use]
    pub fn begin(node: &Node) -> Self {
        Self {
            node_id: node.id.clone(),
            kind: node.kind,
            label: node.label.clone(),
            description: node.description.clone().unwrap_or_default(),
            original_description: node.description.clone(),
        }
    }

    #[must_use]
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replace a draft. Description drafts are ignored for kinds that only
    /// edit a label. Returns whether the draft was accepted.
    pub fn set(&mut self, field: EditField, text: impl Into<String>) -> bool {
        match field {
            EditField::Label => {
                self.label = text.into();
                true
            }
            EditField::Description if self.kind.edits_description() => {
                self.description = text.into();
                true
            }
            EditField::Description => false,
        }
    }

    /// Classify a key press. Shift+Enter inserts nothing and commits nothing
    /// in two-field editors; a decision's single field commits on any Enter.
    #[must_use]
    pub fn outcome(&self, key: EditKey) -> KeyOutcome {
        match key {
            EditKey::Escape => KeyOutcome::Cancel,
            EditKey::Enter { shift } if shift && self.kind.edits_description() => KeyOutcome::Ignore,
            EditKey::Enter { .. } => KeyOutcome::Commit,
        }
    }

    /// Turn the drafts into a relabel operation.
    ///
    /// An empty description draft on a node that had no description keeps it
    /// absent rather than setting it to the empty string.
    #[must_use]
    pub fn into_op(self) -> Op {
        let description = if !self.kind.edits_description() {
            self.original_description
        } else if self.description.is_empty() && self.original_description.is_none() {
            None
        } else {
            Some(self.description)
        };
        Op::Relabel { id: self.node_id, label: self.label, description }
    }
}
