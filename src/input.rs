//! Input model: modifier keys and the gesture payloads the renderer reports.
//!
//! The external canvas owns pointer handling. It reports finished gestures
//! back through the engine callbacks using these types: which modifier keys
//! were held, and which anchors a connect drag started and ended on.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::model::{HandleId, NodeId};

/// Keyboard modifier keys held during a click.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Shift only.
    #[must_use]
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }

    /// Ctrl only.
    #[must_use]
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Meta only.
    #[must_use]
    pub fn meta() -> Self {
        Self { meta: true, ..Self::default() }
    }

    /// Platform "command" modifier: Ctrl on most systems, Meta on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A completed anchor-to-anchor drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source: NodeId,
    #[serde(default)]
    pub source_handle: Option<HandleId>,
    pub target: NodeId,
    #[serde(default)]
    pub target_handle: Option<HandleId>,
}

impl Connection {
    /// Connection between two nodes with renderer-default handles.
    #[must_use]
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self { source: source.into(), source_handle: None, target: target.into(), target_handle: None }
    }

    /// Builder-style handle setter.
    #[must_use]
    pub fn via(mut self, source_handle: impl Into<HandleId>, target_handle: impl Into<HandleId>) -> Self {
        self.source_handle = Some(source_handle.into());
        self.target_handle = Some(target_handle.into());
        self
    }
}
