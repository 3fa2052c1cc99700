//! Diagram model: nodes, edges, connection anchors, and edge styling.
//!
//! These are the value types every other layer passes around. The parser
//! produces them from text, the store holds them in snapshots, mutation
//! operations rebuild them, and the scene builder reads them for the renderer.
//! Nothing here knows about modes or gestures.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::consts::{CONNECT_EDGE_COLOR, DASH_PATTERN, DEFAULT_EDGE_COLOR, DEFAULT_STROKE_WIDTH, SCATTER_BAND};

/// Identifier of a node, unique within one diagram.
pub type NodeId = String;

/// Identifier of an edge, unique within one diagram.
pub type EdgeId = String;

/// Opaque attributes carried on a node without interpretation.
pub type Attrs = Map<String, Value>;

// =============================================================================
// NODES
// =============================================================================

/// Visual variant of a node. Only the rendered shape differs between kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Rounded rectangle with label and optional description.
    #[default]
    Plain,
    /// Diamond carrying a single label.
    Decision,
    /// Tinted rectangle with label and optional description.
    Process,
}

impl NodeKind {
    /// All kinds, in toolbar order.
    pub const ALL: [Self; 3] = [Self::Plain, Self::Process, Self::Decision];

    /// Map a `type` value from diagram text to a kind.
    ///
    /// `default` is accepted as an alias for `plain`; anything unrecognized
    /// (or absent) falls back to `plain`.
    #[must_use]
    pub fn from_type_name(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("decision") => Self::Decision,
            Some("process") => Self::Process,
            _ => Self::Plain,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Decision => "decision",
            Self::Process => "process",
        }
    }

    /// Node type name the renderer registers its components under.
    #[must_use]
    pub fn renderer_type(self) -> &'static str {
        match self {
            Self::Plain => "default",
            Self::Decision => "decision",
            Self::Process => "process",
        }
    }

    /// Prefix for ids of nodes created by direct manipulation.
    #[must_use]
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Plain => "node",
            Self::Decision => "decision",
            Self::Process => "process",
        }
    }

    /// Description given to freshly added nodes of this kind.
    #[must_use]
    pub fn default_description(self) -> Option<&'static str> {
        match self {
            Self::Plain => Some("Click to edit"),
            Self::Process => Some("New process step"),
            Self::Decision => None,
        }
    }

    /// Whether the in-place editor exposes a description field.
    #[must_use]
    pub fn edits_description(self) -> bool {
        !matches!(self, Self::Decision)
    }

    /// Lower bound of the band scattered nodes of this kind land in.
    ///
    /// Kinds are staggered so that repeated toolbar adds of different kinds
    /// do not pile up on top of each other.
    #[must_use]
    pub fn scatter_origin(self) -> f64 {
        match self {
            Self::Plain => SCATTER_BAND,
            Self::Decision => SCATTER_BAND + 100.0,
            Self::Process => SCATTER_BAND + 200.0,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 2-D point in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A diagram node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id within the diagram.
    pub id: NodeId,
    /// Visual variant.
    pub kind: NodeKind,
    /// Top-left corner in world coordinates.
    pub position: Position,
    /// Primary display text.
    pub label: String,
    /// Secondary display text. `None` and `Some("")` are different states.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extra attributes forwarded from input untouched.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Attrs,
}

impl Node {
    /// Create a node at the origin with no description or extra attributes.
    #[must_use]
    pub fn new(id: impl Into<NodeId>, kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            position: Position::default(),
            label: label.into(),
            description: None,
            data: Attrs::new(),
        }
    }

    /// Builder-style position setter.
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Builder-style description setter.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// =============================================================================
// HANDLES
// =============================================================================

/// Side of a node an anchor sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Whether an anchor accepts incoming or emits outgoing connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleRole {
    Target,
    Source,
}

/// One of the eight fixed connection points on every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub side: Side,
    pub role: HandleRole,
}

impl Anchor {
    /// The full anchor vocabulary, target before source on each side.
    pub const ALL: [Self; 8] = [
        Self::new(Side::Top, HandleRole::Target),
        Self::new(Side::Top, HandleRole::Source),
        Self::new(Side::Bottom, HandleRole::Target),
        Self::new(Side::Bottom, HandleRole::Source),
        Self::new(Side::Left, HandleRole::Target),
        Self::new(Side::Left, HandleRole::Source),
        Self::new(Side::Right, HandleRole::Target),
        Self::new(Side::Right, HandleRole::Source),
    ];

    #[must_use]
    pub const fn new(side: Side, role: HandleRole) -> Self {
        Self { side, role }
    }

    /// Wire identifier, e.g. `"top-target"`.
    #[must_use]
    pub fn id(self) -> &'static str {
        match (self.side, self.role) {
            (Side::Top, HandleRole::Target) => "top-target",
            (Side::Top, HandleRole::Source) => "top-source",
            (Side::Bottom, HandleRole::Target) => "bottom-target",
            (Side::Bottom, HandleRole::Source) => "bottom-source",
            (Side::Left, HandleRole::Target) => "left-target",
            (Side::Left, HandleRole::Source) => "left-source",
            (Side::Right, HandleRole::Target) => "right-target",
            (Side::Right, HandleRole::Source) => "right-source",
        }
    }

    /// Look up an anchor by its wire identifier.
    #[must_use]
    pub fn from_id(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|anchor| anchor.id() == raw)
    }

    /// Fractional offset along the side, measured from the top or left edge.
    ///
    /// Target anchors sit before source anchors so both stay grabbable.
    /// Diamonds pull the pair toward the middle, where the rotated edge is.
    #[must_use]
    pub fn offset(self, kind: NodeKind) -> f64 {
        match (kind, self.role) {
            (NodeKind::Decision, HandleRole::Target) => 0.4,
            (NodeKind::Decision, HandleRole::Source) => 0.6,
            (_, HandleRole::Target) => 0.25,
            (_, HandleRole::Source) => 0.75,
        }
    }
}

/// Handle reference on an edge endpoint.
///
/// Unknown identifiers are kept verbatim so the renderer can decide how to
/// fall back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HandleId {
    Anchor(Anchor),
    Other(String),
}

impl HandleId {
    /// Classify a raw identifier.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Anchor::from_id(raw).map_or_else(|| Self::Other(raw.to_owned()), Self::Anchor)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Anchor(anchor) => anchor.id(),
            Self::Other(raw) => raw,
        }
    }

    /// The anchor this handle names, if it is part of the vocabulary.
    #[must_use]
    pub fn anchor(&self) -> Option<Anchor> {
        match self {
            Self::Anchor(anchor) => Some(*anchor),
            Self::Other(_) => None,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        self.anchor().is_some()
    }
}

impl From<Anchor> for HandleId {
    fn from(anchor: Anchor) -> Self {
        Self::Anchor(anchor)
    }
}

impl From<String> for HandleId {
    fn from(raw: String) -> Self {
        match Anchor::from_id(&raw) {
            Some(anchor) => Self::Anchor(anchor),
            None => Self::Other(raw),
        }
    }
}

impl From<HandleId> for String {
    fn from(handle: HandleId) -> Self {
        match handle {
            HandleId::Anchor(anchor) => anchor.id().to_owned(),
            HandleId::Other(raw) => raw,
        }
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// EDGES
// =============================================================================

/// Stroke styling for an edge. Fixed once the edge exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    /// Stroke and arrowhead color as a hex string.
    pub color: String,
    /// Stroke width; always positive.
    pub stroke_width: f64,
    /// Dashed strokes render with [`DASH_PATTERN`].
    pub dashed: bool,
    /// Whether the renderer animates the stroke.
    pub animated: bool,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_EDGE_COLOR.to_owned(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            dashed: false,
            animated: false,
        }
    }
}

impl EdgeStyle {
    /// Style given to edges drawn by dragging between anchors.
    #[must_use]
    pub fn connected() -> Self {
        Self { color: CONNECT_EDGE_COLOR.to_owned(), ..Self::default() }
    }

    /// Dash pattern hint for the renderer; `None` means a solid line.
    #[must_use]
    pub fn dash_array(&self) -> Option<&'static str> {
        self.dashed.then_some(DASH_PATTERN)
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique id within the diagram.
    pub id: EdgeId,
    /// Node the edge leaves from.
    pub source: NodeId,
    /// Node the edge points at.
    pub target: NodeId,
    /// Anchor on the source node; `None` lets the renderer pick.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<HandleId>,
    /// Anchor on the target node; `None` lets the renderer pick.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<HandleId>,
    /// Text drawn along the edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub style: EdgeStyle,
}

impl Edge {
    /// Create an unlabeled edge with default style and unspecified handles.
    #[must_use]
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            label: None,
            style: EdgeStyle::default(),
        }
    }

    /// Whether either endpoint is `node_id`.
    #[must_use]
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// A parsed diagram before it enters the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Parallel to `nodes`: whether the text supplied the node's coordinates.
    pub explicit: Vec<bool>,
}

impl Diagram {
    /// Build a diagram where no node carries explicit coordinates.
    #[must_use]
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let explicit = vec![false; nodes.len()];
        Self { nodes, edges, explicit }
    }

    /// Whether the node at `index` had coordinates in the source text.
    #[must_use]
    pub fn is_explicit(&self, index: usize) -> bool {
        self.explicit.get(index).copied().unwrap_or(false)
    }
}
