//! Diagram parser: JSON diagram text into a [`Diagram`].
//!
//! The parser is a pure function of its input apart from edge ids it has to
//! synthesize. It checks the document shape and id uniqueness but not whether
//! edge endpoints exist; a dangling edge parses fine and is left for the
//! scene builder to skip.
//!
//! Accepted document:
//!
//! ```json
//! {
//!   "nodes": [{ "id": "a", "type": "process", "label": "A",
//!               "data": { "description": "...", "any": "thing" } }],
//!   "edges": [{ "id": "e1", "source": "a", "target": "b",
//!               "sourceHandle": "right-source", "targetHandle": "left-target",
//!               "label": "go", "color": "#3b82f6", "strokeWidth": 3,
//!               "dashed": true, "animated": false }]
//! }
//! ```

#[cfg(test)]
#[path = "parse_test.rs"]
mod parse_test;

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::consts::DEFAULT_STROKE_WIDTH;
use crate::ids::IdGen;
use crate::model::{Attrs, Diagram, Edge, EdgeStyle, HandleId, Node, NodeKind, Position};

/// Why diagram text could not become a [`Diagram`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{0}")]
    Json(String),
    #[error("diagram must be a JSON object")]
    NotAnObject,
    #[error("missing required `nodes` array")]
    MissingNodes,
    #[error("`nodes` must be an array")]
    NodesNotArray,
    #[error("`edges` must be an array")]
    EdgesNotArray,
    #[error("node {index}: {message}")]
    InvalidNode { index: usize, message: String },
    #[error("edge {index}: {message}")]
    InvalidEdge { index: usize, message: String },
    #[error("duplicate node id `{0}`")]
    DuplicateNodeId(String),
    #[error("duplicate edge id `{0}`")]
    DuplicateEdgeId(String),
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: String,
    #[serde(default, rename = "type")]
    type_name: Option<String>,
    /// Older spelling of `type`; `type` wins when both are given.
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    data: Option<Attrs>,
    #[serde(default)]
    position: Option<Position>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEdge {
    #[serde(default)]
    id: Option<String>,
    source: String,
    target: String,
    #[serde(default)]
    source_handle: Option<String>,
    #[serde(default)]
    target_handle: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    stroke_width: Option<f64>,
    #[serde(default)]
    dashed: Option<bool>,
    #[serde(default)]
    animated: Option<bool>,
}

/// Parse diagram text, synthesizing missing edge ids from the clock.
///
/// # Errors
///
/// Returns [`ParseError`] when the text is not JSON, lacks a `nodes` array,
/// contains a malformed entry, or repeats an id.
pub fn parse(text: &str) -> Result<Diagram, ParseError> {
    parse_with(text, &mut IdGen::from_clock())
}

/// Parse diagram text, drawing synthesized edge ids from `ids`.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with(text: &str, ids: &mut IdGen) -> Result<Diagram, ParseError> {
    let root: Value = serde_json::from_str(text).map_err(|e| ParseError::Json(e.to_string()))?;
    let Value::Object(mut root) = root else {
        return Err(ParseError::NotAnObject);
    };

    let raw_nodes = match root.remove("nodes") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ParseError::NodesNotArray),
        None => return Err(ParseError::MissingNodes),
    };
    let raw_edges = match root.remove("edges") {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => return Err(ParseError::EdgesNotArray),
    };

    let mut nodes = Vec::with_capacity(raw_nodes.len());
    let mut explicit = Vec::with_capacity(raw_nodes.len());
    let mut node_ids = HashSet::new();
    for (index, value) in raw_nodes.into_iter().enumerate() {
        let raw: RawNode =
            serde_json::from_value(value).map_err(|e| ParseError::InvalidNode { index, message: e.to_string() })?;
        if !node_ids.insert(raw.id.clone()) {
            return Err(ParseError::DuplicateNodeId(raw.id));
        }
        let (node, placed) = build_node(raw);
        nodes.push(node);
        explicit.push(placed);
    }

    let mut parsed = Vec::with_capacity(raw_edges.len());
    for (index, value) in raw_edges.into_iter().enumerate() {
        let raw: RawEdge =
            serde_json::from_value(value).map_err(|e| ParseError::InvalidEdge { index, message: e.to_string() })?;
        parsed.push(raw);
    }

    // Explicit ids are collected up front so synthesized ones can step around them.
    let mut edge_ids = HashSet::new();
    for raw in &parsed {
        if let Some(id) = raw.id.as_deref().filter(|id| !id.is_empty()) {
            if !edge_ids.insert(id.to_owned()) {
                return Err(ParseError::DuplicateEdgeId(id.to_owned()));
            }
        }
    }

    let mut edges = Vec::with_capacity(parsed.len());
    for raw in parsed {
        let id = match raw.id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => id.to_owned(),
            None => {
                let id = ids.edge_id(&raw.source, &raw.target, |candidate| edge_ids.contains(candidate));
                edge_ids.insert(id.clone());
                id
            }
        };
        edges.push(build_edge(id, raw));
    }

    tracing::debug!(nodes = nodes.len(), edges = edges.len(), "diagram parsed");
    Ok(Diagram { nodes, edges, explicit })
}

fn build_node(raw: RawNode) -> (Node, bool) {
    let mut data = raw.data.unwrap_or_default();
    let description = take_text(&mut data, "description");
    // `data.label` overrides the top-level label.
    let label = take_text(&mut data, "label").or(raw.label).unwrap_or_default();

    let position = match (raw.position, raw.x, raw.y) {
        (Some(position), _, _) => Some(position),
        (None, Some(x), Some(y)) => Some(Position::new(x, y)),
        _ => None,
    };

    let node = Node {
        id: raw.id,
        kind: NodeKind::from_type_name(raw.type_name.or(raw.kind).as_deref()),
        position: position.unwrap_or_default(),
        label,
        description,
        data,
    };
    (node, position.is_some())
}

fn take_text(data: &mut Attrs, key: &str) -> Option<String> {
    match data.remove(key) {
        Some(Value::String(text)) => Some(text),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

fn build_edge(id: String, raw: RawEdge) -> Edge {
    let defaults = EdgeStyle::default();
    let style = EdgeStyle {
        color: raw.color.filter(|c| !c.is_empty()).unwrap_or(defaults.color),
        stroke_width: raw
            .stroke_width
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(DEFAULT_STROKE_WIDTH),
        dashed: raw.dashed.unwrap_or(false),
        animated: raw.animated.unwrap_or(false),
    };

    Edge {
        id,
        source: raw.source,
        target: raw.target,
        source_handle: handle(raw.source_handle),
        target_handle: handle(raw.target_handle),
        label: raw.label,
        style,
    }
}

fn handle(raw: Option<String>) -> Option<HandleId> {
    raw.filter(|h| !h.is_empty()).map(HandleId::from)
}
