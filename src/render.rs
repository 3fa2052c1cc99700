//! Scene builder: the snapshot as the external renderer consumes it.
//!
//! The renderer owns painting, pan/zoom and drag physics. What it needs from
//! the core is a flat, serializable description: node boxes with their type
//! name and anchor layout, and edges with resolved stroke styling. Edges whose
//! endpoints are not in the snapshot are left out here rather than handed to
//! the renderer to guess about.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::consts::{
    EDGE_LABEL_BG_FILL, EDGE_LABEL_BG_OPACITY, EDGE_LABEL_FILL, EDGE_LABEL_FONT_SIZE, EDGE_LABEL_FONT_WEIGHT,
    SNAP_GRID,
};
use crate::doc::Snapshot;
use crate::model::{Anchor, Edge, HandleRole, Node, Position, Side};

/// Everything the renderer draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
    /// Grid the renderer snaps dragged nodes to.
    pub snap_grid: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: String,
    /// Renderer component name (`default`, `decision`, `process`).
    #[serde(rename = "type")]
    pub node_type: &'static str,
    pub position: Position,
    /// Passthrough attributes with `label` and `description` laid over them.
    pub data: Map<String, Value>,
    pub handles: Vec<HandleView>,
    pub selected: bool,
}

/// Placement of one anchor on a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandleView {
    pub id: &'static str,
    pub side: Side,
    #[serde(rename = "type")]
    pub role: HandleRole,
    /// Fraction along the side, from the top/left edge.
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeView {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
    pub label: String,
    #[serde(rename = "type")]
    pub edge_type: &'static str,
    pub animated: bool,
    pub style: StrokeView,
    pub label_style: LabelView,
    pub label_bg_style: LabelBgView,
    pub marker_end: MarkerView,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeView {
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelView {
    pub font_size: u32,
    pub font_weight: u32,
    pub fill: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelBgView {
    pub fill: &'static str,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub color: String,
}

impl Scene {
    /// Build the scene for `snapshot`.
    #[must_use]
    pub fn build(snapshot: &Snapshot) -> Self {
        let nodes = snapshot
            .nodes()
            .iter()
            .map(|n| node_view(n, snapshot.is_node_selected(&n.id)))
            .collect();
        let edges = snapshot
            .edges()
            .iter()
            .filter(|e| snapshot.contains_node(&e.source) && snapshot.contains_node(&e.target))
            .map(|e| edge_view(e, snapshot.is_edge_selected(&e.id)))
            .collect();
        Self { nodes, edges, snap_grid: [SNAP_GRID, SNAP_GRID] }
    }
}

fn node_view(node: &Node, selected: bool) -> NodeView {
    let mut data = node.data.clone();
    data.insert("label".into(), Value::String(node.label.clone()));
    if let Some(description) = &node.description {
        data.insert("description".into(), Value::String(description.clone()));
    }
    let handles = Anchor::ALL
        .into_iter()
        .map(|anchor| HandleView {
            id: anchor.id(),
            side: anchor.side,
            role: anchor.role,
            offset: anchor.offset(node.kind),
        })
        .collect();
    NodeView {
        id: node.id.clone(),
        node_type: node.kind.renderer_type(),
        position: node.position,
        data,
        handles,
        selected,
    }
}

fn edge_view(edge: &Edge, selected: bool) -> EdgeView {
    EdgeView {
        id: edge.id.clone(),
        source: edge.source.clone(),
        target: edge.target.clone(),
        source_handle: edge.source_handle.as_ref().map(|h| h.as_str().to_owned()),
        target_handle: edge.target_handle.as_ref().map(|h| h.as_str().to_owned()),
        label: edge.label.clone().unwrap_or_default(),
        edge_type: "default",
        animated: edge.style.animated,
        style: StrokeView {
            stroke: edge.style.color.clone(),
            stroke_width: edge.style.stroke_width,
            stroke_dasharray: edge.style.dash_array(),
        },
        label_style: LabelView {
            font_size: EDGE_LABEL_FONT_SIZE,
            font_weight: EDGE_LABEL_FONT_WEIGHT,
            fill: EDGE_LABEL_FILL,
        },
        label_bg_style: LabelBgView { fill: EDGE_LABEL_BG_FILL, fill_opacity: EDGE_LABEL_BG_OPACITY },
        marker_end: MarkerView { kind: "arrowclosed", color: edge.style.color.clone() },
        selected,
    }
}
