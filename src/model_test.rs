#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

// =============================================================
// NodeKind
// =============================================================

#[test]
fn kind_from_type_name_known_values() {
    assert_eq!(NodeKind::from_type_name(Some("decision")), NodeKind::Decision);
    assert_eq!(NodeKind::from_type_name(Some("process")), NodeKind::Process);
    assert_eq!(NodeKind::from_type_name(Some("default")), NodeKind::Plain);
    assert_eq!(NodeKind::from_type_name(Some("plain")), NodeKind::Plain);
}

#[test]
fn kind_from_type_name_falls_back_to_plain() {
    assert_eq!(NodeKind::from_type_name(None), NodeKind::Plain);
    assert_eq!(NodeKind::from_type_name(Some("hexagon")), NodeKind::Plain);
    assert_eq!(NodeKind::from_type_name(Some("")), NodeKind::Plain);
}

#[test]
fn kind_renderer_type_uses_default_for_plain() {
    assert_eq!(NodeKind::Plain.renderer_type(), "default");
    assert_eq!(NodeKind::Decision.renderer_type(), "decision");
    assert_eq!(NodeKind::Process.renderer_type(), "process");
}

#[test]
fn kind_serde_lowercase() {
    assert_eq!(serde_json::to_string(&NodeKind::Process).unwrap(), "\"process\"");
    let back: NodeKind = serde_json::from_str("\"decision\"").unwrap();
    assert_eq!(back, NodeKind::Decision);
}

#[test]
fn only_decision_skips_description_editing() {
    assert!(NodeKind::Plain.edits_description());
    assert!(NodeKind::Process.edits_description());
    assert!(!NodeKind::Decision.edits_description());
}

#[test]
fn scatter_origins_are_staggered() {
    assert_eq!(NodeKind::Plain.scatter_origin(), 200.0);
    assert_eq!(NodeKind::Decision.scatter_origin(), 300.0);
    assert_eq!(NodeKind::Process.scatter_origin(), 400.0);
}

// =============================================================
// Anchors and handles
// =============================================================

#[test]
fn anchor_vocabulary_has_eight_distinct_ids() {
    let mut ids: Vec<&str> = Anchor::ALL.iter().map(|a| a.id()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8);
}

#[test]
fn anchor_id_roundtrips_through_from_id() {
    for anchor in Anchor::ALL {
        assert_eq!(Anchor::from_id(anchor.id()), Some(anchor));
    }
    assert_eq!(Anchor::from_id("middle-source"), None);
}

#[test]
fn anchor_offsets_separate_target_and_source() {
    let top_target = Anchor::new(Side::Top, HandleRole::Target);
    let top_source = Anchor::new(Side::Top, HandleRole::Source);
    assert_eq!(top_target.offset(NodeKind::Plain), 0.25);
    assert_eq!(top_source.offset(NodeKind::Plain), 0.75);
    assert_eq!(top_target.offset(NodeKind::Decision), 0.4);
    assert_eq!(top_source.offset(NodeKind::Decision), 0.6);
}

#[test]
fn handle_parse_known_and_unknown() {
    let known = HandleId::parse("right-source");
    assert_eq!(known.anchor(), Some(Anchor::new(Side::Right, HandleRole::Source)));
    assert!(known.is_known());

    let unknown = HandleId::parse("north-east");
    assert_eq!(unknown, HandleId::Other("north-east".into()));
    assert!(!unknown.is_known());
    assert_eq!(unknown.as_str(), "north-east");
}

#[test]
fn handle_serializes_as_plain_string() {
    let handle = HandleId::parse("left-target");
    assert_eq!(serde_json::to_value(&handle).unwrap(), json!("left-target"));
    let back: HandleId = serde_json::from_value(json!("weird")).unwrap();
    assert_eq!(back, HandleId::Other("weird".into()));
}

// =============================================================
// Edges
// =============================================================

#[test]
fn edge_style_defaults() {
    let style = EdgeStyle::default();
    assert_eq!(style.color, "#b1b1b7");
    assert_eq!(style.stroke_width, 2.0);
    assert!(!style.dashed);
    assert!(!style.animated);
    assert_eq!(style.dash_array(), None);
}

#[test]
fn connected_style_is_dark_and_static() {
    let style = EdgeStyle::connected();
    assert_eq!(style.color, "#374151");
    assert_eq!(style.stroke_width, 2.0);
    assert!(!style.animated);
}

#[test]
fn dashed_style_carries_five_five_pattern() {
    let style = EdgeStyle { dashed: true, ..EdgeStyle::default() };
    assert_eq!(style.dash_array(), Some("5,5"));
}

#[test]
fn edge_touches_either_endpoint() {
    let edge = Edge::new("e", "a", "b");
    assert!(edge.touches("a"));
    assert!(edge.touches("b"));
    assert!(!edge.touches("c"));
}

#[test]
fn diagram_new_marks_nothing_explicit() {
    let diagram = Diagram::new(vec![Node::new("a", NodeKind::Plain, "A")], Vec::new());
    assert!(!diagram.is_explicit(0));
    assert!(!diagram.is_explicit(5));
}

#[test]
fn node_description_absent_is_not_serialized() {
    let node = Node::new("a", NodeKind::Plain, "A");
    let value = serde_json::to_value(&node).unwrap();
    assert!(value.get("description").is_none());

    let node = node.with_description("");
    let value = serde_json::to_value(&node).unwrap();
    assert_eq!(value["description"], json!(""));
}
