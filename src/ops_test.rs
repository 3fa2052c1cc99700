#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::model::{Anchor, HandleId, HandleRole, Side};

fn node(id: &str) -> Node {
    Node::new(id, NodeKind::Plain, id.to_uppercase())
}

fn base() -> Snapshot {
    Snapshot::new(
        vec![node("a"), node("b"), node("c")],
        vec![Edge::new("ab", "a", "b"), Edge::new("bc", "b", "c"), Edge::new("ac", "a", "c")],
    )
    .unwrap()
}

fn run(snapshot: &Snapshot, op: &Op) -> Snapshot {
    apply(snapshot, op).unwrap().unwrap()
}

// =============================================================================
// ADD / DELETE
// =============================================================================

#[test]
fn add_node_appends() {
    let next = run(&base(), &Op::AddNode(node("d")));
    assert_eq!(next.nodes().len(), 4);
    assert_eq!(next.nodes()[3].id, "d");
    assert_eq!(next.edges().len(), 3);
}

#[test]
fn add_node_duplicate_rejected() {
    let err = apply(&base(), &Op::AddNode(node("a"))).unwrap_err();
    assert_eq!(err, OpError::DuplicateNode("a".into()));
}

#[test]
fn delete_node_cascades_exactly_incident_edges() {
    let before = base();
    let next = run(&before, &Op::DeleteNode { id: "a".into() });
    assert!(!next.contains_node("a"));
    let ids: Vec<&str> = next.edges().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["bc"]);
    assert!(next.edges().iter().all(|e| !e.touches("a")));
    // input snapshot is untouched
    assert_eq!(before.edges().len(), 3);
}

#[test]
fn delete_missing_node_is_error() {
    let err = apply(&base(), &Op::DeleteNode { id: "zz".into() }).unwrap_err();
    assert_eq!(err, OpError::NodeNotFound("zz".into()));
}

#[test]
fn delete_edge_keeps_nodes() {
    let next = run(&base(), &Op::DeleteEdge { id: "bc".into() });
    assert_eq!(next.nodes().len(), 3);
    assert!(!next.contains_edge("bc"));
}

#[test]
fn delete_missing_edge_is_error() {
    let err = apply(&base(), &Op::DeleteEdge { id: "zz".into() }).unwrap_err();
    assert_eq!(err, OpError::EdgeNotFound("zz".into()));
}

// =============================================================================
// CONNECT
// =============================================================================

#[test]
fn connect_adds_dark_unlabeled_edge() {
    let connection = Connection::new("c", "a").via(
        Anchor::new(Side::Bottom, HandleRole::Source),
        Anchor::new(Side::Top, HandleRole::Target),
    );
    let next = run(&base(), &Op::Connect { id: "edge-c-a-1".into(), connection });
    let edge = next.edge("edge-c-a-1").unwrap();
    assert_eq!(edge.source, "c");
    assert_eq!(edge.target, "a");
    assert_eq!(edge.source_handle, Some(HandleId::parse("bottom-source")));
    assert_eq!(edge.label, None);
    assert_eq!(edge.style.color, "#374151");
    assert_eq!(edge.style.stroke_width, 2.0);
    assert!(!edge.style.animated);
}

#[test]
fn connect_identical_connection_is_noop() {
    let once = run(&base(), &Op::Connect { id: "x1".into(), connection: Connection::new("c", "a") });
    let again = apply(&once, &Op::Connect { id: "x2".into(), connection: Connection::new("c", "a") }).unwrap();
    assert!(again.is_none());
}

#[test]
fn connect_same_nodes_other_handles_is_new_edge() {
    let once = run(&base(), &Op::Connect { id: "x1".into(), connection: Connection::new("c", "a") });
    let other = Connection::new("c", "a").via(
        Anchor::new(Side::Right, HandleRole::Source),
        Anchor::new(Side::Left, HandleRole::Target),
    );
    let next = run(&once, &Op::Connect { id: "x2".into(), connection: other });
    assert_eq!(next.edges().len(), 5);
}

#[test]
fn connect_to_missing_node_is_error() {
    let err = apply(&base(), &Op::Connect { id: "x".into(), connection: Connection::new("a", "ghost") }).unwrap_err();
    assert_eq!(err, OpError::NodeNotFound("ghost".into()));
}

#[test]
fn connect_with_taken_id_is_error() {
    let err = apply(&base(), &Op::Connect { id: "ab".into(), connection: Connection::new("c", "b") }).unwrap_err();
    assert_eq!(err, OpError::DuplicateEdge("ab".into()));
}

// =============================================================================
// REPOSITION / RELABEL / CLEAR
// =============================================================================

#[test]
fn reposition_moves_only_target() {
    let next = run(&base(), &Op::Reposition { id: "b".into(), position: Position::new(1.0, 2.0) });
    assert_eq!(next.node("b").unwrap().position, Position::new(1.0, 2.0));
    assert_eq!(next.node("a").unwrap().position, Position::default());
}

#[test]
fn relabel_sets_label_and_description() {
    let next = run(
        &base(),
        &Op::Relabel { id: "a".into(), label: "Alpha".into(), description: Some("first".into()) },
    );
    let node = next.node("a").unwrap();
    assert_eq!(node.label, "Alpha");
    assert_eq!(node.description.as_deref(), Some("first"));
}

#[test]
fn relabel_with_current_text_is_noop() {
    let described = Snapshot::new(vec![node("a").with_description("d")], Vec::new()).unwrap();
    let op = Op::Relabel { id: "a".into(), label: "A".into(), description: Some("d".into()) };
    assert!(apply(&described, &op).unwrap().is_none());
}

#[test]
fn reposition_onto_same_spot_is_noop() {
    let op = Op::Reposition { id: "a".into(), position: Position::default() };
    assert!(apply(&base(), &op).unwrap().is_none());
}

#[test]
fn relabel_missing_node_is_error() {
    let err = apply(&base(), &Op::Relabel { id: "q".into(), label: String::new(), description: None }).unwrap_err();
    assert_eq!(err, OpError::NodeNotFound("q".into()));
}

#[test]
fn clear_empties_and_is_noop_when_empty() {
    let next = run(&base(), &Op::Clear);
    assert!(next.is_empty());
    assert!(apply(&next, &Op::Clear).unwrap().is_none());
}

// =============================================================================
// NODE FACTORY
// =============================================================================

#[test]
fn cursor_node_is_offset_from_click() {
    let mut rng = StdRng::seed_from_u64(1);
    let node = new_node("node-1".into(), NodeKind::Plain, 4, Placement::Cursor(Position::new(500.0, 300.0)), &mut rng);
    assert_eq!(node.position, Position::new(400.0, 250.0));
    assert_eq!(node.label, "New Node 4");
    assert_eq!(node.description.as_deref(), Some("Click to edit"));
}

#[test]
fn factory_descriptions_follow_kind() {
    let mut rng = StdRng::seed_from_u64(2);
    let decision = new_node("d".into(), NodeKind::Decision, 1, Placement::Scatter, &mut rng);
    let process = new_node("p".into(), NodeKind::Process, 2, Placement::Scatter, &mut rng);
    assert_eq!(decision.description, None);
    assert_eq!(process.description.as_deref(), Some("New process step"));
}

#[test]
fn scatter_lands_inside_kind_band() {
    let mut rng = StdRng::seed_from_u64(3);
    for kind in NodeKind::ALL {
        for _ in 0..50 {
            let node = new_node("n".into(), kind, 1, Placement::Scatter, &mut rng);
            let lo = kind.scatter_origin();
            let hi = lo + SCATTER_BAND;
            assert!((lo..hi).contains(&node.position.x), "{kind} x={}", node.position.x);
            assert!((lo..hi).contains(&node.position.y), "{kind} y={}", node.position.y);
        }
    }
}
