#![allow(clippy::float_cmp)]

use super::*;
use crate::model::{Node, NodeKind};

fn diagram_of(count: usize) -> Diagram {
    let nodes = (0..count).map(|i| Node::new(format!("n{i}"), NodeKind::Plain, "")).collect();
    Diagram::new(nodes, Vec::new())
}

fn positions(diagram: &Diagram) -> Vec<(f64, f64)> {
    diagram.nodes.iter().map(|n| (n.position.x, n.position.y)).collect()
}

// =============================================================
// Grid slots
// =============================================================

#[test]
fn grid_first_row_and_wrap() {
    let mut diagram = diagram_of(5);
    assign(&mut diagram, &LayoutConfig::default());
    assert_eq!(
        positions(&diagram),
        vec![(100.0, 100.0), (350.0, 100.0), (600.0, 100.0), (100.0, 250.0), (350.0, 250.0)]
    );
}

#[test]
fn grid_slot_formula() {
    let grid = GridSpec::default();
    for i in 0..12 {
        let slot = grid.slot(i);
        #[allow(clippy::cast_precision_loss)]
        let (col, row) = ((i % 3) as f64, (i / 3) as f64);
        assert_eq!(slot, Position::new(col * 250.0 + 100.0, row * 150.0 + 100.0));
    }
}

#[test]
fn grid_zero_columns_behaves_as_one() {
    let grid = GridSpec { columns: 0, ..GridSpec::default() };
    assert_eq!(grid.slot(2), Position::new(100.0, 400.0));
}

#[test]
fn grid_empty_diagram_is_fine() {
    let mut diagram = diagram_of(0);
    assign(&mut diagram, &LayoutConfig::default());
    assert!(diagram.nodes.is_empty());
}

// =============================================================
// Policies
// =============================================================

#[test]
fn grid_policy_overwrites_explicit_coordinates() {
    let mut diagram = diagram_of(2);
    diagram.nodes[0].position = Position::new(5.0, 5.0);
    diagram.explicit[0] = true;
    assign(&mut diagram, &LayoutConfig::default());
    assert_eq!(diagram.nodes[0].position, Position::new(100.0, 100.0));
}

#[test]
fn preserve_policy_keeps_explicit_and_keeps_slots_stable() {
    let mut diagram = diagram_of(3);
    diagram.nodes[0].position = Position::new(5.0, 6.0);
    diagram.explicit[0] = true;
    let config = LayoutConfig { policy: LayoutPolicy::PreserveExplicit, ..LayoutConfig::default() };
    assign(&mut diagram, &config);
    assert_eq!(positions(&diagram), vec![(5.0, 6.0), (350.0, 100.0), (600.0, 100.0)]);
}

#[test]
fn policy_names() {
    assert_eq!(LayoutPolicy::from_name("grid"), Some(LayoutPolicy::Grid));
    assert_eq!(LayoutPolicy::from_name(" Preserve "), Some(LayoutPolicy::PreserveExplicit));
    assert_eq!(LayoutPolicy::from_name("preserve-explicit"), Some(LayoutPolicy::PreserveExplicit));
    assert_eq!(LayoutPolicy::from_name("force"), None);
    assert_eq!(LayoutPolicy::PreserveExplicit.as_str(), "preserve");
}
