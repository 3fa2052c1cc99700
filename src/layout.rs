//! Layout assigner: grid fallback positions for parsed nodes.
//!
//! Nodes are dropped into a fixed-width grid in input order. Under the default
//! [`LayoutPolicy::Grid`] every node is placed, even one whose text gave it
//! coordinates. [`LayoutPolicy::PreserveExplicit`] keeps those coordinates and
//! only places the rest; skipped slots stay empty so a node's slot never
//! depends on whether its neighbours were pinned.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::consts::{GRID_COLUMNS, GRID_COLUMN_WIDTH, GRID_MARGIN, GRID_ROW_HEIGHT};
use crate::model::{Diagram, Position};

/// How the grid treats coordinates supplied by the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutPolicy {
    /// Overwrite every node with its grid slot.
    #[default]
    Grid,
    /// Keep text-supplied coordinates; grid the rest.
    PreserveExplicit,
}

impl LayoutPolicy {
    /// Parse a policy name: `grid` or `preserve`.
    #[must_use]
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "grid" => Some(Self::Grid),
            "preserve" | "preserve-explicit" => Some(Self::PreserveExplicit),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::PreserveExplicit => "preserve",
        }
    }
}

/// Grid geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Slots per row; zero is treated as one.
    pub columns: usize,
    pub column_width: f64,
    pub row_height: f64,
    /// World position of slot 0.
    pub origin: Position,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: GRID_COLUMNS,
            column_width: GRID_COLUMN_WIDTH,
            row_height: GRID_ROW_HEIGHT,
            origin: Position::new(GRID_MARGIN, GRID_MARGIN),
        }
    }
}

impl GridSpec {
    /// World position of the slot at `index`.
    #[must_use]
    pub fn slot(&self, index: usize) -> Position {
        let columns = self.columns.max(1);
        #[allow(clippy::cast_precision_loss)]
        let (column, row) = ((index % columns) as f64, (index / columns) as f64);
        Position::new(
            self.origin.x + column * self.column_width,
            self.origin.y + row * self.row_height,
        )
    }
}

/// Layout settings the engine applies after every parse.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutConfig {
    pub policy: LayoutPolicy,
    pub grid: GridSpec,
}

/// Assign positions to the nodes of `diagram` in place.
pub fn assign(diagram: &mut Diagram, config: &LayoutConfig) {
    let mut kept = 0usize;
    for index in 0..diagram.nodes.len() {
        if config.policy == LayoutPolicy::PreserveExplicit && diagram.is_explicit(index) {
            kept += 1;
            continue;
        }
        diagram.nodes[index].position = config.grid.slot(index);
    }
    tracing::debug!(policy = config.policy.as_str(), nodes = diagram.nodes.len(), kept, "layout assigned");
}
