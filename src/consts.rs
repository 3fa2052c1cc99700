//! Shared numeric and style constants for the diagram core.

// ── Grid layout ─────────────────────────────────────────────────

/// Number of columns in the fallback grid.
pub const GRID_COLUMNS: usize = 3;

/// Horizontal distance between grid columns, in world units.
pub const GRID_COLUMN_WIDTH: f64 = 250.0;

/// Vertical distance between grid rows, in world units.
pub const GRID_ROW_HEIGHT: f64 = 150.0;

/// Offset of the first grid slot from the world origin, on both axes.
pub const GRID_MARGIN: f64 = 100.0;

// ── Edge style ──────────────────────────────────────────────────

/// Stroke color for edges described in text without a `color`.
pub const DEFAULT_EDGE_COLOR: &str = "#b1b1b7";

/// Stroke color for edges created by dragging between anchors.
pub const CONNECT_EDGE_COLOR: &str = "#374151";

/// Stroke width used when none (or a non-positive one) is given.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Stroke dash pattern for dashed edges: 5 units on, 5 units off.
pub const DASH_PATTERN: &str = "5,5";

/// Edge label font size in CSS pixels.
pub const EDGE_LABEL_FONT_SIZE: u32 = 12;

/// Edge label font weight.
pub const EDGE_LABEL_FONT_WEIGHT: u32 = 500;

/// Edge label text color.
pub const EDGE_LABEL_FILL: &str = "#374151";

/// Edge label background color.
pub const EDGE_LABEL_BG_FILL: &str = "#ffffff";

/// Edge label background opacity.
pub const EDGE_LABEL_BG_OPACITY: f64 = 0.8;

// ── Node placement ──────────────────────────────────────────────

/// A node added at the cursor is shifted left by this much so the cursor
/// lands near its center.
pub const CURSOR_OFFSET_X: f64 = 100.0;

/// A node added at the cursor is shifted up by this much.
pub const CURSOR_OFFSET_Y: f64 = 50.0;

/// Width and height of the band scattered nodes are dropped into.
pub const SCATTER_BAND: f64 = 200.0;

/// Snap grid the renderer aligns dragged nodes to.
pub const SNAP_GRID: f64 = 15.0;
