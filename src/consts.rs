//! Shared numeric constants for the layout engine.

// ── Hex grid ────────────────────────────────────────────────────

/// Largest cell width the packer will ever produce.
pub const MAX_CELL_WIDTH: f64 = 150.0;

/// Largest cell height the packer will ever produce.
pub const MAX_CELL_HEIGHT: f64 = 130.0;

/// Reference cell width; also the floor for medium and large groups.
pub const BASE_CELL_WIDTH: f64 = 80.0;

/// Reference cell height; also the floor for medium and large groups.
pub const BASE_CELL_HEIGHT: f64 = 70.0;

/// Width floor for small groups.
pub const SMALL_GROUP_MIN_CELL_WIDTH: f64 = 120.0;

/// Height floor for small groups.
pub const SMALL_GROUP_MIN_CELL_HEIGHT: f64 = 110.0;

/// Containers narrower than this degrade to one cell per row.
pub const NARROW_CONTAINER_WIDTH: f64 = 200.0;

/// Fixed cell width used in narrow containers.
pub const NARROW_CELL_WIDTH: f64 = 92.0;

/// Fixed cell height used in narrow containers.
pub const NARROW_CELL_HEIGHT: f64 = 80.0;

/// Horizontal overlap between neighbouring hexagons, as a (negative) fraction of cell width.
pub const HORIZONTAL_OFFSET_RATIO: f64 = -0.13;

/// Vertical overlap between rows, as a fraction of cell height.
pub const VERTICAL_OVERLAP_RATIO: f64 = 0.25;

/// Padding applied to the left and right of every row.
pub const ROW_BASE_PADDING: f64 = 5.0;

/// Groups with fewer items than this are "small".
pub const SMALL_GROUP_LIMIT: usize = 5;

/// Groups with fewer items than this (and not small) are "medium".
pub const MEDIUM_GROUP_LIMIT: usize = 12;

/// Labels longer than this many characters are truncated.
pub const LABEL_MAX_CHARS: usize = 20;

// ── Hover ───────────────────────────────────────────────────────

/// Default magnification applied to a hovered cell.
pub const HOVER_SCALE: f64 = 2.2;

/// Stacking order of a hovered cell.
pub const HOVER_Z_INDEX: i32 = 20;

/// Stacking order of a cell at rest.
pub const BASE_Z_INDEX: i32 = 0;

// ── Cards ───────────────────────────────────────────────────────

/// Space between cards in the row-flow layout, both axes.
pub const CARD_GAP: f64 = 24.0;

/// Container width used when the real one is zero or unknown.
pub const FALLBACK_CONTAINER_WIDTH: f64 = 1000.0;

/// Minimum card width during a resize.
pub const MIN_CARD_WIDTH: f64 = 150.0;

/// Minimum card height during a resize.
pub const MIN_CARD_HEIGHT: f64 = 150.0;

/// Maximum card height during a resize.
pub const MAX_CARD_HEIGHT: f64 = 800.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Hit slop in pixels around card edges for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Height of the draggable header strip at the top of each card.
pub const HEADER_HEIGHT_PX: f64 = 36.0;
