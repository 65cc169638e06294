//! Hexagonal status-grid packer.
//!
//! Lays out an arbitrary number of status cells as a honeycomb inside a
//! container whose size is only known at runtime and changes often. Every
//! pass is a pure function of `(items, width, height, size class)`; the
//! [`HexGrid`] wrapper re-runs it whenever the observed container resizes or
//! the item list is replaced, keeping only the most recent result.
//!
//! DESIGN
//! ======
//! Cells overlap horizontally by 13% of their width and vertically by 25% of
//! their height so the hexagon clip paths interlock. Rows alternate between
//! `k` and `k - 1` cells; odd rows are shifted right by half a cell pitch to
//! form the staggered brick pattern.

#[cfg(test)]
#[path = "hex_test.rs"]
mod hex_test;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
    BASE_CELL_HEIGHT, BASE_CELL_WIDTH, HORIZONTAL_OFFSET_RATIO, LABEL_MAX_CHARS, MAX_CELL_HEIGHT, MAX_CELL_WIDTH,
    MEDIUM_GROUP_LIMIT, NARROW_CELL_HEIGHT, NARROW_CELL_WIDTH, NARROW_CONTAINER_WIDTH, ROW_BASE_PADDING,
    SMALL_GROUP_LIMIT, SMALL_GROUP_MIN_CELL_HEIGHT, SMALL_GROUP_MIN_CELL_WIDTH, VERTICAL_OVERLAP_RATIO,
};
use crate::geom::{Size, items_per_row, stagger_rows};

pub const EMPTY_GRID_MESSAGE: &str = "No items found";

/// One monitored item as shown in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCell {
    pub id: String,
    pub label: String,
    pub is_up: bool,
}

impl StatusCell {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, is_up: bool) -> Self {
        Self { id: id.into(), label: label.into(), is_up }
    }

    /// Label as rendered inside the hexagon: at most 20 characters, then `...`.
    #[must_use]
    pub fn display_label(&self) -> String {
        if self.label.chars().count() > LABEL_MAX_CHARS {
            let head: String = self.label.chars().take(LABEL_MAX_CHARS).collect();
            format!("{head}...")
        } else {
            self.label.clone()
        }
    }
}

/// A single row of cells produced by one packing pass.
pub type Row = Vec<StatusCell>;

/// Bucket driving the base cell dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    /// Fewer than 5 items.
    Small,
    /// 5 to 11 items.
    Medium,
    /// 12 items or more.
    Large,
}

impl SizeClass {
    #[must_use]
    pub fn for_count(count: usize) -> Self {
        if count < SMALL_GROUP_LIMIT {
            Self::Small
        } else if count < MEDIUM_GROUP_LIMIT {
            Self::Medium
        } else {
            Self::Large
        }
    }

    /// Fraction of the container dimension used as the starting cell size.
    fn container_fraction(self) -> f64 {
        match self {
            Self::Small => 0.3,
            Self::Medium => 0.25,
            Self::Large => 0.2,
        }
    }

    fn min_cell(self) -> Size {
        match self {
            Self::Small => Size::new(SMALL_GROUP_MIN_CELL_WIDTH, SMALL_GROUP_MIN_CELL_HEIGHT),
            Self::Medium | Self::Large => Size::new(BASE_CELL_WIDTH, BASE_CELL_HEIGHT),
        }
    }

    /// Starting cell size before the row fit, clamped to `[min, max]`.
    #[must_use]
    pub fn base_cell(self, container_width: f64, container_height: f64) -> Size {
        let min = self.min_cell();
        let frac = self.container_fraction();
        Size::new(
            (container_width * frac).max(min.width).min(MAX_CELL_WIDTH),
            (container_height * frac).max(min.height).min(MAX_CELL_HEIGHT),
        )
    }
}

/// Uniform cell dimensions for every cell in one packing pass.
pub type CellSize = Size;

/// Output of one packing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct HexLayout {
    pub rows: Vec<Row>,
    pub cell_size: CellSize,
    pub size_class: SizeClass,
    /// Container size the pass was computed against.
    pub container: Size,
}

impl HexLayout {
    /// Horizontal margin applied between neighbouring cells (negative: overlap).
    #[must_use]
    pub fn horizontal_offset(&self) -> f64 {
        HORIZONTAL_OFFSET_RATIO * self.cell_size.width
    }

    /// How far each row overlaps the one above it.
    #[must_use]
    pub fn vertical_overlap(&self) -> f64 {
        VERTICAL_OVERLAP_RATIO * self.cell_size.height
    }

    /// Left padding of `row`; odd rows are shifted by half a cell pitch.
    #[must_use]
    pub fn row_padding_left(&self, row: usize) -> f64 {
        if row % 2 == 1 {
            ROW_BASE_PADDING + (self.cell_size.width + self.horizontal_offset()) / 2.0
        } else {
            ROW_BASE_PADDING
        }
    }

    #[must_use]
    pub fn font_size_px(&self) -> u32 {
        if self.size_class == SizeClass::Small { 14 } else { 12 }
    }

    /// Small groups let rows wrap instead of overflowing.
    #[must_use]
    pub fn rows_wrap(&self) -> bool {
        self.size_class == SizeClass::Small
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Text shown in place of the grid when there is nothing to draw.
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        if self.rows.is_empty() { Some(EMPTY_GRID_MESSAGE) } else { None }
    }
}

/// Pack `items` into staggered hexagon rows for a container of the given size.
#[must_use]
pub fn pack(items: &[StatusCell], container_width: f64, container_height: f64, size_class: SizeClass) -> HexLayout {
    let container = Size::new(container_width, container_height);

    if container_width < NARROW_CONTAINER_WIDTH {
        return HexLayout {
            rows: items.iter().map(|item| vec![item.clone()]).collect(),
            cell_size: Size::new(NARROW_CELL_WIDTH, NARROW_CELL_HEIGHT),
            size_class,
            container,
        };
    }

    let base = size_class.base_cell(container_width, container_height);
    let offset = HORIZONTAL_OFFSET_RATIO * base.width;
    let per_row = items_per_row(container_width, base.width, offset, items.len());

    let width = (container_width / per_row as f64 - offset).min(MAX_CELL_WIDTH);
    let height = (BASE_CELL_HEIGHT * (width / BASE_CELL_WIDTH)).min(MAX_CELL_HEIGHT);

    HexLayout {
        rows: stagger_rows(items, per_row),
        cell_size: Size::new(width, height),
        size_class,
        container,
    }
}

/// A packer bound to one container: remembers the last observed size and
/// re-packs on every resize or item replacement.
#[derive(Debug, Clone)]
pub struct HexGrid {
    items: Vec<StatusCell>,
    container: Option<Size>,
    layout: Option<HexLayout>,
}

impl HexGrid {
    #[must_use]
    pub fn new(items: Vec<StatusCell>) -> Self {
        Self { items, container: None, layout: None }
    }

    /// Feed a container size notification. Always re-packs, even if the size is unchanged.
    pub fn observe_resize(&mut self, width: f64, height: f64) -> &HexLayout {
        self.container = Some(Size::new(width, height));
        self.repack()
    }

    /// Replace the item list and re-pack against the last observed size.
    pub fn set_items(&mut self, items: Vec<StatusCell>) -> Option<&HexLayout> {
        self.items = items;
        if self.container.is_some() { Some(self.repack()) } else { None }
    }

    #[must_use]
    pub fn items(&self) -> &[StatusCell] {
        &self.items
    }

    /// The most recent layout, or `None` before the first size notification.
    #[must_use]
    pub fn layout(&self) -> Option<&HexLayout> {
        self.layout.as_ref()
    }

    fn repack(&mut self) -> &HexLayout {
        let size = self.container.unwrap_or_default();
        let class = SizeClass::for_count(self.items.len());
        let layout = pack(&self.items, size.width, size.height, class);
        debug!(
            items = self.items.len(),
            rows = layout.rows.len(),
            cell_width = layout.cell_size.width,
            "hex grid packed"
        );
        self.layout.insert(layout)
    }
}
