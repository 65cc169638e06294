//! Geometry primitives and the pure row-fitting helpers shared by the packers.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in container-local CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Whether `pt` lies inside the rectangle, edges inclusive.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }

    /// The rectangle scaled by `scale` about its own center.
    #[must_use]
    pub fn scaled_about_center(&self, scale: f64) -> Self {
        let c = self.center();
        let w = self.width * scale;
        let h = self.height * scale;
        Self::new(c.x - w * 0.5, c.y - h * 0.5, w, h)
    }

    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// How many cells of `cell_width` fit across `container_width` when
/// neighbours overlap by `offset` (negative for overlap).
///
/// The result is clamped to `[1, item_count]` and is never zero, even for an
/// empty item list or a degenerate cell pitch.
#[must_use]
pub fn items_per_row(container_width: f64, cell_width: f64, offset: f64, item_count: usize) -> usize {
    let pitch = cell_width + offset;
    let fit = if pitch > 0.0 && container_width.is_finite() && container_width > 0.0 {
        (container_width / pitch).floor() as usize
    } else {
        1
    };
    fit.min(item_count).max(1)
}

/// Split `items` into staggered rows: even rows hold `per_row` items, odd
/// rows hold `per_row - 1` (at least one). The last row takes what is left.
#[must_use]
pub fn stagger_rows<T: Clone>(items: &[T], per_row: usize) -> Vec<Vec<T>> {
    let full = per_row.max(1);
    let short = full.saturating_sub(1).max(1);
    let mut rows = Vec::new();
    let mut index = 0;
    let mut even = true;
    while index < items.len() {
        let len = if even { full } else { short };
        let end = (index + len).min(items.len());
        rows.push(items[index..end].to_vec());
        index = end;
        even = !even;
    }
    rows
}
