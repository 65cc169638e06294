//! Edge-aware hover magnification for grid cells.
//!
//! A hovered cell is scaled about its center. When the enlarged rectangle
//! would cross an edge of the grid's container, it is pushed back inside by
//! exactly the overflow on that edge; corners are corrected on both axes.
//! The renderer applies the returned [`HoverTransform`] declaratively.

#[cfg(test)]
#[path = "hover_test.rs"]
mod hover_test;

use crate::consts::{BASE_Z_INDEX, HOVER_SCALE, HOVER_Z_INDEX};
use crate::geom::Rect;

/// Translate + scale applied to a single cell, plus its stacking order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    pub z_index: i32,
}

impl HoverTransform {
    /// The resting transform: no translation, scale 1, baseline z-index.
    #[must_use]
    pub fn identity() -> Self {
        Self { translate_x: 0.0, translate_y: 0.0, scale: 1.0, z_index: BASE_Z_INDEX }
    }

    /// The cell rectangle after this transform is applied.
    #[must_use]
    pub fn apply(&self, cell: Rect) -> Rect {
        cell.scaled_about_center(self.scale)
            .translated(self.translate_x, self.translate_y)
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

impl Default for HoverTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Compute the clamped transform for `cell` magnified by `scale` inside `container`.
///
/// Translation is zero on any axis where the scaled cell does not overflow.
#[must_use]
pub fn compute_hover_transform(cell: Rect, container: Rect, scale: f64) -> HoverTransform {
    let scaled = cell.scaled_about_center(scale);

    let mut dx = 0.0;
    let mut dy = 0.0;

    let overflow_left = container.x - scaled.x;
    if overflow_left > 0.0 {
        dx += overflow_left;
    }
    let overflow_right = scaled.right() - container.right();
    if overflow_right > 0.0 {
        dx -= overflow_right;
    }
    let overflow_top = container.y - scaled.y;
    if overflow_top > 0.0 {
        dy += overflow_top;
    }
    let overflow_bottom = scaled.bottom() - container.bottom();
    if overflow_bottom > 0.0 {
        dy -= overflow_bottom;
    }

    HoverTransform { translate_x: dx, translate_y: dy, scale, z_index: HOVER_Z_INDEX }
}

/// Tracks which cell of one grid is currently magnified.
#[derive(Debug, Clone)]
pub struct Magnifier {
    scale: f64,
    hovered: Option<(String, HoverTransform)>,
}

impl Default for Magnifier {
    fn default() -> Self {
        Self::new(HOVER_SCALE)
    }
}

impl Magnifier {
    #[must_use]
    pub fn new(scale: f64) -> Self {
        Self { scale, hovered: None }
    }

    /// Pointer entered `cell_id`. Any previously hovered cell is released.
    pub fn enter(&mut self, cell_id: &str, cell: Rect, container: Rect) -> HoverTransform {
        let transform = compute_hover_transform(cell, container, self.scale);
        self.hovered = Some((cell_id.to_owned(), transform));
        transform
    }

    /// Pointer left `cell_id`; returns the identity transform to restore.
    pub fn exit(&mut self, cell_id: &str) -> HoverTransform {
        if self.hovered.as_ref().is_some_and(|(id, _)| id == cell_id) {
            self.hovered = None;
        }
        HoverTransform::identity()
    }

    /// Transform currently applied to `cell_id`.
    #[must_use]
    pub fn transform_for(&self, cell_id: &str) -> HoverTransform {
        match &self.hovered {
            Some((id, t)) if id == cell_id => *t,
            _ => HoverTransform::identity(),
        }
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_ref().map(|(id, _)| id.as_str())
    }
}
