//! Input model: edit modes and the gesture state machine.
//!
//! `EditMode` is the coarse layout-editing mode of the dashboard. `Gesture`
//! is the active pointer gesture tracked between pointer-down and
//! pointer-up; each active variant owns a session value capturing everything
//! needed to compute the card's geometry from the current pointer, so no
//! state leaks out of the gesture once it ends.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::card::{CardId, CardLayout, ResizeBounds};
use crate::geom::{Point, Size};
use crate::hit::ResizeAnchor;

/// Layout editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Read-only layout; drag and resize are disabled.
    #[default]
    Viewing,
    /// Drag and resize mutate a working copy of the layout.
    Editing,
    /// The working copy is being committed.
    Saving,
    /// The working copy is being discarded.
    Cancelling,
}

impl EditMode {
    #[must_use]
    pub fn allows_gestures(self) -> bool {
        self == Self::Editing
    }
}

/// A card drag in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub card_id: CardId,
    /// Pointer position at pointer-down.
    pub start_pointer: Point,
    /// Card origin at pointer-down.
    pub start_position: Point,
}

impl DragSession {
    /// Card origin for the current pointer position. Not clamped to the container.
    #[must_use]
    pub fn position_at(&self, pointer: Point) -> Point {
        Point::new(
            self.start_position.x + (pointer.x - self.start_pointer.x),
            self.start_position.y + (pointer.y - self.start_pointer.y),
        )
    }
}

/// A card resize in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub card_id: CardId,
    pub anchor: ResizeAnchor,
    pub start_pointer: Point,
    /// Card geometry at pointer-down.
    pub start: CardLayout,
    pub bounds: ResizeBounds,
}

impl ResizeSession {
    #[must_use]
    pub fn new(card_id: CardId, anchor: ResizeAnchor, start_pointer: Point, start: CardLayout, container_width: f64) -> Self {
        let bounds = ResizeBounds::for_card(start.x, container_width);
        Self { card_id, anchor, start_pointer, start, bounds }
    }

    /// Card geometry for the current pointer position.
    ///
    /// The edge opposite the dragged handle stays fixed; size is clamped to
    /// the session bounds before the origin is derived from it.
    #[must_use]
    pub fn layout_at(&self, pointer: Point) -> CardLayout {
        let dx = pointer.x - self.start_pointer.x;
        let dy = pointer.y - self.start_pointer.y;
        let s = self.start;

        let mut width = s.width;
        if self.anchor.moves_right() {
            width += dx;
        } else if self.anchor.moves_left() {
            width -= dx;
        }
        let mut height = s.height;
        if self.anchor.moves_bottom() {
            height += dy;
        } else if self.anchor.moves_top() {
            height -= dy;
        }

        let size = self.bounds.clamp(Size::new(width, height));
        let x = if self.anchor.moves_left() { s.x + s.width - size.width } else { s.x };
        let y = if self.anchor.moves_top() { s.y + s.height - size.height } else { s.y };
        CardLayout::new(size, Point::new(x, y))
    }
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

impl Gesture {
    /// Id of the card the active gesture targets.
    #[must_use]
    pub fn card_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Dragging(d) => Some(&d.card_id),
            Self::Resizing(r) => Some(&r.card_id),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
