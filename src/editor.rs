//! Card layout editor: the edit-mode state machine and pointer gestures.
//!
//! The editor owns two copies of the layout. `persisted` is the last
//! committed layout; `working` is what the user sees and, while editing,
//! what drag and resize gestures mutate. Saving promotes the working copy,
//! cancelling throws it away. No collision detection or re-flow happens
//! during manual edits; overlapping and off-canvas cards are allowed.
//!
//! The host layer feeds raw pointer coordinates in and applies the returned
//! [`Action`]s; the editor itself never touches storage.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use tracing::debug;

use crate::card::{CardId, CardLayout, LayoutSnapshot, effective_container_width};
use crate::error::LayoutError;
use crate::geom::Point;
use crate::hit::{HitPart, hit_test};
use crate::input::{DragSession, EditMode, Gesture, ResizeSession};

/// Actions returned from editor handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A card's size or position changed in the working copy.
    LayoutChanged { id: CardId, layout: CardLayout },
    /// The working copy was committed and must be persisted.
    SnapshotSaved(LayoutSnapshot),
    ModeChanged(EditMode),
    SetCursor(&'static str),
}

pub struct LayoutEditor {
    mode: EditMode,
    persisted: LayoutSnapshot,
    working: LayoutSnapshot,
    /// Draw order; later ids are on top.
    order: Vec<CardId>,
    gesture: Gesture,
    container_width: f64,
}

impl LayoutEditor {
    #[must_use]
    pub fn new(container_width: f64) -> Self {
        Self {
            mode: EditMode::Viewing,
            persisted: LayoutSnapshot::new(),
            working: LayoutSnapshot::new(),
            order: Vec::new(),
            gesture: Gesture::Idle,
            container_width: effective_container_width(Some(container_width)),
        }
    }

    // --- Data inputs ---

    /// Replace both copies with a freshly flowed layout and return to viewing.
    pub fn reset(&mut self, snapshot: LayoutSnapshot, order: Vec<CardId>) {
        self.persisted = snapshot.clone();
        self.working = snapshot;
        self.order = order;
        self.gesture = Gesture::Idle;
        self.mode = EditMode::Viewing;
    }

    /// Container width used for resize bounds. Zero or unknown falls back.
    pub fn set_container_width(&mut self, width: f64) {
        self.container_width = effective_container_width(Some(width));
    }

    // --- Mode transitions ---

    /// `viewing → editing`. A no-op when already editing.
    pub fn begin_edit(&mut self) -> Vec<Action> {
        if self.mode == EditMode::Editing {
            return Vec::new();
        }
        self.working = self.persisted.clone();
        self.transition(EditMode::Editing);
        vec![Action::ModeChanged(EditMode::Editing), Action::SetCursor("grab")]
    }

    /// `editing → saving → viewing`: commit the working copy.
    ///
    /// # Errors
    ///
    /// Returns `NotEditing` outside edit mode.
    pub fn save(&mut self) -> Result<Vec<Action>, LayoutError> {
        if self.mode != EditMode::Editing {
            return Err(LayoutError::NotEditing);
        }
        self.gesture = Gesture::Idle;
        self.transition(EditMode::Saving);
        self.persisted = self.working.clone();
        let saved = Action::SnapshotSaved(self.persisted.clone());
        self.transition(EditMode::Viewing);
        Ok(vec![
            Action::ModeChanged(EditMode::Saving),
            saved,
            Action::ModeChanged(EditMode::Viewing),
            Action::SetCursor("default"),
        ])
    }

    /// `editing → cancelling → viewing`: discard the working copy.
    ///
    /// `reloaded` is the layout read back from storage; without one the
    /// pre-edit copy is restored.
    ///
    /// # Errors
    ///
    /// Returns `NotEditing` outside edit mode.
    pub fn cancel(&mut self, reloaded: Option<LayoutSnapshot>) -> Result<Vec<Action>, LayoutError> {
        if self.mode != EditMode::Editing {
            return Err(LayoutError::NotEditing);
        }
        self.gesture = Gesture::Idle;
        self.transition(EditMode::Cancelling);
        if let Some(snapshot) = reloaded {
            self.persisted = snapshot;
        }
        self.working = self.persisted.clone();
        self.transition(EditMode::Viewing);
        Ok(vec![
            Action::ModeChanged(EditMode::Cancelling),
            Action::ModeChanged(EditMode::Viewing),
            Action::SetCursor("default"),
        ])
    }

    fn transition(&mut self, next: EditMode) {
        debug!(from = ?self.mode, to = ?next, "edit mode transition");
        self.mode = next;
    }

    // --- Input events ---

    /// Start a drag (header) or resize (handle) on the topmost card under `pt`.
    ///
    /// Ignored outside edit mode and while another gesture is active.
    pub fn on_pointer_down(&mut self, pt: Point) -> Vec<Action> {
        if !self.mode.allows_gestures() || self.gesture.is_active() {
            return Vec::new();
        }
        let Some(hit) = hit_test(pt, &self.working, &self.order) else {
            return Vec::new();
        };
        let Some(card) = self.working.get(&hit.card_id).copied() else {
            return Vec::new();
        };

        match hit.part {
            HitPart::Header => {
                self.gesture = Gesture::Dragging(DragSession {
                    card_id: hit.card_id,
                    start_pointer: pt,
                    start_position: card.position(),
                });
                vec![Action::SetCursor("grabbing")]
            }
            HitPart::ResizeHandle(anchor) => {
                self.gesture =
                    Gesture::Resizing(ResizeSession::new(hit.card_id, anchor, pt, card, self.container_width));
                vec![Action::SetCursor(anchor.cursor())]
            }
            HitPart::Body => Vec::new(),
        }
    }

    /// Apply the pointer position to the active gesture's card.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        self.apply_gesture(pt).into_iter().collect()
    }

    /// Apply the final pointer position and end the gesture.
    pub fn on_pointer_up(&mut self, pt: Point) -> Vec<Action> {
        if !self.gesture.is_active() {
            return Vec::new();
        }
        let mut actions: Vec<Action> = self.apply_gesture(pt).into_iter().collect();
        self.gesture = Gesture::Idle;
        actions.push(Action::SetCursor("grab"));
        actions
    }

    fn apply_gesture(&mut self, pt: Point) -> Option<Action> {
        let (id, layout) = match &self.gesture {
            Gesture::Idle => return None,
            Gesture::Dragging(drag) => {
                let current = self.working.get(&drag.card_id)?;
                let pos = drag.position_at(pt);
                (drag.card_id.clone(), CardLayout { x: pos.x, y: pos.y, ..*current })
            }
            Gesture::Resizing(resize) => (resize.card_id.clone(), resize.layout_at(pt)),
        };
        let slot = self.working.get_mut(&id)?;
        *slot = layout;
        Some(Action::LayoutChanged { id, layout })
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// The layout currently shown (the working copy).
    #[must_use]
    pub fn layout(&self) -> &LayoutSnapshot {
        &self.working
    }

    /// The last committed layout.
    #[must_use]
    pub fn persisted(&self) -> &LayoutSnapshot {
        &self.persisted
    }

    #[must_use]
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    #[must_use]
    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    #[must_use]
    pub fn order(&self) -> &[CardId] {
        &self.order
    }
}
