//! Card model and the greedy row-flow placement.
//!
//! Cards are placed left to right in input order, wrapping to a new row when
//! the next card would cross the container's right edge. A stored layout,
//! when present, is authoritative for sizes and for any positions it holds;
//! cards without a stored position are placed by the same cursor walk so new
//! cards append into the flow.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here fails. A zero, negative, or non-finite container width is
//! replaced by a fixed fallback so placement stays deterministic.

#[cfg(test)]
#[path = "card_test.rs"]
mod card_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::consts::{CARD_GAP, FALLBACK_CONTAINER_WIDTH, MAX_CARD_HEIGHT, MIN_CARD_HEIGHT, MIN_CARD_WIDTH};
use crate::geom::{Point, Rect, Size};
use crate::hex::StatusCell;

/// Unique identifier for a card (the monitored group id).
pub type CardId = String;

/// A card as supplied by the data collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSpec {
    pub id: CardId,
    /// Display title (group name).
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<StatusCell>,
    /// Item count the default size heuristic keys on.
    #[serde(default)]
    pub item_count_hint: usize,
}

impl CardSpec {
    #[must_use]
    pub fn new(id: impl Into<CardId>, items: Vec<StatusCell>) -> Self {
        let item_count_hint = items.len();
        Self { id: id.into(), title: String::new(), items, item_count_hint }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn default_size(&self) -> Size {
        default_card_size(self.item_count_hint)
    }
}

/// Size and position of one placed card, flattened the way it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardLayout {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

impl CardLayout {
    #[must_use]
    pub fn new(size: Size, position: Point) -> Self {
        Self { width: size.width, height: size.height, x: position.x, y: position.y }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Mapping from card id to its placed size and position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutSnapshot {
    cards: BTreeMap<CardId, CardLayout>,
}

impl LayoutSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CardLayout> {
        self.cards.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut CardLayout> {
        self.cards.get_mut(id)
    }

    pub fn insert(&mut self, id: impl Into<CardId>, card: CardLayout) {
        self.cards.insert(id.into(), card);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CardId, &CardLayout)> {
        self.cards.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// A persisted entry. Size is required; a missing coordinate is re-flowed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredCard {
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl From<CardLayout> for StoredCard {
    fn from(card: CardLayout) -> Self {
        Self { width: card.width, height: card.height, x: Some(card.x), y: Some(card.y) }
    }
}

/// Persisted layout as read back from storage, possibly partial.
pub type StoredLayout = BTreeMap<CardId, StoredCard>;

impl From<&LayoutSnapshot> for StoredLayout {
    fn from(snapshot: &LayoutSnapshot) -> Self {
        snapshot
            .iter()
            .map(|(id, card)| (id.clone(), StoredCard::from(*card)))
            .collect()
    }
}

/// Default card size by item count.
#[must_use]
pub fn default_card_size(item_count: usize) -> Size {
    match item_count {
        4 => Size::new(301.0, 279.0),
        n if n > 4 => Size::new(482.0, 288.0),
        _ => Size::new(300.0, 250.0),
    }
}

/// Substitute the fallback width for a missing or degenerate measurement.
#[must_use]
pub fn effective_container_width(measured: Option<f64>) -> f64 {
    match measured {
        Some(w) if w.is_finite() && w > 0.0 => w,
        _ => FALLBACK_CONTAINER_WIDTH,
    }
}

/// Running cursor of the greedy row-flow walk.
#[derive(Debug, Clone, Copy, Default)]
struct FlowCursor {
    x: f64,
    y: f64,
    row_height: f64,
}

impl FlowCursor {
    /// Reserve a slot for a card of `size`, wrapping first if it would overflow.
    fn place(&mut self, size: Size, container_width: f64) -> Point {
        if self.x + size.width > container_width {
            self.x = 0.0;
            self.y += self.row_height + CARD_GAP;
            self.row_height = 0.0;
        }
        let at = Point::new(self.x, self.y);
        self.x += size.width + CARD_GAP;
        self.row_height = self.row_height.max(size.height);
        at
    }
}

/// Place `cards` in order against `container_width`, merging `stored` when given.
#[must_use]
pub fn layout(cards: &[CardSpec], container_width: f64, stored: Option<&StoredLayout>) -> LayoutSnapshot {
    let container_width = effective_container_width(Some(container_width));
    let mut cursor = FlowCursor::default();
    let mut snapshot = LayoutSnapshot::new();

    for card in cards {
        let saved = stored.and_then(|s| s.get(&card.id));
        let size = saved.map_or_else(|| card.default_size(), |s| Size::new(s.width, s.height));
        let slot = cursor.place(size, container_width);
        let position = Point::new(
            saved.and_then(|s| s.x).unwrap_or(slot.x),
            saved.and_then(|s| s.y).unwrap_or(slot.y),
        );
        snapshot.insert(card.id.clone(), CardLayout::new(size, position));
    }

    info!(
        cards = cards.len(),
        container_width,
        restored = stored.is_some(),
        "card layout flowed"
    );
    snapshot
}

/// Bounds a manual resize must respect for a card whose left edge is at `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeBounds {
    pub min: Size,
    pub max: Size,
}

impl ResizeBounds {
    #[must_use]
    pub fn for_card(x: f64, container_width: f64) -> Self {
        Self {
            min: Size::new(MIN_CARD_WIDTH, MIN_CARD_HEIGHT),
            max: Size::new(MIN_CARD_WIDTH.max(container_width - x), MAX_CARD_HEIGHT),
        }
    }

    #[must_use]
    pub fn clamp(&self, size: Size) -> Size {
        Size::new(
            size.width.max(self.min.width).min(self.max.width),
            size.height.max(self.min.height).min(self.max.height),
        )
    }
}
