//! Hit-testing a pointer against placed cards.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::card::{CardId, LayoutSnapshot};
use crate::consts::{HANDLE_RADIUS_PX, HEADER_HEIGHT_PX};
use crate::geom::{Point, Rect};

/// Which part of a card was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The title strip; starts a drag.
    Header,
    /// Anywhere else inside the card.
    Body,
    ResizeHandle(ResizeAnchor),
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub card_id: CardId,
    pub part: HitPart,
}

/// Classify `pt` against a single card rectangle.
///
/// Handles extend `HANDLE_RADIUS_PX` on both sides of each edge; corners win
/// over edges, and handles win over the header.
#[must_use]
pub fn hit_card(pt: Point, rect: Rect) -> Option<HitPart> {
    let r = HANDLE_RADIUS_PX;
    let outer = Rect::new(rect.x - r, rect.y - r, rect.width + 2.0 * r, rect.height + 2.0 * r);
    if !outer.contains(pt) {
        return None;
    }

    let near_left = (pt.x - rect.x).abs() <= r;
    let near_right = (pt.x - rect.right()).abs() <= r;
    let near_top = (pt.y - rect.y).abs() <= r;
    let near_bottom = (pt.y - rect.bottom()).abs() <= r;

    let anchor = match (near_top, near_bottom, near_left, near_right) {
        (true, _, true, _) => Some(ResizeAnchor::Nw),
        (true, _, _, true) => Some(ResizeAnchor::Ne),
        (_, true, true, _) => Some(ResizeAnchor::Sw),
        (_, true, _, true) => Some(ResizeAnchor::Se),
        (true, ..) => Some(ResizeAnchor::N),
        (_, true, ..) => Some(ResizeAnchor::S),
        (_, _, true, _) => Some(ResizeAnchor::W),
        (_, _, _, true) => Some(ResizeAnchor::E),
        _ => None,
    };
    if let Some(anchor) = anchor {
        return Some(HitPart::ResizeHandle(anchor));
    }

    if !rect.contains(pt) {
        return None;
    }
    if pt.y - rect.y <= HEADER_HEIGHT_PX {
        Some(HitPart::Header)
    } else {
        Some(HitPart::Body)
    }
}

/// Test which card (if any) is under `pt`. Cards later in `order` are drawn
/// on top and are checked first.
#[must_use]
pub fn hit_test(pt: Point, layout: &LayoutSnapshot, order: &[CardId]) -> Option<Hit> {
    order.iter().rev().find_map(|id| {
        let card = layout.get(id)?;
        hit_card(pt, card.rect()).map(|part| Hit { card_id: id.clone(), part })
    })
}
