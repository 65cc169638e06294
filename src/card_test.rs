#![allow(clippy::float_cmp)]

use super::*;

fn spec(id: &str, count: usize) -> CardSpec {
    let items = (0..count)
        .map(|i| StatusCell::new(format!("{id}-{i}"), format!("host {i}"), true))
        .collect();
    CardSpec::new(id, items)
}

fn at(snapshot: &LayoutSnapshot, id: &str) -> (f64, f64, f64, f64) {
    let c = snapshot.get(id).copied().unwrap();
    (c.x, c.y, c.width, c.height)
}

// =============================================================
// default_card_size
// =============================================================

#[test]
fn default_size_table() {
    assert_eq!(default_card_size(0), Size::new(300.0, 250.0));
    assert_eq!(default_card_size(3), Size::new(300.0, 250.0));
    assert_eq!(default_card_size(4), Size::new(301.0, 279.0));
    assert_eq!(default_card_size(5), Size::new(482.0, 288.0));
    assert_eq!(default_card_size(40), Size::new(482.0, 288.0));
}

#[test]
fn default_size_uses_item_count_hint() {
    let mut card = spec("g", 1);
    card.item_count_hint = 4;
    assert_eq!(card.default_size(), Size::new(301.0, 279.0));
}

// =============================================================
// effective_container_width
// =============================================================

#[test]
fn container_width_fallback() {
    assert_eq!(effective_container_width(Some(640.0)), 640.0);
    assert_eq!(effective_container_width(Some(0.0)), FALLBACK_CONTAINER_WIDTH);
    assert_eq!(effective_container_width(Some(-5.0)), FALLBACK_CONTAINER_WIDTH);
    assert_eq!(effective_container_width(Some(f64::NAN)), FALLBACK_CONTAINER_WIDTH);
    assert_eq!(effective_container_width(None), FALLBACK_CONTAINER_WIDTH);
}

// =============================================================
// layout: fresh
// =============================================================

#[test]
fn five_large_groups_in_1000px() {
    let cards: Vec<CardSpec> = (1..=5).map(|i| spec(&format!("g{i}"), 12)).collect();
    let snap = layout(&cards, 1000.0, None);

    assert_eq!(at(&snap, "g1"), (0.0, 0.0, 482.0, 288.0));
    assert_eq!(at(&snap, "g2"), (506.0, 0.0, 482.0, 288.0));
    assert_eq!(at(&snap, "g3"), (0.0, 312.0, 482.0, 288.0));
    assert_eq!(at(&snap, "g4"), (506.0, 312.0, 482.0, 288.0));
    assert_eq!(at(&snap, "g5"), (0.0, 624.0, 482.0, 288.0));
}

#[test]
fn row_height_is_tallest_card_in_row() {
    let cards = vec![spec("a", 2), spec("b", 4), spec("c", 9)];
    // a: 300x250 @0, b: 301x279 @324, c: 482 wide → 649+482 > 1000 → wraps
    let snap = layout(&cards, 1000.0, None);
    assert_eq!(at(&snap, "a"), (0.0, 0.0, 300.0, 250.0));
    assert_eq!(at(&snap, "b"), (324.0, 0.0, 301.0, 279.0));
    assert_eq!(at(&snap, "c"), (0.0, 279.0 + CARD_GAP, 482.0, 288.0));
}

#[test]
fn zero_width_uses_fallback() {
    let cards: Vec<CardSpec> = (1..=3).map(|i| spec(&format!("g{i}"), 1)).collect();
    assert_eq!(layout(&cards, 0.0, None), layout(&cards, FALLBACK_CONTAINER_WIDTH, None));
}

#[test]
fn card_wider_than_container_still_placed_at_row_start() {
    let cards = vec![spec("a", 9), spec("b", 9)];
    let snap = layout(&cards, 400.0, None);
    // the very first card wraps onto an empty row at y = 0 + gap
    assert_eq!(snap.get("a").map(|c| c.x), Some(0.0));
    assert_eq!(snap.get("b").map(|c| c.x), Some(0.0));
}

#[test]
fn fresh_layout_fits_container() {
    let counts = [1, 4, 7, 3, 12, 4, 0, 5, 2];
    let cards: Vec<CardSpec> = counts.iter().enumerate().map(|(i, n)| spec(&format!("c{i}"), *n)).collect();
    for width in [700.0, 1000.0, 1333.0, 1920.0] {
        let snap = layout(&cards, width, None);
        for (_, c) in snap.iter() {
            assert!(c.x + c.width <= width, "card overflows {width}: {c:?}");
        }
    }
}

#[test]
fn cards_in_same_row_do_not_overlap() {
    let counts = [1, 4, 7, 3, 12, 4, 0, 5, 2];
    let cards: Vec<CardSpec> = counts.iter().enumerate().map(|(i, n)| spec(&format!("c{i}"), *n)).collect();
    let snap = layout(&cards, 1200.0, None);
    let rects: Vec<Rect> = cards.iter().filter_map(|c| snap.get(&c.id)).map(CardLayout::rect).collect();
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            let disjoint = a.right() <= b.x || b.right() <= a.x || a.bottom() <= b.y || b.bottom() <= a.y;
            assert!(disjoint, "{a:?} overlaps {b:?}");
        }
    }
}

#[test]
fn empty_card_list() {
    assert!(layout(&[], 1000.0, None).is_empty());
}

// =============================================================
// layout: with stored entries
// =============================================================

#[test]
fn stored_snapshot_round_trip_is_idempotent() {
    let cards: Vec<CardSpec> = [3, 4, 8, 1, 15].iter().enumerate().map(|(i, n)| spec(&format!("g{i}"), *n)).collect();
    let first = layout(&cards, 1100.0, None);
    let stored = StoredLayout::from(&first);
    let second = layout(&cards, 1100.0, Some(&stored));
    assert_eq!(first, second);
}

#[test]
fn stored_size_and_position_win() {
    let cards = vec![spec("a", 2), spec("b", 2)];
    let mut stored = StoredLayout::new();
    stored.insert("a".into(), StoredCard { width: 640.0, height: 400.0, x: Some(10.0), y: Some(700.0) });
    let snap = layout(&cards, 700.0, Some(&stored));
    assert_eq!(at(&snap, "a"), (10.0, 700.0, 640.0, 400.0));
    // b flows after a's stored width: 640 + 24 + 300 > 700 → wraps below a's stored height
    assert_eq!(at(&snap, "b"), (0.0, 424.0, 300.0, 250.0));
}

#[test]
fn new_card_appends_into_flow_using_stored_sizes() {
    let cards = vec![spec("a", 2), spec("b", 2), spec("new", 2)];
    let mut stored = StoredLayout::new();
    stored.insert("a".into(), StoredCard { width: 300.0, height: 250.0, x: Some(0.0), y: Some(0.0) });
    stored.insert("b".into(), StoredCard { width: 300.0, height: 250.0, x: Some(324.0), y: Some(0.0) });
    let snap = layout(&cards, 1000.0, Some(&stored));
    assert_eq!(at(&snap, "new"), (648.0, 0.0, 300.0, 250.0));
}

#[test]
fn size_only_entry_is_reflowed() {
    let cards = vec![spec("a", 2), spec("b", 2)];
    let mut stored = StoredLayout::new();
    stored.insert("b".into(), StoredCard { width: 800.0, height: 300.0, x: None, y: None });
    let snap = layout(&cards, 1000.0, Some(&stored));
    assert_eq!(at(&snap, "b"), (0.0, 274.0, 800.0, 300.0));
}

#[test]
fn partial_position_keeps_stored_axis() {
    let cards = vec![spec("a", 2)];
    let mut stored = StoredLayout::new();
    stored.insert("a".into(), StoredCard { width: 300.0, height: 250.0, x: Some(55.0), y: None });
    let snap = layout(&cards, 1000.0, Some(&stored));
    assert_eq!(at(&snap, "a"), (55.0, 0.0, 300.0, 250.0));
}

#[test]
fn stale_stored_keys_are_ignored() {
    let cards = vec![spec("a", 2)];
    let mut stored = StoredLayout::new();
    stored.insert("gone".into(), StoredCard { width: 300.0, height: 250.0, x: Some(0.0), y: Some(0.0) });
    let snap = layout(&cards, 1000.0, Some(&stored));
    assert_eq!(snap.len(), 1);
    assert!(snap.get("gone").is_none());
}

// =============================================================
// Serialization
// =============================================================

#[test]
fn snapshot_serializes_as_flat_map() {
    let mut snap = LayoutSnapshot::new();
    snap.insert("42", CardLayout { width: 300.0, height: 250.0, x: 0.0, y: 24.0 });
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json, serde_json::json!({ "42": { "width": 300.0, "height": 250.0, "x": 0.0, "y": 24.0 } }));
}

#[test]
fn stored_card_accepts_missing_coordinates() {
    let card: StoredCard = serde_json::from_str(r#"{"width": 300, "height": 250}"#).unwrap();
    assert_eq!(card.x, None);
    assert_eq!(card.y, None);
}

// =============================================================
// ResizeBounds
// =============================================================

#[test]
fn resize_clamped_to_minimums() {
    let bounds = ResizeBounds::for_card(0.0, 1000.0);
    assert_eq!(bounds.clamp(Size::new(100.0, 100.0)), Size::new(150.0, 150.0));
    assert_eq!(bounds.clamp(Size::new(-40.0, -1.0)), Size::new(150.0, 150.0));
}

#[test]
fn resize_max_width_is_space_right_of_card() {
    let bounds = ResizeBounds::for_card(700.0, 1000.0);
    assert_eq!(bounds.clamp(Size::new(900.0, 2000.0)), Size::new(300.0, 800.0));
}

#[test]
fn resize_max_width_never_below_minimum() {
    let bounds = ResizeBounds::for_card(950.0, 1000.0);
    assert_eq!(bounds.max.width, MIN_CARD_WIDTH);
}
