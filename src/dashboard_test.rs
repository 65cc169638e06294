#![allow(clippy::float_cmp)]

use super::*;
use crate::card::CardLayout;
use crate::feed::{GroupItem, Host, HostGroup, card_spec_from_group};
use crate::geom::Size;
use crate::hex::StatusCell;
use crate::store::{CARD_SIZES_KEY, MemoryStore, SETTINGS_VISIBLE_KEY};
use crate::visibility::SettingsVisibility;

// =============================================================
// Helpers
// =============================================================

fn cells(prefix: &str, n: usize) -> Vec<StatusCell> {
    (0..n).map(|i| StatusCell::new(format!("{prefix}{i}"), format!("host-{i}"), i % 2 == 0)).collect()
}

fn spec(id: &str, n: usize) -> CardSpec {
    CardSpec::new(id, cells(id, n))
}

fn dashboard() -> Dashboard<MemoryStore> {
    Dashboard::new(MemoryStore::new(), 1000.0, 2.2)
}

fn pos(d: &Dashboard<MemoryStore>, id: &str) -> Point {
    d.layout().get(id).map(CardLayout::position).unwrap()
}

// =============================================================
// Submit and restore
// =============================================================

#[test]
fn submit_flows_and_persists() {
    let mut d = dashboard();
    d.submit(vec![spec("a", 3), spec("b", 4)]).unwrap();

    assert_eq!(pos(&d, "a"), Point::new(0.0, 0.0));
    assert_eq!(pos(&d, "b"), Point::new(324.0, 0.0));
    assert_eq!(d.layout().get("b").unwrap().size(), Size::new(301.0, 279.0));
    assert!(d.store().get(CARD_SIZES_KEY).is_some());
    assert_eq!(d.mode(), EditMode::Viewing);
}

#[test]
fn restore_uses_stored_layout() {
    let mut d = dashboard();
    d.submit(vec![spec("a", 3)]).unwrap();
    d.begin_edit();
    d.on_pointer_down(Point::new(150.0, 20.0));
    d.on_pointer_up(Point::new(250.0, 220.0));
    d.save().unwrap();

    let mut restored = Dashboard::new(d.store().clone(), 1000.0, 2.2);
    restored.restore(vec![spec("a", 3), spec("new", 2)]);
    assert_eq!(pos(&restored, "a"), Point::new(100.0, 200.0));
    // new card flows after a's reserved slot
    assert_eq!(pos(&restored, "new"), Point::new(324.0, 0.0));
}

#[test]
fn restore_without_store_flows_defaults() {
    let mut d = dashboard();
    d.restore(vec![spec("a", 12)]);
    assert_eq!(d.layout().get("a").unwrap().size(), Size::new(482.0, 288.0));
}

#[test]
fn submit_replaces_previous_cards() {
    let mut d = dashboard();
    d.submit(vec![spec("a", 1), spec("b", 1)]).unwrap();
    d.submit(vec![spec("c", 1)]).unwrap();
    assert_eq!(d.cards().len(), 1);
    assert!(d.card("a").is_none());
    assert!(d.layout().get("a").is_none());
}

#[test]
fn submit_from_panel_hides_the_panel() {
    let mut session = MemoryStore::new();
    session.set(SETTINGS_VISIBLE_KEY, "true".into()).unwrap();
    let mut panel = SettingsVisibility::load(session);
    assert!(panel.is_visible());

    let mut d = dashboard();
    d.submit_from_panel(vec![spec("a", 3)], &mut panel).unwrap();
    assert!(!panel.is_visible());
    assert_eq!(panel.session().get(SETTINGS_VISIBLE_KEY).as_deref(), Some("false"));
    assert!(d.card("a").is_some());
    assert!(d.store().get(CARD_SIZES_KEY).is_some());
}

// =============================================================
// Refresh
// =============================================================

#[test]
fn refresh_replaces_items_without_moving_cards() {
    let mut d = dashboard();
    d.submit(vec![spec("a", 3), spec("b", 3)]).unwrap();
    d.observe_grid_resize("a", 280.0, 200.0).unwrap();
    let before = d.layout().clone();

    let updated = d.apply_refresh(vec![spec("a", 7), spec("zzz", 2)]);
    assert_eq!(updated, 1);
    assert_eq!(d.layout(), &before);

    let a = d.card("a").unwrap();
    assert_eq!(a.grid.items().len(), 7);
    assert_eq!(a.spec.item_count_hint, 7);
    assert_eq!(a.grid.layout().unwrap().cell_count(), 7);
}

#[test]
fn refresh_before_grid_measured_keeps_items() {
    let mut d = dashboard();
    d.submit(vec![spec("a", 2)]).unwrap();
    d.apply_refresh(vec![spec("a", 5)]);
    let a = d.card("a").unwrap();
    assert_eq!(a.grid.items().len(), 5);
    assert!(a.grid.layout().is_none());
}

// =============================================================
// Resize notifications
// =============================================================

#[test]
fn grid_resize_packs_cells() {
    let mut d = dashboard();
    d.submit(vec![spec("a", 6)]).unwrap();
    let layout = d.observe_grid_resize("a", 400.0, 300.0).unwrap();
    assert_eq!(layout.cell_count(), 6);
}

#[test]
fn grid_resize_unknown_card_is_error() {
    let mut d = dashboard();
    let err = d.observe_grid_resize("nope", 400.0, 300.0).unwrap_err();
    assert!(matches!(err, LayoutError::UnknownCard(ref id) if id == "nope"));
    assert_eq!(err.error_code(), "E_UNKNOWN_CARD");
}

#[test]
fn container_resize_does_not_reflow() {
    let mut d = dashboard();
    d.submit(vec![spec("a", 3), spec("b", 3), spec("c", 3)]).unwrap();
    let before = d.layout().clone();
    d.observe_container_resize(400.0);
    assert_eq!(d.container_width(), 400.0);
    assert_eq!(d.layout(), &before);
}

#[test]
fn container_resize_bounds_later_resizes() {
    let mut d = dashboard();
    d.submit(vec![spec("a", 3)]).unwrap();
    d.observe_container_resize(500.0);
    d.begin_edit();
    // east edge of a at x = 300
    d.on_pointer_down(Point::new(300.0, 120.0));
    d.on_pointer_up(Point::new(900.0, 120.0));
    assert_eq!(d.layout().get("a").unwrap().width, 500.0);
}

// =============================================================
// Hover
// =============================================================

#[test]
fn hover_uses_configured_scale() {
    let mut d = Dashboard::new(MemoryStore::new(), 1000.0, 1.5);
    d.submit(vec![spec("a", 3)]).unwrap();
    let container = Rect::new(0.0, 0.0, 500.0, 500.0);
    let cell = Rect::new(200.0, 200.0, 80.0, 70.0);

    let t = d.hover_enter("a", "a0", cell, container).unwrap();
    assert_eq!(t.scale, 1.5);
    assert_eq!(t.z_index, 20);
    assert_eq!(d.card("a").unwrap().magnifier.hovered(), Some("a0"));

    let back = d.hover_exit("a", "a0").unwrap();
    assert!(back.is_identity());
    assert!(d.hover_enter("b", "b0", cell, container).is_err());
}

#[test]
fn hovering_one_host_of_a_shared_item_leaves_siblings_alone() {
    let host = |id: &str| Host { hostid: id.into(), host: id.into(), name: id.into() };
    let group = HostGroup {
        groupid: "7".into(),
        name: "Edge".into(),
        hosts: vec![host("edge-2"), host("edge-3")],
        items: Some(vec![GroupItem {
            itemid: "101".into(),
            key_: "icmpping".into(),
            hosts: vec![host("edge-2"), host("edge-3")],
            lastvalue: "1".into(),
        }]),
    };
    let mut d = dashboard();
    d.submit(vec![card_spec_from_group(&group)]).unwrap();
    let ids: Vec<String> = d.card("7").unwrap().spec.items.iter().map(|c| c.id.clone()).collect();
    let (first, second) = (&ids[0], &ids[1]);

    let container = Rect::new(0.0, 0.0, 500.0, 500.0);
    d.hover_enter("7", first, Rect::new(200.0, 200.0, 80.0, 70.0), container).unwrap();
    let magnifier = &d.card("7").unwrap().magnifier;
    assert!(!magnifier.transform_for(first).is_identity());
    assert!(magnifier.transform_for(second).is_identity());

    // leaving the sibling must not release the hovered cell
    d.hover_exit("7", second).unwrap();
    assert_eq!(d.card("7").unwrap().magnifier.hovered(), Some(first.as_str()));
}

// =============================================================
// Edit mode
// =============================================================

#[test]
fn save_persists_edited_layout() {
    let mut d = dashboard();
    d.submit(vec![spec("a", 3)]).unwrap();
    d.begin_edit();
    d.on_pointer_down(Point::new(150.0, 20.0));
    d.on_pointer_move(Point::new(160.0, 30.0));
    d.on_pointer_up(Point::new(170.0, 40.0));
    d.save().unwrap();

    let stored = load_stored_layout(d.store()).unwrap();
    let a = stored.get("a").unwrap();
    assert_eq!((a.x, a.y), (Some(20.0), Some(20.0)));
    assert_eq!(d.mode(), EditMode::Viewing);
}

#[test]
fn cancel_reloads_persisted_layout() {
    let mut d = dashboard();
    d.submit(vec![spec("a", 3)]).unwrap();
    d.begin_edit();
    d.on_pointer_down(Point::new(150.0, 20.0));
    d.on_pointer_up(Point::new(650.0, 420.0));
    assert_eq!(pos(&d, "a"), Point::new(500.0, 400.0));

    d.cancel().unwrap();
    assert_eq!(pos(&d, "a"), Point::new(0.0, 0.0));
    assert_eq!(d.mode(), EditMode::Viewing);
}

#[test]
fn save_and_cancel_require_edit_mode() {
    let mut d = dashboard();
    d.submit(vec![spec("a", 3)]).unwrap();
    assert!(matches!(d.save(), Err(LayoutError::NotEditing)));
    assert!(matches!(d.cancel(), Err(LayoutError::NotEditing)));
}

#[test]
fn pointer_events_ignored_while_viewing() {
    let mut d = dashboard();
    d.submit(vec![spec("a", 3)]).unwrap();
    assert!(d.on_pointer_down(Point::new(150.0, 20.0)).is_empty());
    assert!(d.on_pointer_up(Point::new(650.0, 420.0)).is_empty());
    assert_eq!(pos(&d, "a"), Point::new(0.0, 0.0));
}
