use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::store::MemoryStore;

fn recorder() -> (Rc<RefCell<Vec<bool>>>, impl FnMut(bool) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |v| sink.borrow_mut().push(v))
}

#[test]
fn defaults_to_hidden() {
    let flag = SettingsVisibility::load(MemoryStore::new());
    assert!(!flag.is_visible());
}

#[test]
fn restores_from_session() {
    let mut session = MemoryStore::new();
    session.set(SETTINGS_VISIBLE_KEY, "true".into()).unwrap();
    assert!(SettingsVisibility::load(session).is_visible());
}

#[test]
fn garbage_session_value_is_hidden() {
    let mut session = MemoryStore::new();
    session.set(SETTINGS_VISIBLE_KEY, "yes please".into()).unwrap();
    assert!(!SettingsVisibility::load(session).is_visible());
}

#[test]
fn toggle_persists_and_notifies() {
    let mut flag = SettingsVisibility::load(MemoryStore::new());
    let (seen, listener) = recorder();
    flag.subscribe(listener);

    assert!(flag.toggle().unwrap());
    assert!(!flag.toggle().unwrap());

    assert_eq!(*seen.borrow(), vec![true, false]);
    assert_eq!(flag.session().get(SETTINGS_VISIBLE_KEY).as_deref(), Some("false"));
}

#[test]
fn setting_same_value_does_not_notify() {
    let mut flag = SettingsVisibility::load(MemoryStore::new());
    let (seen, listener) = recorder();
    flag.subscribe(listener);
    flag.set(false).unwrap();
    assert!(seen.borrow().is_empty());
}

#[test]
fn unsubscribe_stops_notifications() {
    let mut flag = SettingsVisibility::load(MemoryStore::new());
    let (seen_a, a) = recorder();
    let (seen_b, b) = recorder();
    let id_a = flag.subscribe(a);
    flag.subscribe(b);

    assert!(flag.unsubscribe(id_a));
    assert!(!flag.unsubscribe(id_a));
    flag.set(true).unwrap();

    assert!(seen_a.borrow().is_empty());
    assert_eq!(*seen_b.borrow(), vec![true]);
}
