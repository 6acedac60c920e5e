// SPDX-License-Identifier: MPL-2.0
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tempfile::tempdir;
use toast_store::config::{self, Config, StoreConfig, ToastsConfig, DEFAULT_REMOVAL_DELAY_MS};
use toast_store::notifications::{NotificationStore, Toast, ToastPatch, ToastPayload};
use toast_store::time::ManualClock;

const REMOVAL_DELAY: Duration = Duration::from_millis(DEFAULT_REMOVAL_DELAY_MS);

fn store() -> (NotificationStore, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::new());
    let store = NotificationStore::new(StoreConfig::default(), clock.clone(), clock.clone());
    (store, clock)
}

/// Records every broadcast as `(title, open)` pairs.
fn record(store: &NotificationStore) -> Rc<RefCell<Vec<Vec<(Option<String>, bool)>>>> {
    let broadcasts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&broadcasts);
    store.subscribe(move |toasts: &[Toast]| {
        sink.borrow_mut().push(
            toasts
                .iter()
                .map(|toast| (toast.title().map(str::to_string), toast.is_open()))
                .collect(),
        );
    });
    broadcasts
}

#[test]
fn saved_toast_scenario() {
    let (store, clock) = store();

    let handle = store.toast(ToastPayload::new().title("Saved").description("Changes saved"));
    assert!(uuid::Uuid::parse_str(handle.id().as_str()).is_ok());

    let broadcasts = record(&store);
    assert_eq!(
        broadcasts.borrow().last().cloned(),
        Some(vec![(Some("Saved".to_string()), true)])
    );

    handle.dismiss();
    assert_eq!(
        broadcasts.borrow().last().cloned(),
        Some(vec![(Some("Saved".to_string()), false)])
    );

    clock.advance(REMOVAL_DELAY);
    assert_eq!(broadcasts.borrow().last().cloned(), Some(Vec::new()));
    assert!(store.is_empty());
}

#[test]
fn sixth_toast_drops_the_oldest() {
    let (store, _clock) = store();
    let handles: Vec<_> = (1..=6)
        .map(|n| store.toast(ToastPayload::new().title(format!("toast {n}"))))
        .collect();

    let toasts = store.toasts();
    assert_eq!(toasts.len(), 5);
    assert_eq!(toasts[0].id(), handles[5].id());
    assert!(store.get(handles[0].id()).is_none());
}

#[test]
fn update_round_trip_keeps_id_and_open_flag() {
    let (store, _clock) = store();
    let handle = store.toast(ToastPayload::new().title("A"));

    let toast = store.get(handle.id()).expect("toast should be active");
    assert_eq!(toast.title(), Some("A"));
    assert!(toast.is_open());

    handle.update(ToastPatch::new().title("B"));

    let toast = store.get(handle.id()).expect("toast should be active");
    assert_eq!(toast.id(), handle.id());
    assert_eq!(toast.title(), Some("B"));
    assert!(toast.is_open());
}

#[test]
fn dismiss_twice_removes_once() {
    let (store, clock) = store();
    let handle = store.toast(ToastPayload::new().title("once"));
    let other = store.toast(ToastPayload::new().title("other"));

    handle.dismiss();
    handle.dismiss();
    assert_eq!(clock.pending(), 1);

    assert_eq!(clock.advance(REMOVAL_DELAY), 1);
    assert!(store.get(handle.id()).is_none());
    assert!(store.get(other.id()).is_some());

    clock.advance(REMOVAL_DELAY * 2);
    assert_eq!(store.len(), 1);
}

#[test]
fn dismiss_all_then_delay_empties_list() {
    let (store, clock) = store();
    for title in ["one", "two", "three"] {
        store.toast(ToastPayload::new().title(title));
    }

    toast_store::notifications::global::install(store.clone());
    toast_store::dismiss_all();
    assert!(store.toasts().iter().all(|toast| !toast.is_open()));
    assert_eq!(store.len(), 3);

    clock.advance(REMOVAL_DELAY);
    assert!(store.is_empty());
    toast_store::notifications::global::uninstall();
}

#[test]
fn every_listener_sees_every_change_in_order() {
    let (store, _clock) = store();
    let first = record(&store);
    let second = record(&store);

    store.toast(ToastPayload::new().title("x"));
    store.remove(None);

    assert_eq!(*first.borrow(), *second.borrow());
    assert_eq!(first.borrow().len(), 3);
}

#[test]
fn store_built_from_config_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    let settings = Config {
        toasts: ToastsConfig {
            max_visible: Some(2),
            removal_delay_ms: Some(250),
        },
    };
    config::save_to_path(&settings, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    let clock = Rc::new(ManualClock::new());
    let store = NotificationStore::new(loaded.store_config(), clock.clone(), clock.clone());

    for title in ["a", "b", "c"] {
        store.toast(ToastPayload::new().title(title));
    }
    assert_eq!(store.len(), 2);

    store.dismiss_all();
    clock.advance(Duration::from_millis(249));
    assert_eq!(store.len(), 2);
    clock.advance(Duration::from_millis(1));
    assert!(store.is_empty());

    dir.close().expect("Failed to close temporary directory");
}
