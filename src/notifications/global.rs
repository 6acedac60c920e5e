// SPDX-License-Identifier: MPL-2.0
//! Per-thread store used by the free `toast` / `subscribe` / `dismiss_all`
//! entry points.
//!
//! The application installs its store once at startup. Until then, or after
//! [`uninstall`], the entry points talk to a headless store whose timers are
//! dropped, so nothing scheduled there outlives the environment.

use std::cell::RefCell;

use super::listeners::IntoListenerResult;
use super::notification::{Toast, ToastId, ToastPayload};
use super::store::{NotificationStore, Subscription, ToastHandle};
use crate::config::StoreConfig;

thread_local! {
    static CURRENT: RefCell<Option<NotificationStore>> = const { RefCell::new(None) };
}

/// Makes `store` the current store, returning the previous one after resetting it.
pub fn install(store: NotificationStore) -> Option<NotificationStore> {
    let previous = CURRENT.with(|current| current.borrow_mut().replace(store));
    if let Some(previous) = &previous {
        previous.reset();
    }
    previous
}

/// Removes the current store, resetting it so no removal timer survives.
pub fn uninstall() -> Option<NotificationStore> {
    let previous = CURRENT.with(|current| current.borrow_mut().take());
    if let Some(previous) = &previous {
        previous.reset();
    }
    previous
}

/// Returns the current store, installing a headless one if none is set.
#[must_use]
pub fn current() -> NotificationStore {
    CURRENT.with(|current| {
        current
            .borrow_mut()
            .get_or_insert_with(|| NotificationStore::headless(StoreConfig::default()))
            .clone()
    })
}

/// Enqueues a toast on the current store.
pub fn toast(payload: ToastPayload) -> ToastHandle {
    current().toast(payload)
}

/// Subscribes to the current store.
pub fn subscribe<F, R>(listener: F) -> Subscription
where
    F: Fn(&[Toast]) -> R + 'static,
    R: IntoListenerResult,
{
    current().subscribe(listener)
}

/// Dismisses a toast, or every toast when `None`, on the current store.
pub fn dismiss(id: Option<&ToastId>) {
    current().dismiss(id);
}

/// Dismisses every toast on the current store.
pub fn dismiss_all() {
    current().dismiss_all();
}
