// SPDX-License-Identifier: MPL-2.0
//! Toast notification store.
//!
//! This module keeps the ordered, capacity-bounded list of active toasts
//! that every UI surface observes.
//!
//! # Components
//!
//! - [`notification`] - `Toast` entity, creation payload and update patch
//! - [`reducer`] - Pure state transitions over the active list
//! - [`scheduler`] - Removal timers, at most one per toast
//! - [`store`] - `NotificationStore` tying the above to listeners
//! - [`global`] - Per-thread store behind the free entry points
//!
//! # Usage
//!
//! ```
//! use toast_store::config::StoreConfig;
//! use toast_store::notifications::{NotificationStore, Toast, ToastPayload};
//!
//! let store = NotificationStore::headless(StoreConfig::default());
//! let subscription = store.subscribe(|toasts: &[Toast]| {
//!     println!("{} toast(s) active", toasts.len());
//! });
//!
//! let handle = store.toast(ToastPayload::new().title("Saved").description("Changes saved"));
//! handle.dismiss();
//! subscription.unsubscribe();
//! ```
//!
//! # Lifecycle
//!
//! - `toast` inserts an open toast at the front, dropping the oldest past the limit
//! - `dismiss` hides it and arms one removal timer
//! - the timer, or an explicit `remove`, deletes it from the list

pub mod global;
mod id;
mod listeners;
mod message;
pub mod notification;
pub mod reducer;
pub mod scheduler;
mod store;

pub use id::{IdGenerator, IdStrategy, FALLBACK_SUFFIX_LEN};
pub use listeners::{IntoListenerResult, ListenerId, ListenerResult};
pub use message::Message;
pub use notification::{
    OpenChangeCallback, Toast, ToastAction, ToastId, ToastPatch, ToastPayload, Variant,
};
pub use reducer::{reduce, Action};
pub use scheduler::RemovalScheduler;
pub use store::{NotificationStore, Subscription, ToastHandle};
