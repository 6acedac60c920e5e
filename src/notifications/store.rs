// SPDX-License-Identifier: MPL-2.0
//! The notification store.
//!
//! `NotificationStore` owns the active toast list, applies every change
//! through [`reduce`], arms removal timers through [`RemovalScheduler`] and
//! broadcasts the resulting list to all listeners.
//!
//! No `RefCell` borrow is held while listeners or open-change callbacks run,
//! so they may call back into the store. Changes made from inside a
//! broadcast are folded into it: the outermost broadcast repeats with the
//! latest list until nothing changed, so the last list every listener sees
//! is the list the store holds.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::id::IdGenerator;
use super::listeners::{self, IntoListenerResult, ListenerId, Listeners};
use super::message::Message;
use super::notification::{OpenChangeCallback, Toast, ToastId, ToastPatch, ToastPayload};
use super::reducer::{reduce, Action};
use super::scheduler::RemovalScheduler;
use crate::config::StoreConfig;
use crate::time::{Clock, NullTimer, SystemClock, TimerSource};

struct StoreInner {
    config: StoreConfig,
    clock: Rc<dyn Clock>,
    ids: IdGenerator,
    toasts: RefCell<Vec<Toast>>,
    scheduler: RefCell<RemovalScheduler>,
    listeners: RefCell<Listeners>,
    open_changes: RefCell<Vec<(OpenChangeCallback, bool)>>,
    broadcasting: Cell<bool>,
    dirty: Cell<bool>,
}

impl StoreInner {
    fn dispatch(&self, action: Action) {
        let tracks_open = matches!(action, Action::UpdateFields { .. } | Action::SetOpenFalse(_));

        {
            let mut toasts = self.toasts.borrow_mut();
            let before: HashMap<ToastId, bool> = if tracks_open {
                toasts.iter().map(|toast| (toast.id.clone(), toast.open)).collect()
            } else {
                HashMap::new()
            };

            let next = reduce(std::mem::take(&mut *toasts), action, self.config.limit);
            *toasts = next;

            self.open_changes.borrow_mut().extend(
                toasts
                    .iter()
                    .filter(|toast| before.get(&toast.id).is_some_and(|was| *was != toast.open))
                    .filter_map(|toast| {
                        toast
                            .on_open_change
                            .clone()
                            .map(|callback| (callback, toast.open))
                    }),
            );
        }

        self.publish();
    }

    /// Broadcasts the current list, then runs queued open-change callbacks.
    ///
    /// Re-entrant calls only mark the list dirty; the outermost call keeps
    /// broadcasting until a full round completes without changes.
    fn publish(&self) {
        if self.broadcasting.replace(true) {
            self.dirty.set(true);
            return;
        }

        loop {
            self.dirty.set(false);
            let snapshot = self.toasts.borrow().clone();
            self.broadcast(&snapshot);
            if self.dirty.get() {
                continue;
            }

            let callbacks = std::mem::take(&mut *self.open_changes.borrow_mut());
            for (callback, open) in callbacks {
                listeners::isolate("on_open_change", || callback.call(open));
            }
            if !self.dirty.get() {
                break;
            }
        }

        self.broadcasting.set(false);
    }

    fn broadcast(&self, snapshot: &[Toast]) {
        let listeners = self.listeners.borrow().snapshot();
        listeners::deliver(&listeners, snapshot);
    }

    fn schedule_removal(self: &Rc<Self>, id: &ToastId) {
        let store = Rc::downgrade(self);
        let fired_id = id.clone();
        let armed = self.scheduler.borrow_mut().schedule(id, move || {
            if let Some(inner) = store.upgrade() {
                inner.fire_removal(&fired_id);
            }
        });
        if armed {
            tracing::debug!(id = %id, "toast removal scheduled");
        }
    }

    fn fire_removal(&self, id: &ToastId) {
        if !self.scheduler.borrow_mut().complete(id) {
            return;
        }
        tracing::debug!(id = %id, "toast removal timer fired");
        self.dispatch(Action::Remove(Some(id.clone())));
    }
}

/// Bounded, ordered store of active toasts (newest first).
///
/// Cloning is cheap and yields another handle to the same store.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use std::time::Duration;
/// use toast_store::config::StoreConfig;
/// use toast_store::notifications::{NotificationStore, ToastPatch, ToastPayload};
/// use toast_store::time::ManualClock;
///
/// let clock = Rc::new(ManualClock::new());
/// let store = NotificationStore::new(StoreConfig::default(), clock.clone(), clock.clone());
///
/// let handle = store.toast(ToastPayload::new().title("Uploading"));
/// handle.update(ToastPatch::new().title("Uploaded"));
/// assert_eq!(store.get(handle.id()).unwrap().title(), Some("Uploaded"));
///
/// handle.dismiss();
/// clock.advance(Duration::from_secs(5));
/// assert!(store.is_empty());
/// ```
#[derive(Clone)]
pub struct NotificationStore {
    inner: Rc<StoreInner>,
}

impl NotificationStore {
    /// Creates a store using `clock` for timestamps and `timers` for removal.
    pub fn new(config: StoreConfig, clock: Rc<dyn Clock>, timers: Rc<dyn TimerSource>) -> Self {
        Self::with_id_generator(config, clock, timers, IdGenerator::default())
    }

    /// Like [`new`](Self::new) with an explicit identifier strategy.
    pub fn with_id_generator(
        config: StoreConfig,
        clock: Rc<dyn Clock>,
        timers: Rc<dyn TimerSource>,
        ids: IdGenerator,
    ) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                config,
                clock,
                ids,
                toasts: RefCell::new(Vec::new()),
                scheduler: RefCell::new(RemovalScheduler::new(config.removal_delay, timers)),
                listeners: RefCell::new(Listeners::default()),
                open_changes: RefCell::new(Vec::new()),
                broadcasting: Cell::new(false),
                dirty: Cell::new(false),
            }),
        }
    }

    /// Creates a store for environments without an event loop.
    ///
    /// Removal timers are dropped, so dismissed toasts stay until removed
    /// explicitly or the store is [`reset`](Self::reset).
    #[must_use]
    pub fn headless(config: StoreConfig) -> Self {
        Self::new(config, Rc::new(SystemClock), Rc::new(NullTimer))
    }

    /// Enqueues a new open toast as the newest entry and broadcasts.
    ///
    /// Never fails: when the list is full the oldest entries are dropped.
    pub fn toast(&self, payload: ToastPayload) -> ToastHandle {
        let id = self.inner.ids.generate();
        let toast = Toast::from_payload(id.clone(), payload, self.inner.clock.now());
        tracing::debug!(id = %id, "toast enqueued");
        self.inner.dispatch(Action::Add(toast));
        ToastHandle {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    /// Alias of [`toast`](Self::toast).
    pub fn enqueue(&self, payload: ToastPayload) -> ToastHandle {
        self.toast(payload)
    }

    /// Merges `patch` into the toast with `id`. Unknown ids are ignored.
    ///
    /// A patch that hides the toast arms its removal timer like [`dismiss`](Self::dismiss).
    pub fn update(&self, id: &ToastId, patch: ToastPatch) {
        if patch.hides() && self.get(id).is_some() {
            self.inner.schedule_removal(id);
        }
        self.inner.dispatch(Action::UpdateFields {
            id: id.clone(),
            patch,
        });
    }

    /// Hides the toast with `id`, or every toast when `None`, and arms removal timers.
    ///
    /// Ids that already have a pending removal keep their original timer.
    pub fn dismiss(&self, id: Option<&ToastId>) {
        let targets: Vec<ToastId> = match id {
            Some(id) => vec![id.clone()],
            None => self
                .inner
                .toasts
                .borrow()
                .iter()
                .map(|toast| toast.id.clone())
                .collect(),
        };
        for target in &targets {
            self.inner.schedule_removal(target);
        }
        self.inner.dispatch(Action::SetOpenFalse(id.cloned()));
    }

    /// Hides every toast. Equivalent to `dismiss(None)`.
    pub fn dismiss_all(&self) {
        self.dismiss(None);
    }

    /// Deletes the toast with `id`, or every toast when `None`, without waiting.
    ///
    /// Pending timers are left alone; when they fire they find nothing to remove.
    pub fn remove(&self, id: Option<&ToastId>) {
        self.inner.dispatch(Action::Remove(id.cloned()));
    }

    /// Registers `listener`, calls it immediately with the current list and
    /// then after every change.
    ///
    /// The listener may return `()` or a [`ListenerResult`](super::ListenerResult);
    /// errors and panics are logged and do not reach the caller.
    pub fn subscribe<F, R>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Toast]) -> R + 'static,
        R: IntoListenerResult,
    {
        let listener: listeners::ListenerFn =
            Rc::new(move |toasts: &[Toast]| listener(toasts).into_listener_result());
        let id = self.inner.listeners.borrow_mut().insert(Rc::clone(&listener));

        let snapshot = self.toasts();
        listeners::deliver(&[(id, listener)], &snapshot);

        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    /// Routes a UI message to the matching operation.
    pub fn handle_message(&self, message: &Message) {
        match message {
            Message::Dismiss(id) => self.dismiss(Some(id)),
            Message::Remove(id) => self.remove(Some(id)),
            Message::DismissAll => self.dismiss_all(),
            Message::Clear => self.remove(None),
        }
    }

    /// Empties the list and forgets pending removal timers, then broadcasts.
    pub fn reset(&self) {
        self.inner.toasts.borrow_mut().clear();
        self.inner.scheduler.borrow_mut().clear();
        self.inner.publish();
    }

    /// Returns a snapshot of the active list, newest first.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.toasts.borrow().clone()
    }

    /// Returns a snapshot of the toast with `id`, if active.
    #[must_use]
    pub fn get(&self, id: &ToastId) -> Option<Toast> {
        self.inner
            .toasts
            .borrow()
            .iter()
            .find(|toast| toast.id == *id)
            .cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.toasts.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.toasts.borrow().is_empty()
    }

    /// Returns the number of ids with a pending removal timer.
    #[must_use]
    pub fn pending_removals(&self) -> usize {
        self.inner.scheduler.borrow().len()
    }

    /// Returns whether `id` has a pending removal timer.
    #[must_use]
    pub fn is_removal_pending(&self, id: &ToastId) -> bool {
        self.inner.scheduler.borrow().is_pending(id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    #[must_use]
    pub fn config(&self) -> StoreConfig {
        self.inner.config
    }
}

impl std::fmt::Debug for NotificationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationStore")
            .field("config", &self.inner.config)
            .field("toasts", &self.inner.toasts.borrow().len())
            .field("pending_removals", &self.inner.scheduler.borrow().len())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

/// Handle returned by [`NotificationStore::toast`].
///
/// Holds only a weak reference: once the store is gone every call is a no-op.
#[derive(Debug, Clone)]
pub struct ToastHandle {
    id: ToastId,
    store: Weak<StoreInner>,
}

impl ToastHandle {
    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    /// Merges `patch` into this toast.
    pub fn update(&self, patch: ToastPatch) {
        if let Some(store) = self.store() {
            store.update(&self.id, patch);
        }
    }

    /// Hides this toast and starts its removal countdown.
    pub fn dismiss(&self) {
        if let Some(store) = self.store() {
            store.dismiss(Some(&self.id));
        }
    }

    /// Deletes this toast immediately.
    pub fn remove(&self) {
        if let Some(store) = self.store() {
            store.remove(Some(&self.id));
        }
    }

    fn store(&self) -> Option<NotificationStore> {
        self.store.upgrade().map(|inner| NotificationStore { inner })
    }
}

/// Registration returned by [`NotificationStore::subscribe`].
///
/// Dropping it keeps the listener registered; call
/// [`unsubscribe`](Self::unsubscribe) to stop deliveries.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: ListenerId,
    store: Weak<StoreInner>,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Removes exactly this listener. Further calls are no-ops.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.store.upgrade() {
            inner.listeners.borrow_mut().remove(self.id);
        }
    }

    /// Returns whether the listener is still registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.store
            .upgrade()
            .is_some_and(|inner| inner.listeners.borrow().contains(self.id))
    }
}
