// SPDX-License-Identifier: MPL-2.0
//! Listener registry and isolated broadcast delivery.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use super::notification::Toast;
use crate::error::ListenerError;

/// Outcome of a single listener delivery.
pub type ListenerResult = Result<(), ListenerError>;

pub(crate) type ListenerFn = Rc<dyn Fn(&[Toast]) -> ListenerResult>;

/// Conversion for listener return values, so plain `()` closures can subscribe.
pub trait IntoListenerResult {
    fn into_listener_result(self) -> ListenerResult;
}

impl IntoListenerResult for () {
    fn into_listener_result(self) -> ListenerResult {
        Ok(())
    }
}

impl IntoListenerResult for ListenerResult {
    fn into_listener_result(self) -> ListenerResult {
        self
    }
}

/// Identifies a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registered listeners in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, ListenerFn)>,
}

impl Listeners {
    pub(crate) fn insert(&mut self, listener: ListenerFn) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    /// Copies the current listener list for one broadcast.
    pub(crate) fn snapshot(&self) -> Vec<(ListenerId, ListenerFn)> {
        self.entries.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Delivers `toasts` to each listener in order.
///
/// A listener returning an error or panicking is logged and skipped; the
/// remaining listeners still receive the broadcast.
pub(crate) fn deliver(listeners: &[(ListenerId, ListenerFn)], toasts: &[Toast]) {
    for (id, listener) in listeners {
        match panic::catch_unwind(AssertUnwindSafe(|| listener(toasts))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!(listener = id.0, error = %err, "toast listener failed");
            }
            Err(payload) => {
                tracing::error!(
                    listener = id.0,
                    panic = panic_message(payload.as_ref()),
                    "toast listener panicked"
                );
            }
        }
    }
}

/// Runs a store callback other than a listener with the same isolation.
pub(crate) fn isolate(context: &'static str, callback: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(callback)) {
        tracing::error!(
            context,
            panic = panic_message(payload.as_ref()),
            "toast callback panicked"
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recording(log: &Rc<RefCell<Vec<&'static str>>>, label: &'static str) -> ListenerFn {
        let log = Rc::clone(log);
        Rc::new(move |_: &[Toast]| -> ListenerResult {
            log.borrow_mut().push(label);
            Ok(())
        })
    }

    #[test]
    fn insert_and_remove_by_id() {
        let mut listeners = Listeners::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = listeners.insert(recording(&log, "first"));
        let second = listeners.insert(recording(&log, "second"));

        assert_ne!(first, second);
        assert!(listeners.remove(first));
        assert!(!listeners.remove(first));
        assert!(listeners.contains(second));
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn deliver_preserves_subscription_order() {
        let mut listeners = Listeners::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        listeners.insert(recording(&log, "a"));
        listeners.insert(recording(&log, "b"));
        listeners.insert(recording(&log, "c"));

        deliver(&listeners.snapshot(), &[]);

        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn failing_listener_does_not_block_later_ones() {
        let mut listeners = Listeners::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        listeners.insert(Rc::new(|_: &[Toast]| -> ListenerResult {
            Err(ListenerError::new("boom"))
        }));
        listeners.insert(recording(&log, "after-error"));

        deliver(&listeners.snapshot(), &[]);

        assert_eq!(*log.borrow(), vec!["after-error"]);
    }

    #[test]
    fn panicking_listener_does_not_block_later_ones() {
        let mut listeners = Listeners::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        listeners.insert(Rc::new(|_: &[Toast]| -> ListenerResult { panic!("listener exploded") }));
        listeners.insert(recording(&log, "after-panic"));

        deliver(&listeners.snapshot(), &[]);

        assert_eq!(*log.borrow(), vec!["after-panic"]);
    }

    #[test]
    fn isolate_swallows_panics() {
        isolate("test", || panic!("callback exploded"));
    }

    #[test]
    fn unit_and_result_convert_to_listener_result() {
        assert_eq!(().into_listener_result(), Ok(()));
        let err: ListenerResult = Err(ListenerError::new("x"));
        assert!(err.into_listener_result().is_err());
    }
}
