// SPDX-License-Identifier: MPL-2.0
//! Pure state transitions for the active toast list.
//!
//! [`reduce`] never schedules timers or notifies anyone; the store applies
//! those effects around it. Every transition is total: ids that match no
//! entry leave the list untouched.

use super::notification::{Toast, ToastId, ToastPatch};
use crate::domain::toast::ToastLimit;

/// A requested change to the active list.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Insert a toast as the newest entry.
    Add(Toast),
    /// Merge fields into the matching entry.
    UpdateFields { id: ToastId, patch: ToastPatch },
    /// Hide the matching entry, or every entry when `None`.
    SetOpenFalse(Option<ToastId>),
    /// Delete the matching entry, or every entry when `None`.
    Remove(Option<ToastId>),
}

/// Applies `action` to `toasts` (newest first) and returns the new list.
#[must_use]
pub fn reduce(mut toasts: Vec<Toast>, action: Action, limit: ToastLimit) -> Vec<Toast> {
    match action {
        Action::Add(toast) => {
            toasts.insert(0, toast);
            toasts.truncate(limit.value());
        }
        Action::UpdateFields { id, patch } => {
            if let Some(toast) = toasts.iter_mut().find(|toast| toast.id == id) {
                patch.apply_to(toast);
            }
        }
        Action::SetOpenFalse(target) => {
            for toast in &mut toasts {
                if target.as_ref().is_none_or(|id| *id == toast.id) {
                    toast.open = false;
                }
            }
        }
        Action::Remove(Some(id)) => toasts.retain(|toast| toast.id != id),
        Action::Remove(None) => toasts.clear(),
    }
    toasts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::notification::ToastPayload;
    use chrono::{DateTime, Utc};

    fn toast(id: &str) -> Toast {
        Toast::from_payload(
            ToastId::from(id),
            ToastPayload::new().title(id),
            DateTime::<Utc>::UNIX_EPOCH,
        )
    }

    fn ids(toasts: &[Toast]) -> Vec<&str> {
        toasts.iter().map(|toast| toast.id.as_str()).collect()
    }

    #[test]
    fn add_prepends_newest() {
        let state = reduce(vec![toast("a")], Action::Add(toast("b")), ToastLimit::default());
        assert_eq!(ids(&state), vec!["b", "a"]);
    }

    #[test]
    fn add_truncates_oldest_beyond_limit() {
        let limit = ToastLimit::new(2);
        let state = [toast("a"), toast("b"), toast("c")]
            .into_iter()
            .fold(Vec::new(), |state, next| reduce(state, Action::Add(next), limit));

        assert_eq!(ids(&state), vec!["c", "b"]);
    }

    #[test]
    fn update_fields_merges_only_matching_entry() {
        let state = reduce(
            vec![toast("a"), toast("b")],
            Action::UpdateFields {
                id: ToastId::from("b"),
                patch: ToastPatch::new().title("renamed"),
            },
            ToastLimit::default(),
        );

        assert_eq!(state[0].title(), Some("a"));
        assert_eq!(state[1].title(), Some("renamed"));
        assert!(state[1].is_open());
    }

    #[test]
    fn update_fields_for_unknown_id_is_noop() {
        let before = vec![toast("a")];
        let state = reduce(
            before.clone(),
            Action::UpdateFields {
                id: ToastId::from("missing"),
                patch: ToastPatch::new().title("x"),
            },
            ToastLimit::default(),
        );
        assert_eq!(state, before);
    }

    #[test]
    fn set_open_false_targets_single_entry() {
        let state = reduce(
            vec![toast("a"), toast("b")],
            Action::SetOpenFalse(Some(ToastId::from("a"))),
            ToastLimit::default(),
        );
        assert!(!state[0].is_open());
        assert!(state[1].is_open());
    }

    #[test]
    fn set_open_false_without_id_hides_all() {
        let state = reduce(
            vec![toast("a"), toast("b"), toast("c")],
            Action::SetOpenFalse(None),
            ToastLimit::default(),
        );
        assert!(state.iter().all(|toast| !toast.is_open()));
    }

    #[test]
    fn remove_filters_matching_entry() {
        let state = reduce(
            vec![toast("a"), toast("b")],
            Action::Remove(Some(ToastId::from("a"))),
            ToastLimit::default(),
        );
        assert_eq!(ids(&state), vec!["b"]);
    }

    #[test]
    fn remove_unknown_id_keeps_list() {
        let state = reduce(
            vec![toast("a")],
            Action::Remove(Some(ToastId::from("gone"))),
            ToastLimit::default(),
        );
        assert_eq!(ids(&state), vec!["a"]);
    }

    #[test]
    fn remove_without_id_clears_list() {
        let state = reduce(
            vec![toast("a"), toast("b")],
            Action::Remove(None),
            ToastLimit::default(),
        );
        assert!(state.is_empty());
    }

    #[test]
    fn transitions_on_empty_list_are_total() {
        let limit = ToastLimit::default();
        assert!(reduce(Vec::new(), Action::SetOpenFalse(None), limit).is_empty());
        assert!(reduce(Vec::new(), Action::Remove(None), limit).is_empty());
        assert!(reduce(Vec::new(), Action::Remove(Some(ToastId::from("x"))), limit).is_empty());
    }
}
