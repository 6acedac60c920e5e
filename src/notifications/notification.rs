// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `Toast` entity tracked by the store, the
//! `ToastPayload` used to create one and the `ToastPatch` used to update it.

use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};

/// Unique identifier for a toast.
///
/// Generated by [`IdGenerator`](super::IdGenerator) when a toast is enqueued
/// and stable for the toast's whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(String);

impl ToastId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ToastId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ToastId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Styling hint carried through to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Neutral feedback (saved, copied, sent).
    #[default]
    Default,
    /// Failed or destructive operation.
    Destructive,
}

/// Action button descriptor.
///
/// The store never interprets it: `key` is what the presentation layer
/// dispatches when the button is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastAction {
    label: String,
    key: String,
}

impl ToastAction {
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Callback invoked with the new `open` value whenever a toast's visibility changes.
#[derive(Clone)]
pub struct OpenChangeCallback(Rc<dyn Fn(bool)>);

impl OpenChangeCallback {
    pub fn new(callback: impl Fn(bool) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    pub(crate) fn call(&self, open: bool) {
        (self.0)(open);
    }
}

impl fmt::Debug for OpenChangeCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OpenChangeCallback(..)")
    }
}

impl PartialEq for OpenChangeCallback {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

/// A toast currently held by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub(crate) id: ToastId,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) action: Option<ToastAction>,
    pub(crate) variant: Variant,
    pub(crate) open: bool,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) on_open_change: Option<OpenChangeCallback>,
}

impl Toast {
    /// Builds an open toast from an enqueue payload.
    pub(crate) fn from_payload(id: ToastId, payload: ToastPayload, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: payload.title,
            description: payload.description,
            action: payload.action,
            variant: payload.variant,
            open: true,
            created_at,
            on_open_change: payload.on_open_change,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn action(&self) -> Option<&ToastAction> {
        self.action.as_ref()
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns whether the toast should currently be displayed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns when the toast was enqueued.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Fields for a new toast.
///
/// ```
/// use toast_store::notifications::{ToastAction, ToastPayload};
///
/// let payload = ToastPayload::new()
///     .title("Order placed")
///     .description("We'll email you a receipt")
///     .action(ToastAction::new("Undo", "order-undo"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ToastPayload {
    title: Option<String>,
    description: Option<String>,
    action: Option<ToastAction>,
    variant: Variant,
    on_open_change: Option<OpenChangeCallback>,
}

impl ToastPayload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Shorthand for `variant(Variant::Destructive)`.
    #[must_use]
    pub fn destructive(self) -> Self {
        self.variant(Variant::Destructive)
    }

    /// Registers a callback run whenever the toast's `open` flag changes.
    #[must_use]
    pub fn on_open_change(mut self, callback: impl Fn(bool) + 'static) -> Self {
        self.on_open_change = Some(OpenChangeCallback::new(callback));
        self
    }
}

/// Partial update merged into an existing toast.
///
/// Only fields set on the patch are touched. `clear_*` removes an optional
/// field instead of replacing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastPatch {
    title: Option<Option<String>>,
    description: Option<Option<String>>,
    action: Option<Option<ToastAction>>,
    variant: Option<Variant>,
    open: Option<bool>,
}

impl ToastPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Some(title.into()));
        self
    }

    #[must_use]
    pub fn clear_title(mut self) -> Self {
        self.title = Some(None);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    #[must_use]
    pub fn action(mut self, action: ToastAction) -> Self {
        self.action = Some(Some(action));
        self
    }

    #[must_use]
    pub fn clear_action(mut self) -> Self {
        self.action = Some(None);
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Sets the visibility flag. Applying `open(false)` through the store
    /// arms the removal timer the same way a dismiss does.
    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    /// Returns true if the patch would not change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn hides(&self) -> bool {
        self.open == Some(false)
    }

    /// Shallow-merges the set fields into `toast`. Identity and timestamp are never touched.
    pub(crate) fn apply_to(&self, toast: &mut Toast) {
        if let Some(title) = &self.title {
            toast.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            toast.description.clone_from(description);
        }
        if let Some(action) = &self.action {
            toast.action.clone_from(action);
        }
        if let Some(variant) = self.variant {
            toast.variant = variant;
        }
        if let Some(open) = self.open {
            toast.open = open;
        }
    }
}
