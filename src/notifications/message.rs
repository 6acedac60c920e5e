// SPDX-License-Identifier: MPL-2.0
//! Messages a UI event loop routes into the store.

use super::notification::ToastId;

/// Toast state changes requested by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Hide a toast and start its removal countdown.
    Dismiss(ToastId),
    /// Delete a toast immediately.
    Remove(ToastId),
    /// Hide every toast and start their removal countdowns.
    DismissAll,
    /// Delete every toast immediately.
    Clear,
}
