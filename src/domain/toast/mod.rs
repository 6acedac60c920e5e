// SPDX-License-Identifier: MPL-2.0
//! Toast domain types.
//!
//! Value objects that bound the notification store's tunables,
//! independent of any timer or rendering backend.

pub mod newtypes;

pub use newtypes::{removal_delay_bounds, toast_limit_bounds, RemovalDelay, ToastLimit};
