// SPDX-License-Identifier: MPL-2.0
//! `toast_store` is the notification layer behind a storefront's toast UI.
//!
//! It keeps a bounded, ordered list of transient notifications, hides and
//! removes them on a timer, and broadcasts every change to any number of
//! rendering surfaces. Rendering itself lives elsewhere.

#![doc(html_root_url = "https://docs.rs/toast_store/0.1.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod notifications;
pub mod time;

pub use notifications::global::{dismiss_all, subscribe, toast};
