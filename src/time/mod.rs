// SPDX-License-Identifier: MPL-2.0
//! Time and timer sources injected into the notification store.
//!
//! # Components
//!
//! - [`Clock`] - Wall-clock source for toast creation timestamps
//! - [`TimerSource`] - Deferred one-shot task scheduling
//! - [`TokioTimer`] - Timers on a tokio `LocalSet`
//! - [`NullTimer`] - Drops every task (headless environments)
//! - [`ManualClock`] - Controllable clock and timer queue for tests

mod clock;
mod manual;
mod timer;

pub use clock::{Clock, SystemClock};
pub use manual::ManualClock;
pub use timer::{NullTimer, TimerSource, TimerTask, TokioTimer};
