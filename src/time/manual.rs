// SPDX-License-Identifier: MPL-2.0
//! Manually driven clock and timer queue.
//!
//! `ManualClock` implements both [`Clock`] and [`TimerSource`]. Nothing runs
//! until [`ManualClock::advance`] moves time forward, which makes removal
//! timing fully deterministic in tests.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use std::time::Duration;
//! use toast_store::config::StoreConfig;
//! use toast_store::notifications::{NotificationStore, ToastPayload};
//! use toast_store::time::ManualClock;
//!
//! let clock = Rc::new(ManualClock::new());
//! let store = NotificationStore::new(StoreConfig::default(), clock.clone(), clock.clone());
//!
//! store.toast(ToastPayload::new().title("Saved")).dismiss();
//! clock.advance(Duration::from_millis(5_000));
//! assert!(store.is_empty());
//! ```

use std::cell::RefCell;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::{Clock, TimerSource, TimerTask};

struct PendingTask {
    deadline: Duration,
    seq: u64,
    task: TimerTask,
}

struct ManualState {
    origin: DateTime<Utc>,
    elapsed: Duration,
    next_seq: u64,
    pending: Vec<PendingTask>,
}

/// Fake clock with a timer queue that only fires on [`advance`](Self::advance).
pub struct ManualClock {
    state: RefCell<ManualState>,
}

impl ManualClock {
    /// Creates a clock starting at the Unix epoch.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Creates a clock starting at `origin`.
    #[must_use]
    pub fn starting_at(origin: DateTime<Utc>) -> Self {
        Self {
            state: RefCell::new(ManualState {
                origin,
                elapsed: Duration::ZERO,
                next_seq: 0,
                pending: Vec::new(),
            }),
        }
    }

    /// Time advanced since creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.state.borrow().elapsed
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Moves time forward by `by`, firing every timer that comes due.
    ///
    /// Timers fire in deadline order, ties in scheduling order. Timers that
    /// fired tasks schedule within the window also fire. Returns the number
    /// of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.elapsed() + by;
        let mut fired = 0;

        while let Some(task) = self.pop_due(target) {
            task();
            fired += 1;
        }

        self.state.borrow_mut().elapsed = target;
        fired
    }

    fn pop_due(&self, target: Duration) -> Option<TimerTask> {
        let mut state = self.state.borrow_mut();
        let index = state
            .pending
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.deadline <= target)
            .min_by_key(|(_, pending)| (pending.deadline, pending.seq))
            .map(|(index, _)| index)?;

        let pending = state.pending.swap_remove(index);
        state.elapsed = state.elapsed.max(pending.deadline);
        Some(pending.task)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualClock")
            .field("origin", &state.origin)
            .field("elapsed", &state.elapsed)
            .field("pending", &state.pending.len())
            .finish()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let state = self.state.borrow();
        chrono::Duration::from_std(state.elapsed)
            .ok()
            .and_then(|elapsed| state.origin.checked_add_signed(elapsed))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl TimerSource for ManualClock {
    fn schedule(&self, delay: Duration, task: TimerTask) -> bool {
        let mut state = self.state.borrow_mut();
        let deadline = state.elapsed + delay;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.pending.push(PendingTask {
            deadline,
            seq,
            task,
        });
        true
    }
}
