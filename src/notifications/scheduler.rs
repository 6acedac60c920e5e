// SPDX-License-Identifier: MPL-2.0
//! Removal timer bookkeeping.
//!
//! The scheduler is the only place dismissal turns into a timer. It keeps
//! the set of ids with a pending removal so repeated dismissals arm at most
//! one timer per id.

use std::collections::HashSet;
use std::rc::Rc;

use super::notification::ToastId;
use crate::domain::toast::RemovalDelay;
use crate::time::TimerSource;

/// Arms at most one removal timer per toast id.
pub struct RemovalScheduler {
    delay: RemovalDelay,
    source: Rc<dyn TimerSource>,
    pending: HashSet<ToastId>,
}

impl RemovalScheduler {
    pub fn new(delay: RemovalDelay, source: Rc<dyn TimerSource>) -> Self {
        Self {
            delay,
            source,
            pending: HashSet::new(),
        }
    }

    /// Arms a removal timer for `id` running `fire` after the removal delay.
    ///
    /// Returns `false`, dropping `fire`, when a timer for `id` is already
    /// pending or the timer source discarded the task. Discarded tasks are
    /// not tracked, so the pending set only holds timers that will fire.
    pub fn schedule(&mut self, id: &ToastId, fire: impl FnOnce() + 'static) -> bool {
        if self.pending.contains(id) {
            return false;
        }
        // The source never runs `fire` before returning, so `complete`
        // always observes the insert below.
        if !self.source.schedule(self.delay.as_duration(), Box::new(fire)) {
            return false;
        }
        self.pending.insert(id.clone());
        true
    }

    /// Clears the pending entry once its timer fired.
    ///
    /// Returns `false` if `id` had no pending timer (forgotten by [`clear`](Self::clear)).
    pub fn complete(&mut self, id: &ToastId) -> bool {
        self.pending.remove(id)
    }

    /// Forgets every pending timer. Timers that still fire find nothing to complete.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn is_pending(&self, id: &ToastId) -> bool {
        self.pending.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn delay(&self) -> RemovalDelay {
        self.delay
    }
}

impl std::fmt::Debug for RemovalScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemovalScheduler")
            .field("delay", &self.delay)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{ManualClock, NullTimer};
    use std::cell::Cell;
    use std::time::Duration;

    fn scheduler(clock: &Rc<ManualClock>) -> RemovalScheduler {
        RemovalScheduler::new(RemovalDelay::from_millis(100), Rc::clone(clock) as Rc<dyn TimerSource>)
    }

    #[test]
    fn schedule_arms_timer_once_per_id() {
        let clock = Rc::new(ManualClock::new());
        let mut scheduler = scheduler(&clock);
        let id = ToastId::from("a");

        assert!(scheduler.schedule(&id, || {}));
        assert!(!scheduler.schedule(&id, || {}));
        assert_eq!(clock.pending(), 1);
        assert!(scheduler.is_pending(&id));
    }

    #[test]
    fn timer_fires_after_configured_delay() {
        let clock = Rc::new(ManualClock::new());
        let mut scheduler = scheduler(&clock);
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);

        scheduler.schedule(&ToastId::from("a"), move || counter.set(counter.get() + 1));

        clock.advance(Duration::from_millis(99));
        assert_eq!(fired.get(), 0);
        clock.advance(Duration::from_millis(1));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn complete_allows_rescheduling() {
        let clock = Rc::new(ManualClock::new());
        let mut scheduler = scheduler(&clock);
        let id = ToastId::from("a");

        scheduler.schedule(&id, || {});
        assert!(scheduler.complete(&id));
        assert!(!scheduler.complete(&id));
        assert!(scheduler.schedule(&id, || {}));
    }

    #[test]
    fn discarded_timers_are_not_tracked() {
        let mut scheduler =
            RemovalScheduler::new(RemovalDelay::from_millis(100), Rc::new(NullTimer));
        let id = ToastId::from("a");

        assert!(!scheduler.schedule(&id, || {}));
        assert!(!scheduler.is_pending(&id));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn clear_forgets_pending_ids() {
        let clock = Rc::new(ManualClock::new());
        let mut scheduler = scheduler(&clock);
        scheduler.schedule(&ToastId::from("a"), || {});
        scheduler.schedule(&ToastId::from("b"), || {});

        scheduler.clear();

        assert!(scheduler.is_empty());
        assert!(!scheduler.complete(&ToastId::from("a")));
    }
}
