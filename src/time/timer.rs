// SPDX-License-Identifier: MPL-2.0
//! Deferred task scheduling.

use std::rc::Rc;
use std::time::Duration;

use tokio::task::LocalSet;

/// A one-shot task run when its timer fires.
pub type TimerTask = Box<dyn FnOnce() + 'static>;

/// Schedules fire-and-forget tasks after a delay.
///
/// Implementations must never run `task` before `schedule` returns: the
/// caller may still hold state the task needs to borrow.
pub trait TimerSource {
    /// Arms `task` to run after `delay`.
    ///
    /// Returns `false` when the task was dropped and will never run.
    fn schedule(&self, delay: Duration, task: TimerTask) -> bool;
}

/// Timer source backed by tokio.
///
/// Tasks are spawned onto the shared [`LocalSet`], so they only make progress
/// while that set is being driven (`LocalSet::run_until` or awaiting it).
#[derive(Debug, Clone)]
pub struct TokioTimer {
    local: Rc<LocalSet>,
}

impl TokioTimer {
    #[must_use]
    pub fn new(local: Rc<LocalSet>) -> Self {
        Self { local }
    }

    /// Returns the `LocalSet` timers are spawned onto.
    #[must_use]
    pub fn local_set(&self) -> &Rc<LocalSet> {
        &self.local
    }
}

impl TimerSource for TokioTimer {
    fn schedule(&self, delay: Duration, task: TimerTask) -> bool {
        // Detached: the join handle is dropped, the task keeps running.
        drop(self.local.spawn_local(async move {
            tokio::time::sleep(delay).await;
            task();
        }));
        true
    }
}

/// Timer source for environments without an event loop.
///
/// Every task is dropped unrun, so nothing outlives the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTimer;

impl TimerSource for NullTimer {
    fn schedule(&self, delay: Duration, _task: TimerTask) -> bool {
        tracing::trace!(?delay, "dropping timer in headless environment");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn null_timer_never_runs_tasks() {
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);

        let armed = NullTimer.schedule(Duration::ZERO, Box::new(move || flag.set(true)));

        assert!(!armed);
        assert!(!ran.get());
        assert_eq!(Rc::strong_count(&ran), 1, "task should be dropped");
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_timer_runs_task_after_delay() {
        let local = Rc::new(LocalSet::new());
        let timer = TokioTimer::new(Rc::clone(&local));
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);

        local
            .run_until(async move {
                assert!(timer.schedule(Duration::from_millis(100), Box::new(move || flag.set(true))));
                tokio::time::sleep(Duration::from_millis(99)).await;
                assert!(!ran.get());
                tokio::time::sleep(Duration::from_millis(2)).await;
                assert!(ran.get());
            })
            .await;
    }
}
