// SPDX-License-Identifier: MPL-2.0
use chrono::{DateTime, Utc};

/// Source of the creation timestamp stamped onto every toast.
pub trait Clock {
    /// Returns the current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
