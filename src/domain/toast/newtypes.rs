// SPDX-License-Identifier: MPL-2.0
//! Toast newtypes.
//!
//! This module provides type-safe wrappers for the store's tunables,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Toast Limit Bounds
// =============================================================================

/// Active toast limit bounds (1 to 20 toasts).
pub mod toast_limit_bounds {
    /// Minimum toast limit.
    pub const MIN: usize = 1;
    /// Maximum toast limit.
    pub const MAX: usize = 20;
    /// Default toast limit.
    pub const DEFAULT: usize = 5;
}

// =============================================================================
// ToastLimit
// =============================================================================

/// Maximum number of toasts kept in the active list.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (1–20 toasts).
///
/// # Example
///
/// ```
/// use toast_store::domain::toast::ToastLimit;
///
/// let limit = ToastLimit::new(3);
/// assert_eq!(limit.value(), 3);
///
/// // Values outside range are clamped
/// let too_low = ToastLimit::new(0);
/// assert_eq!(too_low.value(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastLimit(usize);

impl ToastLimit {
    /// Creates a new toast limit, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(toast_limit_bounds::MIN, toast_limit_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns true if this is the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= toast_limit_bounds::MIN
    }

    /// Returns true if this is the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= toast_limit_bounds::MAX
    }
}

impl Default for ToastLimit {
    fn default() -> Self {
        Self(toast_limit_bounds::DEFAULT)
    }
}

// =============================================================================
// Removal Delay Bounds
// =============================================================================

/// Removal delay bounds (0 to 600000 milliseconds).
pub mod removal_delay_bounds {
    /// Minimum removal delay in milliseconds.
    pub const MIN_MS: u64 = 0;
    /// Maximum removal delay in milliseconds.
    pub const MAX_MS: u64 = 600_000;
    /// Default removal delay in milliseconds.
    pub const DEFAULT_MS: u64 = 5_000;
}

// =============================================================================
// RemovalDelay
// =============================================================================

/// Delay between a toast being dismissed and it leaving the active list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalDelay(u64);

impl RemovalDelay {
    /// Creates a new removal delay from milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(value: u64) -> Self {
        Self(value.clamp(removal_delay_bounds::MIN_MS, removal_delay_bounds::MAX_MS))
    }

    /// Returns the delay in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for RemovalDelay {
    fn default() -> Self {
        Self(removal_delay_bounds::DEFAULT_MS)
    }
}

impl From<Duration> for RemovalDelay {
    fn from(duration: Duration) -> Self {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self::from_millis(millis)
    }
}

// =============================================================================
// Tests
// =============================================================================
