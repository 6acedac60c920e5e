// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Capacity**: How many toasts can be active at once
//! - **Removal**: Delay between dismissal and physical removal

// ==========================================================================
// Capacity Defaults
// ==========================================================================

/// Default maximum number of active toasts.
pub const DEFAULT_MAX_TOASTS: usize = 5;

/// Minimum allowed toast limit.
pub const MIN_MAX_TOASTS: usize = 1;

/// Maximum allowed toast limit.
pub const MAX_MAX_TOASTS: usize = 20;

// ==========================================================================
// Removal Defaults
// ==========================================================================

/// Default delay between dismissing a toast and removing it (in milliseconds).
pub const DEFAULT_REMOVAL_DELAY_MS: u64 = 5_000;

/// Minimum removal delay (in milliseconds). Zero removes on the next timer turn.
pub const MIN_REMOVAL_DELAY_MS: u64 = 0;

/// Maximum removal delay (in milliseconds).
pub const MAX_REMOVAL_DELAY_MS: u64 = 600_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_MAX_TOASTS > 0);
    assert!(MAX_MAX_TOASTS >= MIN_MAX_TOASTS);
    assert!(DEFAULT_MAX_TOASTS >= MIN_MAX_TOASTS);
    assert!(DEFAULT_MAX_TOASTS <= MAX_MAX_TOASTS);

    assert!(MAX_REMOVAL_DELAY_MS >= MIN_REMOVAL_DELAY_MS);
    assert!(DEFAULT_REMOVAL_DELAY_MS >= MIN_REMOVAL_DELAY_MS);
    assert!(DEFAULT_REMOVAL_DELAY_MS <= MAX_REMOVAL_DELAY_MS);
};
