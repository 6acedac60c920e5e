// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects with no dependency on timers or rendering.
//!
//! # Modules
//!
//! - [`toast`]: Store tunables ([`ToastLimit`](toast::ToastLimit),
//!   [`RemovalDelay`](toast::RemovalDelay))

pub mod toast;
