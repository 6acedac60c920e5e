// SPDX-License-Identifier: MPL-2.0
//! Toast identifier generation.
//!
//! Secure ids are RFC 4122 version 4 UUIDs filled from the operating
//! system's random source. When that source is unavailable, or the
//! [`IdStrategy::Fallback`] strategy is selected, ids take the form
//! `{millis}-{sequence}-{suffix}` (all base 36):
//!
//! - `millis` is the wall-clock timestamp,
//! - `sequence` comes from a process-wide atomic counter, so two ids
//!   generated in the same millisecond still differ,
//! - `suffix` is 8 base-36 characters drawn from a generator seeded by the
//!   OS random source when it answers. Otherwise the seed mixes the
//!   timestamp, sequence and process id, and the suffix carries no
//!   entropy beyond those inputs.
//!
//! Uniqueness within a process rests on the sequence alone.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};

use super::notification::ToastId;

/// Number of base-36 characters in the fallback suffix.
pub const FALLBACK_SUFFIX_LEN: usize = 8;

const RADIX: u32 = 36;

static FALLBACK_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// How [`IdGenerator`] produces identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// UUID v4 from the OS random source, falling back when it fails.
    #[default]
    Secure,
    /// Always use the timestamp + sequence + suffix scheme.
    Fallback,
}

/// Generates unique toast identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator {
    strategy: IdStrategy,
}

impl IdGenerator {
    #[must_use]
    pub fn new(strategy: IdStrategy) -> Self {
        Self { strategy }
    }

    #[must_use]
    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Generates a fresh identifier.
    pub fn generate(&self) -> ToastId {
        match self.strategy {
            IdStrategy::Secure => secure_id().unwrap_or_else(|err| {
                tracing::debug!(error = %err, "OS random source unavailable, using fallback toast id");
                fallback_id()
            }),
            IdStrategy::Fallback => fallback_id(),
        }
    }
}

fn secure_id() -> Result<ToastId, rand::Error> {
    let mut bytes = [0u8; 16];
    OsRng.try_fill_bytes(&mut bytes)?;
    let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
    Ok(ToastId::from(uuid.hyphenated().to_string()))
}

fn fallback_id() -> ToastId {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
    let sequence = FALLBACK_SEQUENCE.fetch_add(1, Ordering::Relaxed);

    let mut rng = StdRng::from_rng(OsRng).unwrap_or_else(|_| {
        let seed =
            millis ^ sequence.rotate_left(32) ^ u64::from(std::process::id()).rotate_left(16);
        StdRng::seed_from_u64(seed)
    });
    let suffix: String = (0..FALLBACK_SUFFIX_LEN)
        .filter_map(|_| char::from_digit(rng.gen_range(0..RADIX), RADIX))
        .collect();

    ToastId::from(format!(
        "{}-{}-{}",
        to_base36(millis),
        to_base36(sequence),
        suffix
    ))
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        let digit = u32::try_from(value % u64::from(RADIX)).unwrap_or(0);
        digits.push(char::from_digit(digit, RADIX).unwrap_or('0'));
        value /= u64::from(RADIX);
    }
    digits.iter().rev().collect()
}
