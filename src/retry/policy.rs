//! Named retry policies.
//!
//! Policies are process-wide constants selected by name; there is no runtime
//! mutation of the registry.

use std::time::Duration;

use clap::ValueEnum;
use strum_macros::EnumIter;

/// Attempt-count and delay bounds for one logical request.
///
/// Invariant: `base_delay <= max_delay`. `max_attempts` counts the initial
/// attempt, so `max_attempts: 2` means one retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first.
    pub max_attempts: u32,
    /// Starting delay for the exponential backoff schedule.
    pub base_delay: Duration,
    /// Hard cap on any computed or server-dictated delay.
    pub max_delay: Duration,
}

/// Named retry strategies callers select per request.
///
/// Each name maps to a fixed [`RetryPolicy`]; the table trades recovery
/// persistence against caller-visible latency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, EnumIter)]
pub enum RetryStrategy {
    /// Quick operations that should fail fast: 2 attempts, 500ms base, 5s cap.
    Aggressive,
    /// Standard operations: 4 attempts, 1s base, 30s cap.
    #[default]
    Standard,
    /// Critical operations that should retry extensively: 6 attempts, 2s base, 60s cap.
    Patient,
    /// Background operations that can wait: 11 attempts, 5s base, 300s cap.
    Background,
}

impl RetryStrategy {
    /// The policy this strategy name maps to.
    pub fn policy(self) -> RetryPolicy {
        match self {
            RetryStrategy::Aggressive => RetryPolicy {
                max_attempts: 2,
                base_delay: Duration::from_millis(500),
                max_delay: Duration::from_secs(5),
            },
            RetryStrategy::Standard => RetryPolicy {
                max_attempts: 4,
                base_delay: Duration::from_secs(1),
                max_delay: Duration::from_secs(30),
            },
            RetryStrategy::Patient => RetryPolicy {
                max_attempts: 6,
                base_delay: Duration::from_secs(2),
                max_delay: Duration::from_secs(60),
            },
            RetryStrategy::Background => RetryPolicy {
                max_attempts: 11,
                base_delay: Duration::from_secs(5),
                max_delay: Duration::from_secs(300),
            },
        }
    }

    /// The strategy's registry name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RetryStrategy::Aggressive => "aggressive",
            RetryStrategy::Standard => "standard",
            RetryStrategy::Patient => "patient",
            RetryStrategy::Background => "background",
        }
    }
}

impl std::fmt::Display for RetryStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
