//! Rate-limit health evaluation.
//!
//! Turns a parsed [`RateLimitInfo`] into the tiered status report exposed by
//! the probe endpoint: how much allowance is left, how urgent that is, and
//! how long until the window resets.

use super::RateLimitInfo;
use crate::config::RATE_LIMIT_DEFAULT_LIMIT;

/// Health tier derived from the fraction of the request allowance remaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTier {
    /// More than 25% of the allowance remains.
    Healthy,
    /// 25% or less remains.
    Warning,
    /// 10% or less remains.
    Critical,
}

impl HealthTier {
    /// Returns a human-readable string representation of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthTier::Healthy => "healthy",
            HealthTier::Warning => "warning",
            HealthTier::Critical => "critical",
        }
    }
}

impl std::fmt::Display for HealthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tiered view of the upstream rate-limit state, as returned by the probe.
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    /// The raw parsed headers.
    pub info: RateLimitInfo,
    /// Derived health tier.
    pub tier: HealthTier,
    /// Seconds until the window resets, when the reset epoch lies ahead.
    pub reset_in_seconds: Option<u64>,
    /// Human-readable warning for the Warning and Critical tiers.
    pub warning: Option<String>,
}

/// Evaluates a health tier from parsed rate-limit metadata.
///
/// When the limit header is absent the allowance is assumed to be
/// [`RATE_LIMIT_DEFAULT_LIMIT`]; without a remaining count no tier worse than
/// `Healthy` can be derived. `now_epoch_seconds` is passed in so the reset
/// countdown is testable.
pub fn evaluate(info: RateLimitInfo, now_epoch_seconds: u64) -> RateLimitStatus {
    let mut tier = HealthTier::Healthy;
    let mut warning = None;

    if let Some(remaining) = info.remaining {
        let limit = info.limit.unwrap_or(RATE_LIMIT_DEFAULT_LIMIT).max(1);
        let percentage = remaining as f64 / limit as f64 * 100.0;

        if percentage <= 10.0 {
            tier = HealthTier::Critical;
            warning = Some(format!(
                "Only {remaining} requests remaining ({percentage:.1}%)"
            ));
        } else if percentage <= 25.0 {
            tier = HealthTier::Warning;
            warning = Some(format!("{remaining} requests remaining ({percentage:.1}%)"));
        }
    }

    let reset_in_seconds = info
        .reset_epoch_seconds
        .and_then(|reset| reset.checked_sub(now_epoch_seconds))
        .filter(|secs| *secs > 0);

    RateLimitStatus {
        info,
        tier,
        reset_in_seconds,
        warning,
    }
}
