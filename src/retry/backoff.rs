//! Backoff delay calculation.

use std::time::Duration;

use rand::Rng;

use super::RetryPolicy;

/// Computes the delay before the next attempt.
///
/// A server-provided `Retry-After` always wins over computed backoff: the
/// delay is the hinted number of seconds, capped at the policy's `max_delay`.
/// Without a hint, the delay grows exponentially from `base_delay`
/// (doubling per attempt, 0-based) with uniform jitter of up to 10% added,
/// capped at `max_delay`.
///
/// Pure aside from the jitter draw; never fails. Arithmetic saturates, so
/// pathological attempt numbers degrade to `max_delay` rather than wrapping.
pub fn delay(attempt: u32, policy: &RetryPolicy, retry_after_seconds: Option<u64>) -> Duration {
    if let Some(secs) = retry_after_seconds {
        return Duration::from_secs(secs).min(policy.max_delay);
    }

    let base_ms = policy.base_delay.as_millis() as u64;
    let exponential_ms = base_ms.saturating_mul(1u64.checked_shl(attempt).unwrap_or(u64::MAX));
    let jitter_ms = (rand::rng().random_range(0.0..0.1) * exponential_ms as f64) as u64;

    Duration::from_millis(exponential_ms.saturating_add(jitter_ms)).min(policy.max_delay)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 6,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_server_hint_wins_over_computed_backoff() {
        let policy = test_policy();
        // No jitter on the server-dictated path: exactly 5000ms at any attempt
        for attempt in 0..policy.max_attempts {
            assert_eq!(
                delay(attempt, &policy, Some(5)),
                Duration::from_millis(5000)
            );
        }
    }

    #[test]
    fn test_server_hint_is_capped_at_max_delay() {
        let policy = test_policy();
        assert_eq!(delay(0, &policy, Some(3600)), policy.max_delay);
    }

    #[test]
    fn test_exponential_growth_within_jitter_envelope() {
        let policy = test_policy();
        for attempt in 0..4 {
            let expected_floor = 500u64 << attempt;
            let expected_ceiling = expected_floor + expected_floor / 10;
            let d = delay(attempt, &policy, None).as_millis() as u64;
            assert!(
                d >= expected_floor && d <= expected_ceiling,
                "attempt {attempt}: {d}ms outside [{expected_floor}, {expected_ceiling}]"
            );
        }
    }

    #[test]
    fn test_monotonic_growth_despite_jitter() {
        // The jitter ceiling of attempt a (1.1x) stays below the floor of
        // attempt a+1 (2x), so successive delays are strictly ordered
        let policy = test_policy();
        for attempt in 0..4 {
            let current = delay(attempt, &policy, None);
            let next = delay(attempt + 1, &policy, None);
            assert!(
                next >= current,
                "attempt {attempt}: {next:?} < {current:?}"
            );
        }
    }

    #[test]
    fn test_never_exceeds_max_delay() {
        let policy = test_policy();
        for attempt in 0..64 {
            assert!(delay(attempt, &policy, None) <= policy.max_delay);
        }
    }

    #[test]
    fn test_extreme_attempt_numbers_saturate_to_cap() {
        let policy = test_policy();
        assert_eq!(delay(u32::MAX, &policy, None), policy.max_delay);
    }
}
