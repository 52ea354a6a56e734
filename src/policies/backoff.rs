//! # Backoff between attempts of one invocation.
//!
//! [`BackoffPolicy`] maps the number of failed attempts to the delay that
//! elapses before the next attempt is dispatched:
//!
//! ```text
//! delay(n) = jitter( min(first × factor^n, max) )      n = 0 for the first retry
//! ```
//!
//! The base is derived from `n` alone, so a jittered value never feeds into
//! the next computation.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use anyorder::{BackoffPolicy, JitterPolicy};
//!
//! let backoff = BackoffPolicy {
//!     first: Duration::from_millis(50),
//!     max: Duration::from_secs(1),
//!     factor: 3.0,
//!     jitter: JitterPolicy::None,
//! };
//!
//! assert_eq!(backoff.next(0), Duration::from_millis(50));
//! assert_eq!(backoff.next(1), Duration::from_millis(150));
//! assert_eq!(backoff.next(9), Duration::from_secs(1));
//! assert_eq!(BackoffPolicy::none().next(42), Duration::ZERO);
//! ```

use std::time::Duration;

use crate::policies::jitter::JitterPolicy;

/// Exponential (or constant) delay with a cap and optional jitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackoffPolicy {
    /// Delay before the first retry.
    pub first: Duration,
    /// Upper bound for any delay.
    pub max: Duration,
    /// Growth factor per failed attempt (`1.0` = constant).
    pub factor: f64,
    /// Randomization applied to the capped base delay.
    pub jitter: JitterPolicy,
}

impl Default for BackoffPolicy {
    /// Constant 100ms, capped at 30s, no jitter.
    fn default() -> Self {
        Self {
            first: Duration::from_millis(100),
            max: Duration::from_secs(30),
            factor: 1.0,
            jitter: JitterPolicy::None,
        }
    }
}

impl BackoffPolicy {
    /// Retries immediately: every delay is zero.
    pub const fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    /// Constant delay between attempts.
    pub const fn fixed(delay: Duration) -> Self {
        Self {
            first: delay,
            max: delay,
            factor: 1.0,
            jitter: JitterPolicy::None,
        }
    }

    /// Exponential growth from `first`, capped at `max`.
    pub const fn exponential(first: Duration, factor: f64, max: Duration) -> Self {
        Self {
            first,
            max,
            factor,
            jitter: JitterPolicy::None,
        }
    }

    /// Returns a copy with the given jitter.
    pub const fn with_jitter(mut self, jitter: JitterPolicy) -> Self {
        self.jitter = jitter;
        self
    }

    /// Delay before the retry that follows `failures` earlier retries (0-indexed).
    ///
    /// Non-finite or negative intermediate values fall back to [`BackoffPolicy::max`].
    pub fn next(&self, failures: u32) -> Duration {
        let cap = self.max.as_secs_f64();
        let exp = failures.min(i32::MAX as u32) as i32;
        let raw = self.first.as_secs_f64() * self.factor.powi(exp);

        let base = if raw.is_finite() && (0.0..=cap).contains(&raw) {
            Duration::from_secs_f64(raw)
        } else {
            self.max
        };

        match self.jitter {
            JitterPolicy::Decorrelated => {
                self.jitter
                    .apply_decorrelated(self.first.min(self.max), base, self.max)
            }
            other => other.apply(base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_always_zero() {
        let policy = BackoffPolicy::none();
        for n in [0, 1, 7, u32::MAX] {
            assert_eq!(policy.next(n), Duration::ZERO);
        }
    }

    #[test]
    fn test_fixed_is_constant() {
        let policy = BackoffPolicy::fixed(Duration::from_millis(250));
        for n in 0..20 {
            assert_eq!(policy.next(n), Duration::from_millis(250), "failure {n}");
        }
    }

    #[test]
    fn test_exponential_growth_and_cap() {
        let policy =
            BackoffPolicy::exponential(Duration::from_millis(10), 2.0, Duration::from_millis(100));

        assert_eq!(policy.next(0), Duration::from_millis(10));
        assert_eq!(policy.next(1), Duration::from_millis(20));
        assert_eq!(policy.next(3), Duration::from_millis(80));
        assert_eq!(policy.next(4), Duration::from_millis(100));
        assert_eq!(policy.next(u32::MAX), Duration::from_millis(100));
    }

    #[test]
    fn test_first_above_max_is_clamped() {
        let policy =
            BackoffPolicy::exponential(Duration::from_secs(5), 1.0, Duration::from_secs(1));
        assert_eq!(policy.next(0), Duration::from_secs(1));
    }

    #[test]
    fn test_equal_jitter_stays_within_half_and_base() {
        let policy = BackoffPolicy::exponential(Duration::from_millis(200), 2.0, Duration::from_secs(10))
            .with_jitter(JitterPolicy::Equal);

        for n in 0..8 {
            let base_ms = (200.0 * 2.0f64.powi(n as i32)).min(10_000.0) as u64;
            let delay = policy.next(n);
            assert!(delay >= Duration::from_millis(base_ms / 2), "failure {n}: {delay:?}");
            assert!(delay <= Duration::from_millis(base_ms), "failure {n}: {delay:?}");
        }
    }

    #[test]
    fn test_decorrelated_jitter_respects_floor_and_cap() {
        let policy = BackoffPolicy::exponential(Duration::from_millis(100), 2.0, Duration::from_secs(3))
            .with_jitter(JitterPolicy::Decorrelated);

        for _ in 0..100 {
            let delay = policy.next(6);
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_secs(3));
        }
    }
}
