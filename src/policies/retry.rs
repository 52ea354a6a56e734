//! # Retry policy for one invocation.
//!
//! [`RetryPolicy`] answers one question after an ordinary failure: given that
//! attempt `n` just failed, is there an attempt `n + 1`, and how long until it
//! is dispatched?
//!
//! ```text
//! attempt n failed ──► max_attempts reached? ── yes ──► GiveUp
//!                              │ no
//!                              ▼
//!                     Retry { delay: interval(n) }
//! ```
//!
//! The interval is either a [`BackoffPolicy`] or any `Fn(u32) -> Duration`
//! receiving the number of the attempt that failed (1-based).
//!
//! ## Defaults
//! [`RetryPolicy::default`] retries forever with no delay.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use anyorder::{BackoffPolicy, RetryDecision, RetryPolicy};
//!
//! let policy = RetryPolicy::bounded(3).with_backoff(BackoffPolicy::fixed(Duration::from_millis(5)));
//!
//! assert_eq!(policy.decide(1), RetryDecision::Retry { delay: Duration::from_millis(5) });
//! assert_eq!(policy.decide(3), RetryDecision::GiveUp);
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::policies::backoff::BackoffPolicy;

/// Outcome of consulting a [`RetryPolicy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryDecision {
    /// Dispatch another attempt after `delay`.
    Retry {
        /// Wait before the next attempt (may be zero).
        delay: Duration,
    },
    /// No more attempts.
    GiveUp,
}

#[derive(Clone)]
enum Interval {
    Backoff(BackoffPolicy),
    Custom(Arc<dyn Fn(u32) -> Duration + Send + Sync>),
}

/// Attempt limit plus backoff interval. Immutable once built.
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: Option<u32>,
    interval: Interval,
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("RetryPolicy");
        s.field("max_attempts", &self.max_attempts);
        match &self.interval {
            Interval::Backoff(b) => s.field("backoff", b),
            Interval::Custom(_) => s.field("backoff", &"<fn>"),
        };
        s.finish()
    }
}

impl Default for RetryPolicy {
    /// Unbounded attempts, zero backoff.
    fn default() -> Self {
        Self::unbounded()
    }
}

impl RetryPolicy {
    /// Retries every ordinary failure, immediately.
    pub fn unbounded() -> Self {
        Self {
            max_attempts: None,
            interval: Interval::Backoff(BackoffPolicy::none()),
        }
    }

    /// At most `max_attempts` attempts in total (the first one included).
    ///
    /// `0` is treated as `1`: the first attempt always runs.
    pub fn bounded(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts.max(1)),
            interval: Interval::Backoff(BackoffPolicy::none()),
        }
    }

    /// Replaces the interval with a [`BackoffPolicy`].
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.interval = Interval::Backoff(backoff);
        self
    }

    /// Replaces the interval with a function of the failed attempt number (1-based).
    pub fn with_interval_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(u32) -> Duration + Send + Sync + 'static,
    {
        self.interval = Interval::Custom(Arc::new(f));
        self
    }

    /// Configured attempt limit (`None` = unbounded).
    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// Decides what follows the ordinary failure of attempt `attempt` (1-based).
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if self.max_attempts.is_some_and(|max| attempt >= max) {
            return RetryDecision::GiveUp;
        }
        let delay = match &self.interval {
            Interval::Backoff(b) => b.next(attempt.saturating_sub(1)),
            Interval::Custom(f) => f(attempt),
        };
        RetryDecision::Retry { delay }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retries_forever_without_delay() {
        let policy = RetryPolicy::default();
        for attempt in [1, 2, 1_000, u32::MAX] {
            assert_eq!(
                policy.decide(attempt),
                RetryDecision::Retry {
                    delay: Duration::ZERO
                }
            );
        }
        assert_eq!(policy.max_attempts(), None);
    }

    #[test]
    fn test_bounded_gives_up_at_limit() {
        let policy = RetryPolicy::bounded(2);
        assert!(matches!(policy.decide(1), RetryDecision::Retry { .. }));
        assert_eq!(policy.decide(2), RetryDecision::GiveUp);
        assert_eq!(policy.decide(3), RetryDecision::GiveUp);
    }

    #[test]
    fn test_bounded_zero_means_single_attempt() {
        assert_eq!(RetryPolicy::bounded(0).decide(1), RetryDecision::GiveUp);
    }

    #[test]
    fn test_backoff_uses_failures_so_far() {
        let policy = RetryPolicy::unbounded().with_backoff(BackoffPolicy::exponential(
            Duration::from_millis(10),
            2.0,
            Duration::from_secs(1),
        ));
        assert_eq!(
            policy.decide(1),
            RetryDecision::Retry {
                delay: Duration::from_millis(10)
            }
        );
        assert_eq!(
            policy.decide(3),
            RetryDecision::Retry {
                delay: Duration::from_millis(40)
            }
        );
    }

    #[test]
    fn test_interval_fn_receives_attempt() {
        let policy =
            RetryPolicy::bounded(10).with_interval_fn(|n| Duration::from_millis(u64::from(n) * 7));
        assert_eq!(
            policy.decide(4),
            RetryDecision::Retry {
                delay: Duration::from_millis(28)
            }
        );
        assert!(format!("{policy:?}").contains("<fn>"));
    }
}
