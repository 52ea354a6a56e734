//! # Jitter for backoff delays.
//!
//! Many invocations that fail together (a shared downstream outage) would
//! otherwise retry together. [`JitterPolicy`] spreads them out:
//!
//! - [`JitterPolicy::None`] exact delay
//! - [`JitterPolicy::Full`] random in `[0, delay]`
//! - [`JitterPolicy::Equal`] `delay/2 + random[0, delay/2]`
//! - [`JitterPolicy::Decorrelated`] random in `[base, delay × 3]`, capped

use rand::Rng;
use std::time::Duration;

/// Randomization strategy applied to a backoff delay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// Use the delay as computed.
    #[default]
    None,
    /// Uniform in `[0, delay]`.
    Full,
    /// Half fixed, half random.
    Equal,
    /// Uniform in `[base, delay × 3]`, capped at the policy max.
    ///
    /// Needs extra context; see [`apply_decorrelated`](Self::apply_decorrelated).
    Decorrelated,
}

impl JitterPolicy {
    /// Applies jitter to `delay`.
    ///
    /// `Decorrelated` returns `delay` unchanged here.
    pub fn apply(&self, delay: Duration) -> Duration {
        match self {
            JitterPolicy::None | JitterPolicy::Decorrelated => delay,
            JitterPolicy::Full => full(delay),
            JitterPolicy::Equal => equal(delay),
        }
    }

    /// Decorrelated jitter with its floor (`base`) and ceiling (`max`).
    ///
    /// Other variants fall back to [`apply`](Self::apply) on `delay`.
    pub fn apply_decorrelated(&self, base: Duration, delay: Duration, max: Duration) -> Duration {
        if !matches!(self, JitterPolicy::Decorrelated) {
            return self.apply(delay);
        }

        let lo = base.as_millis() as u64;
        let hi = (delay.as_millis() as u64)
            .saturating_mul(3)
            .min(max.as_millis() as u64)
            .max(lo);

        if lo >= hi {
            return base;
        }
        Duration::from_millis(rand::rng().random_range(lo..=hi))
    }
}

fn full(delay: Duration) -> Duration {
    let ms = delay.as_millis() as u64;
    if ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(0..=ms))
}

fn equal(delay: Duration) -> Duration {
    let ms = delay.as_millis() as u64;
    let half = ms / 2;
    if half == 0 {
        return Duration::from_millis(ms);
    }
    Duration::from_millis(half + rand::rng().random_range(0..=half))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_jitter_never_exceeds_delay() {
        for _ in 0..200 {
            assert!(JitterPolicy::Full.apply(Duration::from_millis(40)) <= Duration::from_millis(40));
        }
        assert_eq!(JitterPolicy::Full.apply(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn test_decorrelated_with_base_above_ceiling_returns_base() {
        let d = JitterPolicy::Decorrelated.apply_decorrelated(
            Duration::from_millis(500),
            Duration::from_millis(10),
            Duration::from_millis(20),
        );
        assert_eq!(d, Duration::from_millis(500));
    }
}
