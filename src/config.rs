//! # Dispatcher configuration.
//!
//! [`DispatcherConfig`] gathers the knobs of an
//! [`ActionDispatcher`](crate::ActionDispatcher) that are not tied to the action.
//!
//! ## Sentinel values
//! - `max_concurrent = 0` → unbounded default executor ([`TokioExecutor`](crate::TokioExecutor))
//! - `retry = None` → use [`Action::retry_policy`](crate::Action::retry_policy)

use crate::policies::RetryPolicy;

/// Settings for building a dispatcher.
///
/// ## Field semantics
/// - `bus_capacity`: event bus ring buffer size (min 1)
/// - `max_concurrent`: attempts running at once on the default executor (`0` = unlimited);
///   ignored when an executor is supplied explicitly
/// - `retry`: retry policy override
#[derive(Clone, Debug)]
pub struct DispatcherConfig {
    /// Capacity of the event bus.
    pub bus_capacity: usize,
    /// Concurrency limit of the default executor.
    pub max_concurrent: usize,
    /// Retry policy overriding the action's own.
    pub retry: Option<RetryPolicy>,
}

impl DispatcherConfig {
    /// Concurrency limit as an `Option` (`None` = unbounded).
    #[inline]
    pub fn concurrency_limit(&self) -> Option<usize> {
        match self.max_concurrent {
            0 => None,
            n => Some(n),
        }
    }

    /// Bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for DispatcherConfig {
    /// `bus_capacity = 1024`, `max_concurrent = 0`, `retry = None`.
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            max_concurrent: 0,
            retry: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        let mut cfg = DispatcherConfig::default();
        assert_eq!(cfg.concurrency_limit(), None);
        cfg.max_concurrent = 4;
        cfg.bus_capacity = 0;
        assert_eq!(cfg.concurrency_limit(), Some(4));
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
