//! # Invocation lifecycle events.
//!
//! [`EventKind`] classifies what happened; [`Event`] carries the metadata
//! (action name, invocation id, attempt, delay, reason).
//!
//! ## Ordering guarantees
//! `seq` is global and monotonic. Events of different invocations interleave
//! freely; within one invocation they follow the attempt order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use anyorder::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::RetryScheduled)
//!     .with_action("upload")
//!     .with_invocation(7)
//!     .with_attempt(2)
//!     .with_delay(Duration::from_millis(250))
//!     .with_reason("connection refused");
//!
//! assert_eq!(ev.kind, EventKind::RetryScheduled);
//! assert_eq!(ev.invocation, Some(7));
//! assert_eq!(ev.delay_ms, Some(250));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of dispatcher events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked while handling an event.
    ///
    /// Sets `action` (subscriber name) and `reason` (panic message).
    SubscriberPanicked,

    /// Subscriber queue was full or closed; the event was dropped for it.
    ///
    /// Sets `action` (subscriber name) and `reason`.
    SubscriberOverflow,

    // === Invocation lifecycle ===
    /// `act_on_item` accepted an item.
    ///
    /// Sets `action`, `invocation`.
    InvocationSubmitted,

    /// An attempt is about to call the action.
    ///
    /// Sets `action`, `invocation`, `attempt` (1-based).
    AttemptStarting,

    /// An attempt returned an ordinary failure.
    ///
    /// Sets `action`, `invocation`, `attempt`, `reason`.
    AttemptFailed,

    /// The next attempt was handed to the executor.
    ///
    /// Sets `action`, `invocation`, `attempt` (the one that failed),
    /// `delay_ms`, `reason` (last failure).
    RetryScheduled,

    // === Terminal states ===
    /// The action produced a value.
    ///
    /// Sets `action`, `invocation`, `attempt`.
    InvocationSucceeded,

    /// The invocation ended on an interruption.
    ///
    /// Sets `action`, `invocation`, `attempt`.
    InvocationInterrupted,

    /// The retry policy refused another attempt.
    ///
    /// Sets `action`, `invocation`, `attempt`, `reason`.
    RetriesExhausted,

    /// The executor refused a unit of work.
    ///
    /// Sets `action`, `invocation`, `attempt`, `reason`.
    InvocationRejected,
}

impl EventKind {
    /// True for kinds after which an invocation emits nothing more.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EventKind::InvocationSucceeded
                | EventKind::InvocationInterrupted
                | EventKind::RetriesExhausted
                | EventKind::InvocationRejected
        )
    }
}

/// Dispatcher event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Action name (or subscriber name for subscriber events).
    pub action: Option<Arc<str>>,
    /// Invocation id, unique per dispatcher.
    pub invocation: Option<u64>,
    /// Attempt number (starting from 1).
    pub attempt: Option<u32>,
    /// Backoff delay in milliseconds.
    pub delay_ms: Option<u64>,
    /// Human-readable reason (failure message, overflow details).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates an event of `kind` stamped with the current time and the next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            action: None,
            invocation: None,
            attempt: None,
            delay_ms: None,
            reason: None,
        }
    }

    #[inline]
    pub fn with_action(mut self, action: impl Into<Arc<str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    #[inline]
    pub fn with_invocation(mut self, id: u64) -> Self {
        self.invocation = Some(id);
        self
    }

    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a delay (stored as milliseconds, saturating).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        self.delay_ms = Some(u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        self
    }

    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_action(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_action(subscriber)
            .with_reason(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::AttemptStarting);
        let b = Event::new(EventKind::AttemptStarting);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_delay_saturates() {
        let ev = Event::new(EventKind::RetryScheduled).with_delay(Duration::from_secs(u64::MAX));
        assert_eq!(ev.delay_ms, Some(u64::MAX));
    }

    #[test]
    fn test_delay_beyond_u32_millis_is_kept() {
        let fifty_days = Duration::from_secs(50 * 24 * 3600);
        let ev = Event::new(EventKind::RetryScheduled).with_delay(fifty_days);
        assert_eq!(ev.delay_ms, Some(4_320_000_000));
    }

    #[test]
    fn test_terminal_kinds() {
        assert!(EventKind::RetriesExhausted.is_terminal());
        assert!(EventKind::InvocationInterrupted.is_terminal());
        assert!(!EventKind::RetryScheduled.is_terminal());
        assert!(!EventKind::SubscriberOverflow.is_terminal());
    }
}
