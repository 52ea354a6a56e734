//! # LogWriter: events as `tracing` records
//!
//! Routes every [`Event`] to `tracing` with structured fields. Install any
//! `tracing` subscriber (e.g. `tracing_subscriber::fmt`) to see them.
//!
//! ## Levels
//! - `debug`: submitted, attempt starting
//! - `info`: succeeded, retry scheduled
//! - `warn`: attempt failed, interrupted, subscriber overflow
//! - `error`: retries exhausted, rejected, subscriber panicked

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Logging subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let action = e.action.as_deref().unwrap_or("-");
        let reason = e.reason.as_deref().unwrap_or("");
        let invocation = e.invocation.unwrap_or_default();
        let attempt = e.attempt.unwrap_or_default();

        match e.kind {
            EventKind::InvocationSubmitted => {
                debug!(seq = e.seq, action, invocation, "submitted");
            }
            EventKind::AttemptStarting => {
                debug!(seq = e.seq, action, invocation, attempt, "attempt starting");
            }
            EventKind::AttemptFailed => {
                warn!(seq = e.seq, action, invocation, attempt, reason, "attempt failed");
            }
            EventKind::RetryScheduled => {
                info!(
                    seq = e.seq,
                    action,
                    invocation,
                    after_attempt = attempt,
                    delay_ms = e.delay_ms.unwrap_or_default(),
                    reason,
                    "retry scheduled"
                );
            }
            EventKind::InvocationSucceeded => {
                info!(seq = e.seq, action, invocation, attempts = attempt, "succeeded");
            }
            EventKind::InvocationInterrupted => {
                warn!(seq = e.seq, action, invocation, attempts = attempt, "interrupted");
            }
            EventKind::RetriesExhausted => {
                error!(seq = e.seq, action, invocation, attempts = attempt, reason, "retries exhausted");
            }
            EventKind::InvocationRejected => {
                error!(seq = e.seq, action, invocation, attempt, reason, "executor rejected attempt");
            }
            EventKind::SubscriberOverflow => {
                warn!(subscriber = action, reason, "subscriber dropped event");
            }
            EventKind::SubscriberPanicked => {
                error!(subscriber = action, reason, "subscriber panicked");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
