//! Error types used by the dispatcher, actions and executors.
//!
//! This module defines three enums:
//!
//! - [`ActionError`] — what a single attempt of an [`Action`](crate::Action) returns on failure.
//! - [`DispatchError`] — how a whole invocation fails (surfaced through [`ActionFuture`](crate::ActionFuture)).
//! - [`ExecutorError`] — why an [`Executor`](crate::Executor) refused a unit of work.
//!
//! All of them provide `as_label` for logs/metrics.

use thiserror::Error;

/// # Errors produced by one attempt of an action.
///
/// [`ActionError::Fail`] is an ordinary failure and is retried according to the
/// [`RetryPolicy`](crate::RetryPolicy). [`ActionError::Interrupted`] is the terminal
/// marker: the action observed an interruption request and the invocation must stop.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Attempt failed but may succeed if retried.
    #[error("attempt failed: {reason}")]
    Fail {
        /// The underlying error message.
        reason: String,
    },

    /// Attempt observed an interruption request (never retried).
    #[error("interrupted")]
    Interrupted,
}

impl ActionError {
    /// Convenience constructor for [`ActionError::Fail`].
    pub fn fail(reason: impl Into<String>) -> Self {
        ActionError::Fail {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use anyorder::ActionError;
    ///
    /// assert_eq!(ActionError::fail("boom").as_label(), "action_failed");
    /// assert_eq!(ActionError::Interrupted.as_label(), "action_interrupted");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ActionError::Fail { .. } => "action_failed",
            ActionError::Interrupted => "action_interrupted",
        }
    }

    /// Indicates whether the error is safe to retry.
    ///
    /// # Example
    /// ```
    /// use anyorder::ActionError;
    ///
    /// assert!(ActionError::fail("boom").is_retryable());
    /// assert!(!ActionError::Interrupted.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(self, ActionError::Fail { .. })
    }
}

/// # Errors produced by an executor.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    /// The executor was closed and accepts no more work.
    #[error("executor closed")]
    Closed,
}

/// # Terminal failure of an invocation.
///
/// Every invocation that does not succeed settles its future with exactly one of these.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The action (or the dispatcher, on behalf of a cancelled invocation) reported
    /// an interruption. The interruption is kept as the error source.
    #[error("invocation interrupted after {attempts} attempt(s)")]
    Interrupted {
        /// Attempts started before the interruption.
        attempts: u32,
        /// Always [`ActionError::Interrupted`].
        #[source]
        source: ActionError,
    },

    /// The retry policy denied another attempt after an ordinary failure.
    #[error("retries exhausted after {attempts} attempt(s): {last}")]
    RetriesExhausted {
        /// Total attempts performed.
        attempts: u32,
        /// The failure of the last attempt.
        #[source]
        last: ActionError,
    },

    /// The executor refused the unit of work for the next attempt.
    #[error("executor rejected attempt {attempt}: {source}")]
    Rejected {
        /// Attempt that could not be dispatched.
        attempt: u32,
        #[source]
        source: ExecutorError,
    },

    /// The unit of work was dropped before it could settle the invocation.
    #[error("invocation abandoned before completion")]
    Abandoned,
}

impl DispatchError {
    pub(crate) fn interrupted(attempts: u32) -> Self {
        DispatchError::Interrupted {
            attempts,
            source: ActionError::Interrupted,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use anyorder::{ActionError, DispatchError};
    ///
    /// let err = DispatchError::RetriesExhausted { attempts: 3, last: ActionError::fail("boom") };
    /// assert_eq!(err.as_label(), "retries_exhausted");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::Interrupted { .. } => "invocation_interrupted",
            DispatchError::RetriesExhausted { .. } => "retries_exhausted",
            DispatchError::Rejected { .. } => "executor_rejected",
            DispatchError::Abandoned => "invocation_abandoned",
        }
    }

    /// True if the invocation ended because of an interruption.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, DispatchError::Interrupted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_interrupted_keeps_interruption_as_source() {
        let err = DispatchError::interrupted(1);
        let source = err.source().expect("source must be present");
        let action = source
            .downcast_ref::<ActionError>()
            .expect("source must be an ActionError");
        assert_eq!(action, &ActionError::Interrupted);
        assert!(err.is_interrupted());
    }

    #[test]
    fn test_exhausted_message_mentions_last_failure() {
        let err = DispatchError::RetriesExhausted {
            attempts: 2,
            last: ActionError::fail("db down"),
        };
        assert_eq!(
            err.to_string(),
            "retries exhausted after 2 attempt(s): attempt failed: db down"
        );
        assert!(!err.is_interrupted());
    }
}
