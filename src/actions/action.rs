//! # The action capability.
//!
//! An [`Action`] is the work the dispatcher performs on each item. The
//! dispatcher calls [`Action::act`] once per attempt, possibly many times for
//! the same item, so implementations must tolerate repeated calls.
//!
//! Interruption is cooperative: every attempt receives the invocation's
//! [`CancellationToken`]. An action that waits on something external should
//! watch the token and return [`ActionError::Interrupted`] once it fires.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ActionError;
use crate::policies::RetryPolicy;

/// # Asynchronous, retryable operation on an item.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use anyorder::{Action, ActionError, RetryPolicy};
///
/// struct Upload;
///
/// #[async_trait]
/// impl Action<String, usize> for Upload {
///     fn name(&self) -> &str { "upload" }
///
///     async fn act(&self, path: Arc<String>, ctx: CancellationToken) -> Result<usize, ActionError> {
///         if ctx.is_cancelled() {
///             return Err(ActionError::Interrupted);
///         }
///         Ok(path.len())
///     }
///
///     fn retry_policy(&self) -> RetryPolicy {
///         RetryPolicy::bounded(5)
///     }
/// }
/// ```
#[async_trait]
pub trait Action<I, O>: Send + Sync + 'static
where
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    /// Stable, human-readable name used in events and logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Runs one attempt on `item`.
    ///
    /// Return [`ActionError::Fail`] for failures worth retrying and
    /// [`ActionError::Interrupted`] when `ctx` was cancelled.
    async fn act(&self, item: Arc<I>, ctx: CancellationToken) -> Result<O, ActionError>;

    /// Retry configuration used when the dispatcher is not given one explicitly.
    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
    }
}
