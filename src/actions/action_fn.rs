//! # Closure-backed action (`ActionFn`)
//!
//! [`ActionFn`] wraps `F: Fn(Arc<I>, CancellationToken) -> Fut` and produces a
//! fresh future per attempt. Nothing is shared between attempts unless the
//! closure captures it explicitly (e.g. an `Arc<AtomicU32>`).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use anyorder::{Action, ActionError, ActionFn};
//!
//! let double = ActionFn::new("double", |n: Arc<u64>, _ctx: CancellationToken| async move {
//!     Ok::<_, ActionError>(*n * 2)
//! });
//!
//! assert_eq!(Action::<u64, u64>::name(&double), "double");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::actions::action::Action;
use crate::error::ActionError;
use crate::policies::RetryPolicy;

/// Function-backed [`Action`].
pub struct ActionFn<F, I, O> {
    name: Cow<'static, str>,
    f: F,
    retry: RetryPolicy,
    _io: PhantomData<fn(Arc<I>) -> O>,
}

impl<F, I, O> ActionFn<F, I, O> {
    /// Creates a new action with the default retry policy.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
            retry: RetryPolicy::default(),
            _io: PhantomData,
        }
    }

    /// Sets the retry policy reported by [`Action::retry_policy`].
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[async_trait]
impl<F, Fut, I, O> Action<I, O> for ActionFn<F, I, O>
where
    F: Fn(Arc<I>, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<O, ActionError>> + Send + 'static,
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn act(&self, item: Arc<I>, ctx: CancellationToken) -> Result<O, ActionError> {
        (self.f)(item, ctx).await
    }

    fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone()
    }
}
