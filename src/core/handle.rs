//! # ActionFuture: the caller's side of one invocation.
//!
//! Each `act_on_item` call gets its own oneshot channel; the future is never
//! derived from, or continued off, another invocation's future. Awaiting one
//! future therefore says nothing about any other.
//!
//! Dropping an [`ActionFuture`] does not stop the invocation; the result is
//! discarded when it settles. Use [`ActionFuture::cancel`] to interrupt it.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::error::DispatchError;

/// Future returned by [`ActionDispatcher::act_on_item`](crate::ActionDispatcher::act_on_item).
///
/// Resolves to the action's output, or to the [`DispatchError`] that ended the invocation.
#[must_use = "the invocation runs anyway; the future is the only way to observe its result"]
#[derive(Debug)]
pub struct ActionFuture<O> {
    id: u64,
    token: CancellationToken,
    rx: oneshot::Receiver<Result<O, DispatchError>>,
}

impl<O> ActionFuture<O> {
    pub(crate) fn new(
        id: u64,
        token: CancellationToken,
        rx: oneshot::Receiver<Result<O, DispatchError>>,
    ) -> Self {
        Self { id, token, rx }
    }

    /// Invocation id (matches [`Event::invocation`](crate::Event::invocation)).
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Delivers the interruption signal to the invocation.
    ///
    /// A running attempt sees it through its token; a pending backoff is cut short.
    /// Either way the future settles with [`DispatchError::Interrupted`] unless the
    /// action completes first.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once [`cancel`](Self::cancel) (or dispatcher shutdown) was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The invocation's interruption token.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl<O> Future for ActionFuture<O> {
    type Output = Result<O, DispatchError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_closed)) => Poll::Ready(Err(DispatchError::Abandoned)),
            Poll::Pending => Poll::Pending,
        }
    }
}
