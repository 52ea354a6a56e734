//! # Per-invocation state.
//!
//! An [`Invocation`] is created by `act_on_item` and moved, never shared, from
//! one unit of work to the next. Settling consumes it, so the caller's
//! [`ActionFuture`] resolves exactly once.
//!
//! ```text
//! Invocation::new ──► (Invocation, ActionFuture)
//!        │                    ▲
//!        ▼                    │ oneshot
//!   unit #1 ─► unit #2 ─► … ─► settle(result)
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::core::handle::ActionFuture;
use crate::error::DispatchError;

static INVOCATION_SEQ: AtomicU64 = AtomicU64::new(1);

/// State owned by whichever unit of work currently runs the invocation.
pub(crate) struct Invocation<I, O> {
    /// Process-unique id.
    pub id: u64,
    /// The item every attempt acts on.
    pub item: Arc<I>,
    /// Attempts started so far.
    pub attempt: u32,
    /// Interruption signal for this invocation only.
    pub token: CancellationToken,
    reply: oneshot::Sender<Result<O, DispatchError>>,
}

impl<I, O> Invocation<I, O> {
    /// Creates an invocation whose token is a child of `parent`.
    pub fn new(item: Arc<I>, parent: &CancellationToken) -> (Self, ActionFuture<O>) {
        let id = INVOCATION_SEQ.fetch_add(1, Ordering::Relaxed);
        let token = parent.child_token();
        let (tx, rx) = oneshot::channel();

        let inv = Self {
            id,
            item,
            attempt: 0,
            token: token.clone(),
            reply: tx,
        };
        (inv, ActionFuture::new(id, token, rx))
    }

    /// Resolves the caller's future. Returns `false` if the caller dropped it.
    pub fn settle(self, result: Result<O, DispatchError>) -> bool {
        self.reply.send(result).is_ok()
    }
}
