//! # ActionDispatcher: independent, retrying, any-order execution.
//!
//! [`ActionDispatcher::act_on_item`] returns at once with an [`ActionFuture`].
//! The work happens in units handed to the [`Executor`]; every attempt,
//! including each retry, is a **new** unit.
//!
//! ## Per-invocation flow
//! ```text
//! act_on_item(item)
//!   └─► Invocation::new ──► dispatch(inv, delay = 0) ──► submit
//!
//! dispatch(inv, delay > 0):
//!   └─► timer task (holds no executor capacity)
//!         ├─ token cancelled ─► Interrupted
//!         └─ delay elapsed   ─► submit
//!
//! unit of work (submit → executor):
//!   ├─► token cancelled?                     ── yes ───────► Interrupted
//!   ├─► attempt += 1; run_once()
//!   │       ├─ Ok(v)            ─► Succeeded
//!   │       ├─ Err(Interrupted) ─► Interrupted
//!   │       └─ Err(Fail)
//!   │            ├─ token cancelled         ─► Interrupted
//!   │            └─ policy.decide(attempt)
//!   │                 ├─ GiveUp             ─► RetriesExhausted
//!   │                 └─ Retry { delay }    ─► dispatch(inv, delay)   (new unit)
//!   └─ executor refused a unit              ─► Rejected
//! ```
//!
//! ## Rules
//! - No ordering between invocations; within one, attempt `n + 1` is dispatched
//!   only after attempt `n` returned.
//! - The dispatcher keeps no per-invocation state: the invocation travels with
//!   its unit of work.
//! - Backoff waits on a timer task and holds no executor slot. Timer tasks are
//!   spawned on the ambient tokio runtime.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::{select, time};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::actions::Action;
use crate::core::builder::DispatcherBuilder;
use crate::core::handle::ActionFuture;
use crate::core::invocation::Invocation;
use crate::core::runner::run_once;
use crate::error::{ActionError, DispatchError};
use crate::events::{Bus, Event, EventKind};
use crate::executors::Executor;
use crate::policies::{RetryDecision, RetryPolicy};

/// Read-only state shared by every unit of work of one dispatcher.
pub(crate) struct Shared<A> {
    pub action: A,
    pub executor: Arc<dyn Executor>,
    pub retry: RetryPolicy,
    pub bus: Bus,
}

/// Asynchronous retrying dispatcher for one [`Action`].
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use tokio_util::sync::CancellationToken;
/// use anyorder::{ActionDispatcher, ActionError, ActionFn, RetryPolicy};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let square = ActionFn::new("square", |n: Arc<u64>, _ctx: CancellationToken| async move {
///         Ok::<_, ActionError>(*n * *n)
///     });
///
///     let dispatcher: ActionDispatcher<_, u64, u64> = ActionDispatcher::builder(square)
///         .with_retry_policy(RetryPolicy::bounded(3))
///         .build();
///
///     let a = dispatcher.act_on_item(3u64);
///     let b = dispatcher.act_on_item(4u64);
///     assert_eq!(b.await.unwrap(), 16);
///     assert_eq!(a.await.unwrap(), 9);
/// }
/// ```
pub struct ActionDispatcher<A, I, O> {
    shared: Arc<Shared<A>>,
    root: CancellationToken,
    listener: CancellationToken,
    _io: PhantomData<fn(Arc<I>) -> O>,
}

impl<A, I, O> ActionDispatcher<A, I, O>
where
    A: Action<I, O>,
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    /// Starts building a dispatcher for `action`.
    pub fn builder(action: A) -> DispatcherBuilder<A, I, O> {
        DispatcherBuilder::new(action)
    }

    /// Dispatcher with default configuration on the current tokio runtime.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn new(action: A) -> Self {
        Self::builder(action).build()
    }

    pub(crate) fn from_parts(
        shared: Shared<A>,
        root: CancellationToken,
        listener: CancellationToken,
    ) -> Self {
        Self {
            shared: Arc::new(shared),
            root,
            listener,
            _io: PhantomData,
        }
    }

    /// Submits `item` for asynchronous processing.
    ///
    /// Never blocks. The returned future is independent of every other
    /// invocation's future.
    pub fn act_on_item(&self, item: impl Into<Arc<I>>) -> ActionFuture<O> {
        let (inv, fut) = Invocation::new(item.into(), &self.root);
        self.shared.bus.publish(
            Event::new(EventKind::InvocationSubmitted)
                .with_action(self.shared.action.name())
                .with_invocation(inv.id),
        );
        dispatch(&self.shared, inv, Duration::ZERO);
        fut
    }

    /// The action this dispatcher runs.
    pub fn action(&self) -> &A {
        &self.shared.action
    }

    /// Retry policy in effect (shared by all invocations).
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.shared.retry
    }

    /// Event bus; subscribe to observe invocation lifecycles.
    pub fn bus(&self) -> &Bus {
        &self.shared.bus
    }

    /// Interrupts every in-flight invocation and every future one.
    pub fn shutdown(&self) {
        self.root.cancel();
    }

    /// True once [`shutdown`](Self::shutdown) was called.
    pub fn is_shut_down(&self) -> bool {
        self.root.is_cancelled()
    }
}

impl<A, I, O> Drop for ActionDispatcher<A, I, O> {
    fn drop(&mut self) {
        self.listener.cancel();
    }
}

/// Schedules the next attempt of `inv`.
///
/// A nonzero `delay` is waited out on a timer task, not inside a unit of work,
/// so an invocation in backoff holds no executor capacity.
fn dispatch<A, I, O>(shared: &Arc<Shared<A>>, inv: Invocation<I, O>, delay: Duration)
where
    A: Action<I, O>,
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    if delay.is_zero() {
        submit(shared, inv);
        return;
    }

    let shared = Arc::clone(shared);
    tokio::spawn(async move {
        let cancelled = select! {
            _ = time::sleep(delay) => inv.token.is_cancelled(),
            _ = inv.token.cancelled() => true,
        };
        if cancelled {
            interrupt(&shared, inv);
        } else {
            submit(&shared, inv);
        }
    });
}

/// Hands the next attempt of `inv` to the executor as a fresh unit of work.
fn submit<A, I, O>(shared: &Arc<Shared<A>>, inv: Invocation<I, O>)
where
    A: Action<I, O>,
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    let next = inv.attempt.saturating_add(1);
    let slot = Arc::new(Mutex::new(Some(inv)));

    let unit = {
        let shared = Arc::clone(shared);
        let slot = Arc::clone(&slot);
        async move {
            if let Some(inv) = take(&slot) {
                run_attempt(shared, inv).await;
            }
        }
        .boxed()
    };

    if let Err(err) = shared.executor.execute(unit) {
        let Some(inv) = take(&slot) else {
            return;
        };
        warn!(
            action = shared.action.name(),
            invocation = inv.id,
            attempt = next,
            executor = shared.executor.name(),
            error = %err,
            "executor rejected attempt"
        );
        shared.bus.publish(
            Event::new(EventKind::InvocationRejected)
                .with_action(shared.action.name())
                .with_invocation(inv.id)
                .with_attempt(next)
                .with_reason(err.to_string()),
        );
        inv.settle(Err(DispatchError::Rejected {
            attempt: next,
            source: err,
        }));
    }
}

fn take<T>(slot: &Mutex<Option<T>>) -> Option<T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner).take()
}

/// Body of one unit of work: one attempt, then a decision.
fn run_attempt<A, I, O>(
    shared: Arc<Shared<A>>,
    mut inv: Invocation<I, O>,
) -> BoxFuture<'static, ()>
where
    A: Action<I, O>,
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    async move {
        if inv.token.is_cancelled() {
            interrupt(&shared, inv);
            return;
        }

        inv.attempt = inv.attempt.saturating_add(1);
        let res = run_once(&shared.action, &inv, &shared.bus).await;

        match res {
            Ok(value) => {
                shared.bus.publish(
                    Event::new(EventKind::InvocationSucceeded)
                        .with_action(shared.action.name())
                        .with_invocation(inv.id)
                        .with_attempt(inv.attempt),
                );
                if !inv.settle(Ok(value)) {
                    debug!(action = shared.action.name(), "result discarded: future dropped");
                }
            }
            Err(ActionError::Interrupted) => interrupt(&shared, inv),
            Err(err) => {
                shared.bus.publish(
                    Event::new(EventKind::AttemptFailed)
                        .with_action(shared.action.name())
                        .with_invocation(inv.id)
                        .with_attempt(inv.attempt)
                        .with_reason(err.to_string()),
                );
                if inv.token.is_cancelled() {
                    interrupt(&shared, inv);
                    return;
                }
                retry_or_exhaust(&shared, inv, err);
            }
        }
    }
    .boxed()
}

fn retry_or_exhaust<A, I, O>(shared: &Arc<Shared<A>>, inv: Invocation<I, O>, err: ActionError)
where
    A: Action<I, O>,
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    match shared.retry.decide(inv.attempt) {
        RetryDecision::Retry { delay } => {
            debug!(
                action = shared.action.name(),
                invocation = inv.id,
                attempt = inv.attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "retry scheduled"
            );
            shared.bus.publish(
                Event::new(EventKind::RetryScheduled)
                    .with_action(shared.action.name())
                    .with_invocation(inv.id)
                    .with_attempt(inv.attempt)
                    .with_delay(delay)
                    .with_reason(err.to_string()),
            );
            dispatch(shared, inv, delay);
        }
        RetryDecision::GiveUp => {
            shared.bus.publish(
                Event::new(EventKind::RetriesExhausted)
                    .with_action(shared.action.name())
                    .with_invocation(inv.id)
                    .with_attempt(inv.attempt)
                    .with_reason(err.to_string()),
            );
            let attempts = inv.attempt;
            inv.settle(Err(DispatchError::RetriesExhausted {
                attempts,
                last: err,
            }));
        }
    }
}

fn interrupt<A, I, O>(shared: &Shared<A>, inv: Invocation<I, O>)
where
    A: Action<I, O>,
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    shared.bus.publish(
        Event::new(EventKind::InvocationInterrupted)
            .with_action(shared.action.name())
            .with_invocation(inv.id)
            .with_attempt(inv.attempt),
    );
    let attempts = inv.attempt;
    inv.settle(Err(DispatchError::interrupted(attempts)));
}
