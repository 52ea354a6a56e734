//! # anyorder
//!
//! **anyorder** runs an asynchronous action on items, retries ordinary
//! failures according to a pluggable policy, and keeps every item's
//! processing independent of every other item's.
//!
//! ## Architecture
//! ```text
//!   act_on_item(a)     act_on_item(b)     act_on_item(c)
//!        │                  │                  │
//!        ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  ActionDispatcher (shared, read-only)                     │
//! │  - Action (the injected capability)                       │
//! │  - RetryPolicy (max attempts + backoff)                   │
//! │  - Executor (where units of work run)                     │
//! │  - Bus (lifecycle events)                                 │
//! └──────┬──────────────────┬──────────────────┬──────────────┘
//!        ▼                  ▼                  ▼
//!    unit a#1           unit b#1           unit c#1        (Executor)
//!        │ Fail             │ Ok               │ Interrupted
//!        ▼                  ▼                  ▼
//!    unit a#2           future b ✓         future c ✗
//!        │ Ok
//!        ▼
//!    future a ✓
//! ```
//!
//! Each attempt is a fresh unit of work; an invocation's state travels with it
//! and resolves its own oneshot-backed [`ActionFuture`]. No future is chained
//! onto another, so slow or stuck items never hold back the rest.
//!
//! ## Lifecycle of one invocation
//! ```text
//! Submitted → Running(1) ─┬─► Succeeded
//!                         ├─► TerminalFailed (Interrupted)
//!                         └─► RetryScheduled → Running(2) → … → Exhausted
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types / traits                          |
//! |-------------------|-----------------------------------------------------------|---------------------------------------------|
//! | **Dispatch**      | Submit items, await independent results.                  | [`ActionDispatcher`], [`ActionFuture`]      |
//! | **Actions**       | The operation applied to each item.                       | [`Action`], [`ActionFn`]                    |
//! | **Policies**      | Attempt limits, backoff, jitter.                          | [`RetryPolicy`], [`BackoffPolicy`], [`JitterPolicy`] |
//! | **Executors**     | Where units of work run.                                  | [`Executor`], [`TokioExecutor`], [`BoundedExecutor`] |
//! | **Errors**        | Typed attempt / invocation / executor failures.           | [`ActionError`], [`DispatchError`], [`ExecutorError`] |
//! | **Events**        | Lifecycle events and subscribers (logging via `tracing`). | [`Event`], [`Bus`], [`Subscribe`], [`LogWriter`] |
//! | **Configuration** | Bus capacity, default concurrency, retry override.        | [`DispatcherConfig`]                        |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use tokio_util::sync::CancellationToken;
//! use anyorder::{ActionDispatcher, ActionError, ActionFn, DispatchError, RetryPolicy};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), DispatchError> {
//!     let failures = Arc::new(AtomicU32::new(0));
//!     let seen = Arc::clone(&failures);
//!
//!     // Fails twice, then echoes the item.
//!     let echo = ActionFn::new("echo", move |msg: Arc<String>, ctx: CancellationToken| {
//!         let failed = seen.fetch_add(1, Ordering::SeqCst);
//!         async move {
//!             if ctx.is_cancelled() {
//!                 return Err(ActionError::Interrupted);
//!             }
//!             if failed < 2 {
//!                 return Err(ActionError::fail("not yet"));
//!             }
//!             Ok(msg.to_uppercase())
//!         }
//!     });
//!
//!     let dispatcher: ActionDispatcher<_, String, String> = ActionDispatcher::builder(echo)
//!         .with_retry_policy(RetryPolicy::bounded(5))
//!         .build();
//!
//!     let out = dispatcher.act_on_item("hello".to_string()).await?;
//!     assert_eq!(out, "HELLO");
//!     assert_eq!(failures.load(Ordering::SeqCst), 3);
//!     Ok(())
//! }
//! ```
mod actions;
mod config;
mod core;
mod error;
mod events;
mod executors;
mod policies;
mod subscribers;

// ---- Public re-exports ----

pub use actions::{Action, ActionFn};
pub use config::DispatcherConfig;
pub use self::core::{ActionDispatcher, ActionFuture, DispatcherBuilder};
pub use error::{ActionError, DispatchError, ExecutorError};
pub use events::{Bus, Event, EventKind};
pub use executors::{BoundedExecutor, Executor, TokioExecutor, Work};
pub use policies::{BackoffPolicy, JitterPolicy, RetryDecision, RetryPolicy};
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
