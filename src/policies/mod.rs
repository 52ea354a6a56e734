//! Retry and backoff policies.
//!
//! ## Contents
//! - [`RetryPolicy`]   whether another attempt follows an ordinary failure, and when
//! - [`BackoffPolicy`] how delays evolve (first / factor / max + jitter)
//! - [`JitterPolicy`]  randomization to avoid synchronized retries
//!
//! ## Wiring
//! ```text
//! Action::retry_policy() ──► ActionDispatcher (Arc<RetryPolicy>, shared read-only)
//!      └─► after each ordinary failure: policy.decide(attempt)
//!           ├─ Retry { delay } → next attempt dispatched as a new unit of work
//!           └─ GiveUp          → DispatchError::RetriesExhausted
//! ```

mod backoff;
mod jitter;
mod retry;

pub use backoff::BackoffPolicy;
pub use jitter::JitterPolicy;
pub use retry::{RetryDecision, RetryPolicy};
