//! # Executors.
//!
//! - [`Executor`] - boundary trait: accepts a unit of work, runs it elsewhere
//! - [`TokioExecutor`] - unbounded, one tokio task per unit
//! - [`BoundedExecutor`] - at most `n` units in flight (semaphore)

mod bounded;
mod executor;
mod unbounded;

pub use bounded::BoundedExecutor;
pub use executor::{Executor, Work};
pub use unbounded::TokioExecutor;
