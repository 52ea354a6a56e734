//! # Executor boundary.
//!
//! The dispatcher never runs an attempt itself. Each attempt (the first one and
//! every retry) is packaged as a [`Work`] item and handed to an [`Executor`],
//! which decides where and when it runs. No ordering is assumed: two units
//! submitted back to back may start in either order.

use futures::future::BoxFuture;

use crate::error::ExecutorError;

/// A unit of work: no arguments, no result, runs to completion or is dropped.
pub type Work = BoxFuture<'static, ()>;

/// Runs units of work asynchronously.
///
/// `execute` must return promptly; it must not drive `work` on the caller's task.
/// Dropping `work` without polling it to completion is allowed (e.g. on shutdown);
/// the dispatcher reports such invocations as abandoned.
pub trait Executor: Send + Sync + 'static {
    /// Accepts `work` for asynchronous execution.
    fn execute(&self, work: Work) -> Result<(), ExecutorError>;

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
