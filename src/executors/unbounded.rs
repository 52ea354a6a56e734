//! Unbounded executor: one tokio task per unit of work.

use tokio::runtime::Handle;

use crate::error::ExecutorError;
use crate::executors::executor::{Executor, Work};

/// Spawns every unit of work onto a tokio runtime.
#[derive(Clone, Debug)]
pub struct TokioExecutor {
    handle: Handle,
}

impl TokioExecutor {
    /// Uses the runtime of the calling context.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self {
            handle: Handle::current(),
        }
    }

    /// Uses an explicit runtime handle.
    pub fn with_handle(handle: Handle) -> Self {
        Self { handle }
    }
}

impl Executor for TokioExecutor {
    fn execute(&self, work: Work) -> Result<(), ExecutorError> {
        drop(self.handle.spawn(work));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "tokio"
    }
}
