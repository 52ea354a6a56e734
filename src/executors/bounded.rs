//! # Fixed-concurrency executor.
//!
//! [`BoundedExecutor`] caps how many units of work run at once, the async
//! counterpart of a fixed thread pool. Units beyond the cap wait for a permit;
//! waiting is cheap and never blocks a runtime thread.
//!
//! ```text
//! execute(work) ──► spawn ──► acquire permit ──► work.await ──► release
//!                                  │
//!                                  └─ semaphore closed ──► work dropped
//! ```
//!
//! ## Rules
//! - At most `limit` units are polled concurrently.
//! - [`close`](BoundedExecutor::close) rejects new units and drops waiting ones;
//!   units already holding a permit run to completion.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::Semaphore;

use crate::error::ExecutorError;
use crate::executors::executor::{Executor, Work};

/// Executor with a concurrency limit.
#[derive(Clone, Debug)]
pub struct BoundedExecutor {
    handle: Handle,
    permits: Arc<Semaphore>,
    limit: usize,
}

impl BoundedExecutor {
    /// Creates an executor on the current runtime allowing `limit` concurrent units
    /// (minimum 1).
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn new(limit: usize) -> Self {
        Self::with_handle(Handle::current(), limit)
    }

    /// Creates an executor on an explicit runtime handle.
    pub fn with_handle(handle: Handle, limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            handle,
            permits: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Configured concurrency limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of units that could start right now.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Stops accepting work. Units waiting for a permit are dropped.
    pub fn close(&self) {
        self.permits.close();
    }

    /// True once [`close`](Self::close) was called.
    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }
}

impl Executor for BoundedExecutor {
    fn execute(&self, work: Work) -> Result<(), ExecutorError> {
        if self.permits.is_closed() {
            return Err(ExecutorError::Closed);
        }
        let permits = Arc::clone(&self.permits);
        drop(self.handle.spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                return;
            };
            work.await;
        }));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "bounded"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_never_exceeds_limit() {
        let exec = BoundedExecutor::new(2);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (done_tx, mut done_rx) = tokio::sync::mpsc::unbounded_channel();

        for _ in 0..8 {
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            let done_tx = done_tx.clone();
            exec.execute(Box::pin(async move {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                running.fetch_sub(1, Ordering::SeqCst);
                let _ = done_tx.send(());
            }))
            .unwrap();
        }

        for _ in 0..8 {
            tokio::time::timeout(Duration::from_secs(5), done_rx.recv())
                .await
                .unwrap()
                .unwrap();
        }
        assert!(peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(exec.limit(), 2);
    }

    #[tokio::test]
    async fn test_closed_rejects_work() {
        let exec = BoundedExecutor::new(1);
        exec.close();
        assert!(exec.is_closed());
        let res = exec.execute(Box::pin(async {}));
        assert_eq!(res, Err(ExecutorError::Closed));
    }
}
