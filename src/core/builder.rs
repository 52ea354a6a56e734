//! # Wiring a dispatcher.
//!
//! [`DispatcherBuilder::build`] resolves three things:
//! - executor: explicit one, else [`BoundedExecutor`] when
//!   `max_concurrent > 0`, else [`TokioExecutor`];
//! - retry policy: builder override, then [`DispatcherConfig::retry`], then
//!   [`Action::retry_policy`];
//! - subscribers: when present, a listener task forwards bus events to a
//!   [`SubscriberSet`] until the dispatcher is dropped.

use std::marker::PhantomData;
use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::{
    actions::Action,
    config::DispatcherConfig,
    core::dispatcher::{ActionDispatcher, Shared},
    events::Bus,
    executors::{BoundedExecutor, Executor, TokioExecutor},
    policies::RetryPolicy,
    subscribers::{Subscribe, SubscriberSet},
};

/// Builder for an [`ActionDispatcher`].
pub struct DispatcherBuilder<A, I, O> {
    action: A,
    cfg: DispatcherConfig,
    executor: Option<Arc<dyn Executor>>,
    retry: Option<RetryPolicy>,
    subscribers: Vec<Arc<dyn Subscribe>>,
    _io: PhantomData<fn(Arc<I>) -> O>,
}

impl<A, I, O> DispatcherBuilder<A, I, O>
where
    A: Action<I, O>,
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    /// Creates a builder with default configuration.
    pub fn new(action: A) -> Self {
        Self {
            action,
            cfg: DispatcherConfig::default(),
            executor: None,
            retry: None,
            subscribers: Vec::new(),
            _io: PhantomData,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: DispatcherConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Runs attempts on `executor` instead of the one derived from the config.
    pub fn with_executor(self, executor: impl Executor) -> Self {
        self.with_shared_executor(Arc::new(executor))
    }

    /// Same as [`with_executor`](Self::with_executor) for an executor shared with other dispatchers.
    pub fn with_shared_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Overrides the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Event subscribers, fed through a [`SubscriberSet`].
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the dispatcher.
    ///
    /// # Panics
    /// Panics outside a tokio runtime when the default executor or subscribers are used.
    pub fn build(self) -> ActionDispatcher<A, I, O> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());

        let executor = self.executor.unwrap_or_else(|| match self.cfg.concurrency_limit() {
            Some(n) => Arc::new(BoundedExecutor::new(n)) as Arc<dyn Executor>,
            None => Arc::new(TokioExecutor::current()),
        });

        let retry = self
            .retry
            .or(self.cfg.retry)
            .unwrap_or_else(|| self.action.retry_policy());

        let listener = CancellationToken::new();
        if !self.subscribers.is_empty() {
            let set = SubscriberSet::new(self.subscribers, bus.clone());
            subscriber_listener(&bus, set, listener.clone());
        }

        let shared = Shared {
            action: self.action,
            executor,
            retry,
            bus,
        };
        ActionDispatcher::from_parts(shared, CancellationToken::new(), listener)
    }
}

/// Forwards bus events to the subscriber set until `stop` fires.
fn subscriber_listener(bus: &Bus, set: SubscriberSet, stop: CancellationToken) {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                res = rx.recv() => match res {
                    Ok(ev) => set.emit(ev),
                    Err(RecvError::Lagged(n)) => {
                        warn!(skipped = n, "subscriber listener lagged behind the event bus");
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = stop.cancelled() => break,
            }
        }
        set.shutdown().await;
    });
}
