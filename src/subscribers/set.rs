//! # SubscriberSet: non-blocking fan-out.
//!
//! ```text
//! emit(event)
//!     ├──► [queue 1] ──► worker 1 ──► sub1.on_event()
//!     │    (bounded)          └─────► panic → SubscriberPanicked
//!     └──► [queue N] ──► worker N ──► subN.on_event()
//! ```
//!
//! ## Rules
//! - `emit()` returns immediately (`try_send`).
//! - Per-subscriber FIFO; no ordering across subscribers.
//! - Overflow drops the event for that subscriber only and publishes
//!   `SubscriberOverflow` (never for an overflow event itself).
//! - Panics are caught per event; the worker keeps going.

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::{Bus, Event, EventKind};
use crate::subscribers::Subscribe;

struct Channel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Per-subscriber queues and worker tasks.
pub struct SubscriberSet {
    channels: Vec<Channel>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl SubscriberSet {
    /// Spawns one worker per subscriber. Must be called inside a tokio runtime.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(sub.queue_capacity().max(1));
            let worker_bus = bus.clone();

            workers.push(tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = sub.on_event(ev.as_ref());
                    if let Err(panic) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        worker_bus.publish(Event::subscriber_panicked(
                            sub.name(),
                            panic_message(panic.as_ref()),
                        ));
                    }
                }
            }));
            channels.push(Channel { name, sender: tx });
        }

        Self {
            channels,
            workers,
            bus,
        }
    }

    /// Delivers `event` to every subscriber queue.
    pub fn emit(&self, event: Event) {
        let overflow = matches!(event.kind, EventKind::SubscriberOverflow);
        let event = Arc::new(event);

        for channel in &self.channels {
            let reason = match channel.sender.try_send(Arc::clone(&event)) {
                Ok(()) => continue,
                Err(mpsc::error::TrySendError::Full(_)) => "full",
                Err(mpsc::error::TrySendError::Closed(_)) => "closed",
            };
            if !overflow {
                self.bus
                    .publish(Event::subscriber_overflow(channel.name, reason));
            }
        }
    }

    /// Closes all queues and waits for the workers to drain them.
    pub async fn shutdown(self) {
        drop(self.channels);
        for h in self.workers {
            let _ = h.await;
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }
}

pub(crate) fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedSender;

    struct Forward(UnboundedSender<EventKind>);

    #[async_trait]
    impl Subscribe for Forward {
        async fn on_event(&self, ev: &Event) {
            let _ = self.0.send(ev.kind);
        }
        fn name(&self) -> &'static str {
            "forward"
        }
    }

    struct Explode;

    #[async_trait]
    impl Subscribe for Explode {
        async fn on_event(&self, _ev: &Event) {
            panic!("subscriber blew up");
        }
        fn name(&self) -> &'static str {
            "explode"
        }
    }

    #[tokio::test]
    async fn test_emit_reaches_every_subscriber() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let set = SubscriberSet::new(
            vec![Arc::new(Forward(tx.clone())), Arc::new(Forward(tx))],
            Bus::new(16),
        );
        assert_eq!(set.len(), 2);

        set.emit(Event::new(EventKind::InvocationSucceeded));
        for _ in 0..2 {
            let kind = tokio::time::timeout(Duration::from_secs(1), rx.recv())
                .await
                .unwrap();
            assert_eq!(kind, Some(EventKind::InvocationSucceeded));
        }
        set.shutdown().await;
    }

    #[tokio::test]
    async fn test_panic_is_reported_on_bus() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let set = SubscriberSet::new(vec![Arc::new(Explode)], bus);

        set.emit(Event::new(EventKind::AttemptStarting));
        let ev = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(ev.kind, EventKind::SubscriberPanicked);
        assert_eq!(ev.reason.as_deref(), Some("subscriber blew up"));
    }
}
