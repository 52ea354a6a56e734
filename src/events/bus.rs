//! # Event bus.
//!
//! [`Bus`] wraps [`tokio::sync::broadcast`]. Every unit of work publishes to it
//! without waiting; observers subscribe and receive clones.
//!
//! ```text
//! attempt units (many) ──► Bus ──┬──► dispatcher listener ──► SubscriberSet
//!                                └──► bus.subscribe() (tests, custom consumers)
//! ```
//!
//! ## Rules
//! - `publish()` never blocks and never fails; with no receivers the event is dropped.
//! - Capacity is a shared ring buffer; lagging receivers see `RecvError::Lagged(n)`.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for dispatcher events. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a bus with the given capacity (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all current receivers.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a receiver for events sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Number of live receivers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
