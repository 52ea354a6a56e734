//! # Subscriber trait
//!
//! [`Subscribe`] plugs custom handlers into the dispatcher's event stream.
//! Each subscriber gets a dedicated worker and a bounded queue owned by the
//! [`SubscriberSet`](crate::SubscriberSet), so a slow handler never delays
//! attempts or other subscribers.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use anyorder::{Event, EventKind, Subscribe};
//!
//! struct ExhaustionAlert;
//!
//! #[async_trait]
//! impl Subscribe for ExhaustionAlert {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::RetriesExhausted {
//!             // page someone...
//!         }
//!     }
//!     fn name(&self) -> &'static str { "exhaustion-alert" }
//!     fn queue_capacity(&self) -> usize { 64 }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Contract for event subscribers.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles one event.
    async fn on_event(&self, event: &Event);

    /// Name used in overflow/panic events.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred queue capacity. On overflow the event is dropped for this subscriber.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
