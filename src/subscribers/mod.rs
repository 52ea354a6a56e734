//! # Event subscribers.
//!
//! ```text
//! attempt units ── publish(Event) ──► Bus ──► dispatcher listener ──► SubscriberSet
//!                                                              ┌──────────┼──────────┐
//!                                                              ▼          ▼          ▼
//!                                                          LogWriter   Metrics    Custom
//! ```
//!
//! - [`Subscribe`] the extension trait
//! - [`SubscriberSet`] bounded per-subscriber queues with panic isolation
//! - [`LogWriter`] structured logging through `tracing`

mod log;
mod set;
mod subscribe;

pub use log::LogWriter;
pub use set::SubscriberSet;
pub(crate) use set::panic_message;
pub use subscribe::Subscribe;
