//! Dispatcher events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: attempt units spawned by the dispatcher, `SubscriberSet` workers
//!   (overflow/panic).
//! - **Consumers**: the dispatcher's listener (fans out to `SubscriberSet`) and any
//!   receiver obtained from [`Bus::subscribe`].

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
