//! Dispatcher core.
//!
//! The only public types from this module are [`ActionDispatcher`], its
//! [`DispatcherBuilder`] and the [`ActionFuture`] handed back to callers.
//!
//! Internal modules:
//! - [`dispatcher`]: submission, per-attempt units of work, retry decisions;
//! - [`invocation`]: state that travels with an invocation from unit to unit;
//! - [`runner`]: one attempt with panic isolation and event publishing;
//! - [`handle`]: the caller's future;
//! - [`builder`]: wiring of executor, policy, bus and subscribers.

mod builder;
mod dispatcher;
mod handle;
mod invocation;
mod runner;

pub use builder::DispatcherBuilder;
pub use dispatcher::ActionDispatcher;
pub use handle::ActionFuture;
