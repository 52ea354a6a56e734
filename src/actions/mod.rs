//! # Actions.
//!
//! - [`Action`] - trait for the operation applied to each item
//! - [`ActionFn`] - closure-backed implementation

mod action;
mod action_fn;

pub use action::Action;
pub use action_fn::ActionFn;
