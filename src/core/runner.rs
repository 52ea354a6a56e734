//! # Run a single attempt.
//!
//! Calls the action once for an invocation, publishes `AttemptStarting`, and
//! folds a panic inside the action into an ordinary failure so that it goes
//! through the retry policy like any other error.
//!
//! ```text
//! publish AttemptStarting
//!   └─► action.act(item, token)
//!          ├─ Ok(v)              → Ok(v)
//!          ├─ Err(Fail)          → Err(Fail)
//!          ├─ Err(Interrupted)   → Err(Interrupted)
//!          └─ panic              → Err(Fail { "panicked: …" })
//! ```

use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::actions::Action;
use crate::core::invocation::Invocation;
use crate::error::ActionError;
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::panic_message;

/// Executes attempt number `inv.attempt` (already incremented by the caller).
pub(crate) async fn run_once<A, I, O>(
    action: &A,
    inv: &Invocation<I, O>,
    bus: &Bus,
) -> Result<O, ActionError>
where
    A: Action<I, O>,
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    bus.publish(
        Event::new(EventKind::AttemptStarting)
            .with_action(action.name())
            .with_invocation(inv.id)
            .with_attempt(inv.attempt),
    );

    let fut = action.act(inv.item.clone(), inv.token.clone());
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(res) => res,
        Err(panic) => Err(ActionError::fail(format!(
            "panicked: {}",
            panic_message(panic.as_ref())
        ))),
    }
}
