//! # Example: any_order
//!
//! Submits several items to one dispatcher and shows that each result
//! arrives on its own, whatever order the items were submitted in.
//!
//! Shows how to:
//! - Wrap a closure in [`ActionFn`]
//! - Retry with exponential backoff and jitter via [`RetryPolicy`]
//! - Cap concurrency through [`DispatcherConfig::max_concurrent`]
//! - Watch the lifecycle through [`LogWriter`] and `tracing`
//! - Cancel one invocation without touching the others
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► dispatcher.act_on_item("slow")     sleeps 300ms, succeeds
//!   ├─► dispatcher.act_on_item("flaky")    fails twice, then succeeds
//!   ├─► dispatcher.act_on_item("broken")   always fails → RetriesExhausted
//!   ├─► dispatcher.act_on_item("stuck")    waits forever → cancelled → Interrupted
//!   └─► dispatcher.act_on_item("fast")     succeeds at once
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example any_order
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyorder::{
    ActionDispatcher, ActionError, ActionFn, BackoffPolicy, DispatcherConfig, JitterPolicy,
    LogWriter, RetryPolicy, Subscribe,
};
use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // 1. Action: behaviour depends on the item.
    let calls: Arc<Mutex<HashMap<String, u32>>> = Arc::default();
    let counter = Arc::clone(&calls);
    let action = ActionFn::new("demo", move |item: Arc<String>, ctx: CancellationToken| {
        let call = {
            let mut calls = counter.lock().unwrap();
            let n = calls.entry(item.to_string()).or_default();
            *n += 1;
            *n
        };
        async move {
            match item.as_str() {
                "slow" => {
                    tokio::select! {
                        _ = tokio::time::sleep(Duration::from_millis(300)) => Ok("slow done".to_string()),
                        _ = ctx.cancelled() => Err(ActionError::Interrupted),
                    }
                }
                "flaky" if call <= 2 => Err(ActionError::fail(format!("flaky call #{call}"))),
                "broken" => Err(ActionError::fail("always broken")),
                "stuck" => {
                    ctx.cancelled().await;
                    Err(ActionError::Interrupted)
                }
                other => Ok(format!("{other} done after {call} call(s)")),
            }
        }
    });

    // 2. Policy: at most 4 attempts, 50ms → 100ms → 200ms with equal jitter.
    let retry = RetryPolicy::bounded(4).with_backoff(
        BackoffPolicy::exponential(Duration::from_millis(50), 2.0, Duration::from_secs(1))
            .with_jitter(JitterPolicy::Equal),
    );

    let cfg = DispatcherConfig {
        max_concurrent: 8,
        ..DispatcherConfig::default()
    };
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];

    let dispatcher: ActionDispatcher<_, String, String> = ActionDispatcher::builder(action)
        .with_config(cfg)
        .with_retry_policy(retry)
        .with_subscribers(subs)
        .build();

    // 3. Submit everything up front; nothing blocks.
    let names = ["slow", "flaky", "broken", "stuck", "fast"];
    let futures: Vec<_> = names
        .iter()
        .map(|name| dispatcher.act_on_item(name.to_string()))
        .collect();

    // 4. Give up on "stuck" after a moment; the others are unaffected.
    let stuck = futures[3].token().clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        stuck.cancel();
    });

    // 5. Each future resolves independently.
    for (name, res) in names.iter().zip(join_all(futures).await) {
        match res {
            Ok(out) => println!("{name:>7}: ok    {out}"),
            Err(err) => println!("{name:>7}: error {err}"),
        }
    }

    // Let LogWriter drain before exit.
    tokio::time::sleep(Duration::from_millis(50)).await;
}
