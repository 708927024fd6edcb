use std::{future::Future, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::warn;

/// Handle to a running poll loop. `stop` halts polling for all future
/// ticks and is idempotent; dropping the handle without stopping leaves
/// the loop running detached.
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(&self) {
        self.task.abort();
    }
}

/// Spawns a timed reconciliation loop: `derive` recomputes a view of some
/// external mutable state and `on_change` fires only when the view differs
/// from the last delivered value. The first tick completes immediately, so
/// the initial view is delivered without waiting a full interval.
///
/// The interval is a staleness bound, not a correctness-critical value; a
/// completed external write is observed within one tick. A failed `derive`
/// is logged, the previous delivered value is retained, and polling
/// continues on the next tick.
pub fn spawn<T, D, Fut, F>(derive: D, mut on_change: F, every: Duration) -> PollHandle
where
    T: PartialEq + Send + 'static,
    D: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<T>> + Send,
    F: FnMut(&T) + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_delivered: Option<T> = None;

        loop {
            ticker.tick().await;
            match derive().await {
                Ok(view) => {
                    if last_delivered.as_ref() != Some(&view) {
                        on_change(&view);
                        last_delivered = Some(view);
                    }
                }
                Err(err) => {
                    warn!(error = %err, "poll tick failed to derive view; keeping previous value");
                }
            }
        }
    });

    PollHandle { task }
}

#[cfg(test)]
#[path = "tests/reconciler_tests.rs"]
mod tests;
