//! # Order poller
//!
//! Orders are uploaded in status `NEW`, and only the external accrual service can say what they are worth. The
//! order poller closes that loop in the background:
//!
//! * A single **lister** task periodically fetches every pending (`NEW` or `PROCESSING`) order from the ledger and
//!   pushes it onto a bounded [`WorkQueue`]. When the queue is full the lister waits, so the oracle is never asked
//!   about more orders at once than there are workers.
//! * A pool of **worker** tasks takes orders off the queue, asks the [`AccrualOracle`] for a verdict, and applies it
//!   with [`OrderManagement::apply_verdict`](crate::OrderManagement::apply_verdict). Every applied verdict is published
//!   as an [`OrderVerdictEvent`](crate::events::OrderVerdictEvent).
//! * [`OrderPoller::run`] supervises both. The first task to fail stops all the others, and its error is returned.
//!   Triggering the [`ShutdownSignal`] passed to `run` stops everything gracefully and `run` returns `Ok(())`.
//!
//! Temporary network failures while talking to the oracle are not errors: the order stays pending and is picked up
//! again on the next cycle.
//!
//! ```rust,ignore
//! let trigger = ShutdownTrigger::new();
//! let poller = OrderPoller::new(db, accrual_api, PollerConfig::default(), producers);
//! let handle = tokio::spawn(poller.run(trigger.to_signal()));
//! // ... later
//! trigger.trigger();
//! handle.await??;
//! ```
mod errors;
mod lister;
mod oracle;
mod queue;
mod shutdown;
mod worker;

use std::time::Duration;

pub use errors::PollerError;
use log::*;
pub use oracle::AccrualOracle;
pub use queue::{QueueConsumer, QueueError, QueueProducer, WorkQueue};
pub use shutdown::{ShutdownSignal, ShutdownTrigger};
use tokio::task::JoinSet;

use crate::{events::EventProducers, OrderManagement};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_POLL_WORKERS: usize = 4;

#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Pause between the end of one listing cycle and the start of the next.
    pub poll_interval: Duration,
    /// Number of concurrent oracle requests. Also the depth of the work queue.
    pub workers: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self { poll_interval: DEFAULT_POLL_INTERVAL, workers: DEFAULT_POLL_WORKERS }
    }
}

impl PollerConfig {
    /// A poller needs at least one worker; `workers` is raised to 1 if necessary.
    pub fn new(poll_interval: Duration, workers: usize) -> Self {
        if workers == 0 {
            warn!("🔄️ The order poller needs at least one worker. Using 1.");
        }
        Self { poll_interval, workers: workers.max(1) }
    }
}

pub struct OrderPoller<L, O> {
    ledger: L,
    oracle: O,
    config: PollerConfig,
    producers: EventProducers,
}

impl<L, O> OrderPoller<L, O>
where
    L: OrderManagement + Clone + Send + Sync + 'static,
    O: AccrualOracle + Clone + Send + Sync + 'static,
{
    pub fn new(ledger: L, oracle: O, config: PollerConfig, producers: EventProducers) -> Self {
        let config = PollerConfig::new(config.poll_interval, config.workers);
        Self { ledger, oracle, config, producers }
    }

    /// Runs the lister and the worker pool until `shutdown` fires or one of them fails.
    ///
    /// Either way, every task is given the chance to finish the order it is working on, and `run` only returns once
    /// all of them have stopped. If a task failed, its error is returned; errors from other tasks during the
    /// ensuing shutdown are logged and discarded.
    pub async fn run(self, mut shutdown: ShutdownSignal) -> Result<(), PollerError> {
        if shutdown.is_triggered() {
            debug!("🔄️ Shutdown was triggered before the order poller started");
            return Ok(());
        }
        let Self { ledger, oracle, config, producers } = self;
        info!(
            "🔄️ Order poller starting with {} workers, polling every {}ms",
            config.workers,
            config.poll_interval.as_millis()
        );
        let scope = ShutdownTrigger::new();
        let (producer, consumer) = WorkQueue::bounded(config.workers);
        let mut tasks = JoinSet::new();
        tasks.spawn(lister::run_lister(ledger.clone(), producer, config.poll_interval, scope.to_signal()));
        for id in 0..config.workers {
            tasks.spawn(worker::run_worker(
                id,
                ledger.clone(),
                oracle.clone(),
                consumer.clone(),
                producers.clone(),
                scope.to_signal(),
            ));
        }
        drop(consumer);

        let mut first_error = None;
        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait(), if !scope.is_triggered() => {
                    info!("🔄️ Order poller is shutting down");
                    scope.trigger();
                },
                joined = tasks.join_next() => {
                    let result = match joined {
                        None => break,
                        Some(Ok(result)) => result,
                        Some(Err(e)) => Err(PollerError::TaskFailed(e.to_string())),
                    };
                    if let Err(e) = result {
                        if first_error.is_none() {
                            error!("🔄️ Order poller task failed. Shutting down the poller. {e}");
                            first_error = Some(e);
                            scope.trigger();
                        } else {
                            debug!("🔄️ Discarding error from poller task during shutdown. {e}");
                        }
                    }
                },
            }
        }
        info!("🔄️ Order poller has stopped");
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
