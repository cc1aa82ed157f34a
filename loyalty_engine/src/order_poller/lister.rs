use std::time::Duration;

use log::*;

use crate::{
    db_types::PendingOrder,
    order_poller::{queue::QueueProducer, PollerError, ShutdownSignal},
    OrderManagement,
};

/// Lists pending orders and feeds them to the workers, once every `poll_interval`, until shutdown.
///
/// A failure to list orders is fatal. Orders that are still pending on the next cycle are simply listed again.
pub(crate) async fn run_lister<L>(
    ledger: L,
    queue: QueueProducer<PendingOrder>,
    poll_interval: Duration,
    mut signal: ShutdownSignal,
) -> Result<(), PollerError>
where
    L: OrderManagement,
{
    debug!("🔄️ Order lister started");
    while !signal.is_triggered() {
        let pending = ledger.fetch_pending_orders().await.map_err(PollerError::Listing)?;
        if !pending.is_empty() {
            debug!("🔄️ {} orders are awaiting an accrual verdict", pending.len());
        }
        for order in pending {
            if queue.put(order, &mut signal).await.is_err() {
                debug!("🔄️ Order lister stopped while enqueueing");
                return Ok(());
            }
        }
        tokio::select! {
            biased;
            _ = signal.wait() => break,
            _ = tokio::time::sleep(poll_interval) => {},
        }
    }
    debug!("🔄️ Order lister stopped");
    Ok(())
}
