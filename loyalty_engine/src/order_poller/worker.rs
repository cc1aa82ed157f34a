use accrual_client::AccrualResponse;
use log::*;

use crate::{
    db_types::{Cents, Order, OrderStatusType, PendingOrder},
    events::{EventProducers, OrderVerdictEvent},
    order_poller::{queue::QueueConsumer, AccrualOracle, PollerError, ShutdownSignal},
    OrderManagement,
};

/// Takes orders off the queue and reconciles them with the accrual service until shutdown.
///
/// Shutdown is only noticed while waiting for the next order. An order that has been taken is always seen through to
/// the end.
pub(crate) async fn run_worker<L, O>(
    id: usize,
    ledger: L,
    oracle: O,
    queue: QueueConsumer<PendingOrder>,
    producers: EventProducers,
    mut signal: ShutdownSignal,
) -> Result<(), PollerError>
where
    L: OrderManagement,
    O: AccrualOracle,
{
    trace!("🔄️ Worker {id} started");
    while let Ok(order) = queue.take(&mut signal).await {
        if let Some(updated) = reconcile_order(&ledger, &oracle, &order).await? {
            producers.publish_order_verdict(updated).await;
        }
    }
    trace!("🔄️ Worker {id} stopped");
    Ok(())
}

/// Asks the oracle about a single order and writes the verdict to the ledger.
///
/// * A verdict is stored as-is, with the accrual converted to cents.
/// * An order the oracle has never heard of is marked `INVALID`.
/// * If the oracle can't be reached, nothing is written and `None` is returned. The order is still pending, so it
///   will be tried again on the next cycle.
/// * Any other oracle or ledger error is returned.
pub(crate) async fn reconcile_order<L, O>(
    ledger: &L,
    oracle: &O,
    order: &PendingOrder,
) -> Result<Option<OrderVerdictEvent>, PollerError>
where
    L: OrderManagement,
    O: AccrualOracle,
{
    let number = &order.order_number;
    let (status, accrual, unregistered) = match oracle.get_order(number.as_str()).await {
        Ok(AccrualResponse::Verdict(verdict)) => {
            let accrual = Cents::from_major_units(verdict.accrual_or_zero());
            (OrderStatusType::from(verdict.status), accrual, false)
        },
        Ok(AccrualResponse::NotRegistered) => {
            info!("🔄️ Order {number} is unknown to the accrual service. Marking it as invalid.");
            (OrderStatusType::Invalid, Cents::default(), true)
        },
        Err(e) if e.is_transient() => {
            warn!("🔄️ Could not reach the accrual service for order {number}. Will retry next cycle. {e}");
            return Ok(None);
        },
        Err(e) => return Err(PollerError::Oracle { order: number.clone(), source: e }),
    };
    let updated: Order = ledger
        .apply_verdict(order.user_id, number, status, accrual)
        .await
        .map_err(|e| PollerError::Apply { order: number.clone(), source: e })?;
    debug!("🔄️ Order {number} for user #{} is {status} with accrual {accrual}", order.user_id);
    Ok(Some(OrderVerdictEvent::new(updated, unregistered)))
}
