use std::collections::BTreeSet;
use std::time::Duration;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

use crate::clients::OrderClient;
use crate::domain::{OrderStatus, Queue};
use crate::order_actor::{OrderError, OrderEvent};

/// Preparation countdown for accepted orders.
///
/// Starts counting when an order is accepted and stops once it leaves
/// `preparing` or its time runs out. Every tick goes through the order actor,
/// so the store stays the single writer. The tick phase restarts whenever the
/// first countdown starts, so a fresh order is never charged a partial interval.
/// Exits when the actor stops and the event channel closes.
#[instrument(name = "prep_timer", skip(client, events))]
pub async fn run_prep_timer(
    client: OrderClient,
    mut events: broadcast::Receiver<OrderEvent>,
    interval: Duration,
) {
    info!("Prep timer starting");

    let elapsed_secs = u32::try_from(interval.as_secs()).unwrap_or(u32::MAX).max(1);
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut countdowns = BTreeSet::new();
    resync(&client, &mut countdowns).await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tick_all(&client, &mut countdowns, elapsed_secs).await;
            }
            event = events.recv() => match event {
                Ok(OrderEvent::Accepted(order)) => {
                    debug!(order_id = %order.id, "Countdown started");
                    if countdowns.is_empty() {
                        ticker.reset();
                    }
                    countdowns.insert(order.id);
                }
                Ok(OrderEvent::StatusChanged { order, .. }) if order.status != OrderStatus::Preparing => {
                    if countdowns.remove(&order.id) {
                        debug!(order_id = %order.id, status = %order.status, "Countdown stopped");
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Prep timer lagged behind order events, resyncing");
                    resync(&client, &mut countdowns).await;
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    info!("Prep timer stopped");
}

async fn tick_all(client: &OrderClient, countdowns: &mut BTreeSet<String>, elapsed_secs: u32) {
    let ids: Vec<String> = countdowns.iter().cloned().collect();
    for id in ids {
        match client.tick(id.clone(), elapsed_secs).await {
            Ok(order) if order.time_remaining_secs == 0 => {
                warn!(order_id = %id, estimated_minutes = ?order.estimated_minutes, "Preparation time elapsed");
                countdowns.remove(&id);
            }
            Ok(_) => {}
            Err(OrderError::ActorCommunicationError(e)) => {
                debug!(error = %e, "Order actor unavailable, skipping tick");
                return;
            }
            Err(e) => {
                // Usually a status change whose event has not arrived yet.
                debug!(order_id = %id, error = %e, "Countdown dropped");
                countdowns.remove(&id);
            }
        }
    }
}

async fn resync(client: &OrderClient, countdowns: &mut BTreeSet<String>) {
    match client.list_by_queue(Queue::Active).await {
        Ok(orders) => {
            *countdowns = orders
                .into_iter()
                .filter(|order| order.status == OrderStatus::Preparing && order.time_remaining_secs > 0)
                .map(|order| order.id)
                .collect();
            debug!(active = countdowns.len(), "Countdowns resynced");
        }
        Err(e) => warn!(error = %e, "Failed to resync countdowns"),
    }
}
