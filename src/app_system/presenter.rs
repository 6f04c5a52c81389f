use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, instrument, warn};

use crate::order_actor::OrderEvent;

/// Logs every order notification until the event channel closes, the way a
/// dashboard would re-render. Falling behind skips the dropped notifications
/// and keeps going. Returns how many notifications were shown.
#[instrument(name = "presenter", skip(events))]
pub async fn present_events(mut events: broadcast::Receiver<OrderEvent>) -> usize {
    let mut shown = 0;
    loop {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Presenter fell behind, some notifications were dropped");
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        match &event {
            OrderEvent::Received(order) => {
                info!(order_id = %order.id, customer = %order.customer_name, "New order")
            }
            OrderEvent::StatusChanged { order, previous } => {
                info!(order_id = %order.id, from = %previous, to = %order.status, "Status changed")
            }
            OrderEvent::Accepted(order) => {
                info!(order_id = %order.id, countdown = %order.countdown(), "Countdown started")
            }
        }
        shown += 1;
    }
    shown
}
