use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus};
use super::{OrderAction, OrderError, OrderEvent};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Event = OrderEvent;
    type Error = OrderError;

    fn id(&self) -> &String { &self.id }

    /// Creates a new pending Order from intake parameters.
    ///
    /// # Errors
    /// Fails with `ValidationError` for a blank customer name, an empty item
    /// list, a zero quantity, or a negative or non-finite total.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.customer_name.trim().is_empty() {
            return Err(OrderError::ValidationError("Customer name is required".to_string()));
        }
        if params.items.is_empty() {
            return Err(OrderError::ValidationError("Order must contain at least one item".to_string()));
        }
        if let Some(item) = params.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError(format!("Invalid quantity for {}: 0", item.name)));
        }
        if !params.total.is_finite() || params.total < 0.0 {
            return Err(OrderError::ValidationError(format!("Invalid order total: {}", params.total)));
        }

        Ok(Self {
            id,
            customer_name: params.customer_name,
            items: params.items,
            total: params.total,
            status: OrderStatus::Pending,
            estimated_minutes: None,
            time_remaining_secs: 0,
            created_at: Utc::now(),
            rejection_reason: None,
        })
    }

    #[instrument(fields(order_id = %self.id, status = %self.status), skip(self))]
    fn handle_action(&mut self, action: OrderAction) -> Result<Order, OrderError> {
        match action {
            OrderAction::Accept { estimated_minutes } => self.accept(estimated_minutes)?,
            OrderAction::Reject { reason } => self.reject(&reason)?,
            OrderAction::RequestMoreTime { additional_minutes } => self.request_more_time(additional_minutes)?,
            OrderAction::MarkReady => self.mark_ready()?,
            OrderAction::MarkCompleted => self.mark_completed()?,
            OrderAction::Cancel => self.cancel()?,
            OrderAction::Tick { elapsed_secs } => {
                self.tick(elapsed_secs)?;
                debug!(time_remaining = %self.countdown(), "Countdown ticked");
                return Ok(self.clone());
            }
        }

        info!(new_status = %self.status, estimated_minutes = ?self.estimated_minutes, "Order updated");
        Ok(self.clone())
    }

    fn created_events(&self) -> Vec<OrderEvent> {
        vec![OrderEvent::Received(self.clone())]
    }

    fn changed_events(before: &Self, after: &Self) -> Vec<OrderEvent> {
        let mut events = Vec::new();
        if before.status != after.status {
            events.push(OrderEvent::StatusChanged {
                order: after.clone(),
                previous: before.status,
            });
        }
        if before.status == OrderStatus::Pending && after.status == OrderStatus::Preparing {
            events.push(OrderEvent::Accepted(after.clone()));
        }
        events
    }
}
