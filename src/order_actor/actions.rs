use crate::domain::{Order, OrderStatus};

/// Lifecycle actions that can be applied to a stored order.
///
/// Each action checks the order's current status before anything else.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// `pending → preparing` with a promised preparation time.
    Accept { estimated_minutes: u32 },
    /// `pending → cancelled` with a reason for the customer.
    Reject { reason: String },
    /// Extends the estimate of a `preparing` order. No status change.
    RequestMoreTime { additional_minutes: u32 },
    /// `preparing → ready`
    MarkReady,
    /// `ready → completed`
    MarkCompleted,
    /// `pending | preparing → cancelled`, without a rejection reason.
    Cancel,
    /// Counts down a `preparing` order. Sent by the prep timer.
    Tick { elapsed_secs: u32 },
}

/// Notifications published by the order actor after a change is stored.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderEvent {
    /// A new order arrived from intake.
    Received(Order),
    /// The order moved from `previous` to its current status.
    StatusChanged { order: Order, previous: OrderStatus },
    /// The order was accepted and its countdown should start.
    Accepted(Order),
}

impl OrderEvent {
    pub fn order(&self) -> &Order {
        match self {
            OrderEvent::Received(order)
            | OrderEvent::StatusChanged { order, .. }
            | OrderEvent::Accepted(order) => order,
        }
    }
}
