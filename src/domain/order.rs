use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an order sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Received, waiting for the vendor to accept or reject it
    Pending,
    /// Accepted and being prepared
    Preparing,
    /// Ready for pickup
    Ready,
    /// Handed over to the customer
    Completed,
    /// Rejected or cancelled
    Cancelled,
}

impl OrderStatus {
    /// Terminal orders accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn queue(&self) -> Queue {
        match self {
            OrderStatus::Pending => Queue::Incoming,
            OrderStatus::Preparing | OrderStatus::Ready => Queue::Active,
            OrderStatus::Completed | OrderStatus::Cancelled => Queue::Completed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dashboard grouping of orders by status. Not a message queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Queue {
    Incoming,
    Active,
    Completed,
}

impl Queue {
    pub fn contains(&self, status: OrderStatus) -> bool {
        status.queue() == *self
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Queue::Incoming => "incoming",
            Queue::Active => "active",
            Queue::Completed => "completed",
        })
    }
}

impl FromStr for Queue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incoming" => Ok(Queue::Incoming),
            "active" => Ok(Queue::Active),
            "completed" => Ok(Queue::Completed),
            other => Err(format!("Unknown queue: {}", other)),
        }
    }
}

/// Badge counts shown on the queue tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueCounts {
    pub incoming: usize,
    pub active: usize,
    pub completed: usize,
}

impl QueueCounts {
    pub fn tally<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        orders.into_iter().fold(Self::default(), |mut counts, order| {
            match order.queue() {
                Queue::Incoming => counts.incoming += 1,
                Queue::Active => counts.active += 1,
                Queue::Completed => counts.completed += 1,
            }
            counts
        })
    }
}

/// A line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl OrderItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
            special_instructions: None,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.special_instructions = Some(instructions.into());
        self
    }
}

/// Represents a customer order as the vendor sees it.
///
/// Snapshots handed out by the store are copies; the stored record only
/// changes through lifecycle actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: OrderStatus,
    /// Minutes promised to the customer, set on accept.
    pub estimated_minutes: Option<u32>,
    /// Seconds left on the preparation countdown.
    pub time_remaining_secs: u32,
    pub created_at: DateTime<Utc>,
    pub rejection_reason: Option<String>,
}

/// Payload for creating a new order, as handed over by order intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
}

impl OrderCreate {
    pub fn new(customer_name: impl Into<String>, items: Vec<OrderItem>, total: f64) -> Self {
        Self {
            customer_name: customer_name.into(),
            items,
            total,
        }
    }
}

impl Order {
    pub fn total_quantity(&self) -> u32 {
        super::total_quantity(&self.items)
    }

    /// Suggested preparation time for this order's contents.
    pub fn suggested_prep_minutes(&self) -> u32 {
        super::suggest_prep_minutes(&self.items)
    }

    pub fn queue(&self) -> Queue {
        self.status.queue()
    }

    /// Countdown as shown on the order card, e.g. `2:05`.
    pub fn countdown(&self) -> String {
        format_countdown(self.time_remaining_secs)
    }
}

/// Formats seconds as `M:SS`.
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
