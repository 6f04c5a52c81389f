use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::actor_framework::ResourceStore;
use crate::domain::{Order, OrderCreate, Queue, QueueCounts};
use super::{OrderAction, OrderError};

/// The in-memory order working set.
pub type OrderStore = ResourceStore<Order>;

/// Id generator handing out `order_1`, `order_2`, ...
pub fn sequential_order_ids() -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || {
        let id = counter.fetch_add(1, Ordering::SeqCst);
        format!("order_{}", id)
    }
}

impl ResourceStore<Order> {
    pub fn with_sequential_ids() -> Self {
        Self::new(sequential_order_ids())
    }

    /// Order intake. The new order is always `pending`.
    pub fn create_order(&mut self, params: OrderCreate) -> Result<Order, OrderError> {
        self.create(params).map(|(order, _)| order)
    }

    /// Orders whose status maps to `queue`, in insertion order.
    pub fn list_by_queue(&self, queue: Queue) -> Vec<&Order> {
        self.list().filter(|order| queue.contains(order.status)).collect()
    }

    pub fn queue_counts(&self) -> QueueCounts {
        QueueCounts::tally(self.list())
    }

    /// Applies a lifecycle action and returns the stored result. A failing
    /// action leaves the stored order untouched.
    pub fn apply(&mut self, order_id: &str, action: OrderAction) -> Result<Order, OrderError> {
        self.perform_action(&order_id.to_string(), action)
            .map(|applied| applied.entity)
    }
}
