use tokio::sync::broadcast;
use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Order, OrderCreate, PrepTimeChoice, Queue, QueueCounts, RejectionReason};
use crate::order_actor::{OrderAction, OrderError, OrderEvent};

/// Client for interacting with the Order actor.
///
/// Cheap to clone. Every clone talks to the same actor, which is the only
/// writer of the order store.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Order intake: the new order always starts as `pending`.
    #[instrument(fields(customer = %params.customer_name, items = params.items.len()), skip(self, params))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("Sending request");
        let order = self.inner.create(params).await?;
        info!(order_id = %order.id, "Order received");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: String) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");
        self.inner.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        self.inner.list().await
    }

    /// Orders in `queue`, in insertion order.
    #[instrument(skip(self))]
    pub async fn list_by_queue(&self, queue: Queue) -> Result<Vec<Order>, OrderError> {
        let orders = self.list_orders().await?;
        Ok(orders
            .into_iter()
            .filter(|order| queue.contains(order.status))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn queue_counts(&self) -> Result<QueueCounts, OrderError> {
        let orders = self.list_orders().await?;
        Ok(QueueCounts::tally(&orders))
    }

    /// Accepts an order using one of the dashboard's time presets.
    #[instrument(skip(self))]
    pub async fn accept_with(&self, id: String, choice: PrepTimeChoice) -> Result<Order, OrderError> {
        let order = self
            .get_order(id.clone())
            .await?
            .ok_or_else(|| OrderError::NotFound(id.clone()))?;

        let suggested = order.suggested_prep_minutes();
        let minutes = choice.resolve(suggested).map_err(OrderError::ValidationError)?;
        info!(
            units = order.total_quantity(),
            choice = %choice.label(suggested),
            minutes,
            "Prep time chosen"
        );
        self.accept(id, minutes).await
    }

    /// Rejects an order with a catalog reason or a free-text one.
    #[instrument(skip(self))]
    pub async fn reject_for(&self, id: String, reason: RejectionReason) -> Result<Order, OrderError> {
        self.reject(id, reason.into()).await
    }

    /// Receiver for status and acceptance notifications.
    #[instrument(skip(self))]
    pub async fn subscribe(&self) -> Result<broadcast::Receiver<OrderEvent>, OrderError> {
        debug!("Sending request");
        self.inner.subscribe().await
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), OrderError> {
        debug!("Sending shutdown request");
        self.inner.shutdown().await
    }
}

order_action!(OrderClient => fn accept(estimated_minutes: u32) as OrderAction::Accept);
order_action!(OrderClient => fn reject(reason: String) as OrderAction::Reject);
order_action!(OrderClient => fn request_more_time(additional_minutes: u32) as OrderAction::RequestMoreTime);
order_action!(OrderClient => fn mark_ready() as OrderAction::MarkReady);
order_action!(OrderClient => fn mark_completed() as OrderAction::MarkCompleted);
order_action!(OrderClient => fn cancel() as OrderAction::Cancel);
order_action!(OrderClient => fn tick(elapsed_secs: u32) as OrderAction::Tick);
