use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::actor_framework::ResourceActor;
use crate::clients::OrderClient;
use crate::domain::Order;
use crate::order_actor::sequential_order_ids;
use super::{run_prep_timer, DeskConfig};

/// Coordinator for the running order desk.
///
/// Starts the order actor and the prep timer, hands out the client, and
/// shuts both down in order.
pub struct OrderDesk {
    pub order_client: OrderClient,
    handles: Vec<JoinHandle<()>>,
}

impl OrderDesk {
    /// Starts the order actor first, then the prep timer subscribed to its events.
    #[instrument(name = "order_desk", skip(config))]
    pub fn start(config: &DeskConfig) -> Self {
        info!(
            channel_buffer = config.channel_buffer,
            tick_interval_secs = config.tick_interval_secs,
            "Starting order desk"
        );

        let (order_actor, resource_client) = ResourceActor::<Order>::new(
            config.channel_buffer,
            config.event_capacity,
            sequential_order_ids(),
        );
        let order_client = OrderClient::new(resource_client);

        // Subscribe before spawning so the timer cannot miss an acceptance.
        let timer_events = order_actor.subscribe();
        let mut handles = vec![tokio::spawn(order_actor.run())];
        handles.push(tokio::spawn(run_prep_timer(
            order_client.clone(),
            timer_events,
            config.tick_interval(),
        )));

        info!("Order desk started");
        Self { order_client, handles }
    }

    /// Stops the order actor; the timer follows once the event channel closes.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down order desk");

        self.order_client.shutdown().await.map_err(|e| e.to_string())?;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Task shutdown error");
                return Err(format!("Task failed: {:?}", e));
            }
        }

        info!("Order desk shutdown complete");
        Ok(())
    }
}
