use std::time::Duration;

use tracing::{error, info, Instrument};

use order_desk::app_system::{present_events, seed_orders, setup_tracing, DeskConfig, OrderDesk};
use order_desk::domain::{PrepTimeChoice, Queue, RejectionReason};
use order_desk::order_actor::OrderError;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = DeskConfig::load().map_err(|e| e.to_string())?;
    info!(?config, "Starting order desk demo");

    let desk = OrderDesk::start(&config);
    let client = desk.order_client.clone();

    // Stand-in for the dashboard: re-render on every notification
    let events = client.subscribe().await.map_err(|e| e.to_string())?;
    let presenter = tokio::spawn(present_events(events));

    let span = tracing::info_span!("order_intake");
    let ids = async {
        let mut ids = Vec::new();
        for params in seed_orders() {
            let order = client.create_order(params).await.map_err(|e| e.to_string())?;
            ids.push(order.id);
        }
        Ok::<_, String>(ids)
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("order_processing");
    let result = async {
        let first = client.accept_with(ids[0].clone(), PrepTimeChoice::Suggested).await?;
        info!(order_id = %first.id, estimated_minutes = ?first.estimated_minutes, "Accepted with suggested time");

        client.reject_for(ids[1].clone(), RejectionReason::OutOfStock).await?;
        client.accept_with(ids[2].clone(), PrepTimeChoice::Standard).await?;

        tokio::time::sleep(Duration::from_secs(2)).await;

        client.request_more_time(ids[2].clone(), 5).await?;
        client.mark_ready(ids[0].clone()).await?;
        client.mark_completed(ids[0].clone()).await?;

        // Expected to fail: terminal orders accept nothing
        if let Err(e) = client.mark_ready(ids[1].clone()).await {
            info!(error = %e, "Rejected order stays rejected");
        }

        let counts = client.queue_counts().await?;
        info!(incoming = counts.incoming, active = counts.active, completed = counts.completed, "Queue counts");

        for order in client.list_by_queue(Queue::Active).await? {
            info!(order_id = %order.id, countdown = %order.countdown(), "Still cooking");
        }
        Ok::<_, OrderError>(())
    }
    .instrument(span)
    .await;

    if let Err(e) = result {
        error!(error = %e, "Order processing failed");
    }

    // Shutdown system gracefully
    drop(client);
    desk.shutdown().await?;
    match presenter.await {
        Ok(shown) => info!(shown, "Presenter finished"),
        Err(e) => error!(error = ?e, "Presenter task failed"),
    }

    info!("Order desk demo completed");
    Ok(())
}
