#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use crate::actor_framework::FrameworkError;
    use crate::app_system::{seed_orders, DeskConfig, OrderDesk};
    use crate::clients::OrderClient;
    use crate::domain::{
        suggest_prep_minutes, Order, OrderCreate, OrderItem, OrderStatus, PrepTimeChoice, Queue, QueueCounts,
        RejectionReason,
    };
    use crate::mock_framework::{create_mock_client, expect_action, expect_get, expect_list};
    use crate::order_actor::{OrderAction, OrderError, OrderEvent};

    fn pending(id: &str, quantities: &[u32]) -> Order {
        Order {
            id: id.to_string(),
            customer_name: "Charlie B.".to_string(),
            items: quantities.iter().map(|&q| OrderItem::new("Wings", q)).collect(),
            total: 27.99,
            status: OrderStatus::Pending,
            estimated_minutes: None,
            time_remaining_secs: 0,
            created_at: Utc::now(),
            rejection_reason: None,
        }
    }

    #[tokio::test]
    async fn test_accept_with_suggested_time_flow() {
        let (inner, mut order_rx) = create_mock_client::<Order>(10);
        let client = OrderClient::new(inner);

        let accept_task = tokio::spawn(async move {
            client.accept_with("order_1".to_string(), PrepTimeChoice::Suggested).await
        });

        // The client first looks the order up to compute the suggestion...
        let (id, responder) = expect_get(&mut order_rx).await.expect("Expected Order Get");
        assert_eq!(id, "order_1");
        responder.send(Ok(Some(pending("order_1", &[1, 6])))).unwrap();

        // ...then sends the accept with 10 + 7 * 3 = 31, rounded to 35.
        let (id, action, responder) = expect_action(&mut order_rx).await.expect("Expected Order Action");
        assert_eq!(id, "order_1");
        assert_eq!(action, OrderAction::Accept { estimated_minutes: 35 });

        let mut accepted = pending("order_1", &[1, 6]);
        accepted.accept(35).unwrap();
        responder.send(Ok(accepted.clone())).unwrap();

        assert_eq!(accept_task.await.unwrap(), Ok(accepted));
    }

    #[tokio::test]
    async fn test_accept_with_unknown_order() {
        let (inner, mut order_rx) = create_mock_client::<Order>(10);
        let client = OrderClient::new(inner);

        let accept_task = tokio::spawn(async move {
            client.accept_with("order_404".to_string(), PrepTimeChoice::Busy).await
        });

        let (_, responder) = expect_get(&mut order_rx).await.expect("Expected Order Get");
        responder.send(Ok(None)).unwrap();

        assert_eq!(accept_task.await.unwrap(), Err(OrderError::NotFound("order_404".to_string())));
    }

    #[tokio::test]
    async fn test_reject_for_sends_catalog_label() {
        let (inner, mut order_rx) = create_mock_client::<Order>(10);
        let client = OrderClient::new(inner);

        let reject_task = tokio::spawn(async move {
            client.reject_for("order_2".to_string(), RejectionReason::TooBusy).await
        });

        let (_, action, responder) = expect_action(&mut order_rx).await.expect("Expected Order Action");
        assert_eq!(action, OrderAction::Reject { reason: "Too busy - Kitchen at capacity".to_string() });
        responder.send(Err(FrameworkError::NotFound("order_2".into()).into())).unwrap();

        assert_eq!(reject_task.await.unwrap(), Err(OrderError::NotFound("order_2".to_string())));
    }

    #[tokio::test]
    async fn test_list_by_queue_filters_snapshot() {
        let (inner, mut order_rx) = create_mock_client::<Order>(10);
        let client = OrderClient::new(inner);

        let list_task = tokio::spawn(async move { client.list_by_queue(Queue::Incoming).await });

        let mut accepted = pending("order_2", &[1]);
        accepted.accept(10).unwrap();
        let responder = expect_list(&mut order_rx).await.expect("Expected Order List");
        responder
            .send(Ok(vec![pending("order_1", &[1]), accepted, pending("order_3", &[2])]))
            .unwrap();

        let ids: Vec<String> = list_task.await.unwrap().unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["order_1", "order_3"]);
    }

    #[tokio::test]
    async fn test_dropped_actor_surfaces_as_communication_error() {
        let (inner, order_rx) = create_mock_client::<Order>(10);
        let client = OrderClient::new(inner);
        drop(order_rx);

        assert!(matches!(
            client.mark_ready("order_1".to_string()).await,
            Err(OrderError::ActorCommunicationError(_))
        ));
    }

    #[tokio::test]
    async fn test_order_desk_lifecycle() {
        let desk = OrderDesk::start(&DeskConfig::default());
        let client = desk.order_client.clone();
        let mut events = client.subscribe().await.unwrap();

        let mut ids = Vec::new();
        for params in seed_orders() {
            ids.push(client.create_order(params).await.unwrap().id);
        }
        assert_eq!(ids, vec!["order_1", "order_2", "order_3"]);
        assert!(matches!(events.recv().await.unwrap(), OrderEvent::Received(o) if o.id == "order_1"));

        let accepted = client.accept_with(ids[0].clone(), PrepTimeChoice::Suggested).await.unwrap();
        assert_eq!(accepted.status, OrderStatus::Preparing);
        assert_eq!(accepted.estimated_minutes, Some(20));

        let again = client.accept(ids[0].clone(), 20).await;
        assert_eq!(
            again,
            Err(OrderError::InvalidTransition {
                current: OrderStatus::Preparing,
                attempted: OrderStatus::Preparing,
            })
        );

        assert!(matches!(
            client.reject(ids[1].clone(), String::new()).await,
            Err(OrderError::ValidationError(_))
        ));
        let rejected = client
            .reject_for(ids[1].clone(), RejectionReason::Other("Fryer is down".into()))
            .await
            .unwrap();
        assert_eq!(rejected.rejection_reason.as_deref(), Some("Fryer is down"));

        assert!(matches!(
            client.mark_completed(ids[2].clone()).await,
            Err(OrderError::InvalidTransition { current: OrderStatus::Pending, .. })
        ));

        client.mark_ready(ids[0].clone()).await.unwrap();
        let done = client.mark_completed(ids[0].clone()).await.unwrap();
        assert_eq!(done.status, OrderStatus::Completed);
        assert_eq!(done.estimated_minutes, Some(20));
        assert_eq!(done.rejection_reason, None);

        assert_eq!(
            client.queue_counts().await.unwrap(),
            QueueCounts { incoming: 1, active: 0, completed: 2 }
        );
        assert!(client
            .list_by_queue(Queue::Incoming)
            .await
            .unwrap()
            .iter()
            .all(|o| o.status == OrderStatus::Pending));

        assert_eq!(
            client.mark_ready("order_99".to_string()).await,
            Err(OrderError::NotFound("order_99".to_string()))
        );

        // Events are published before the action replies, so everything is queued by now.
        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            seen.push(match event {
                OrderEvent::Received(o) => format!("received {}", o.id),
                OrderEvent::StatusChanged { order, previous } => {
                    format!("{} {} -> {}", order.id, previous, order.status)
                }
                OrderEvent::Accepted(o) => format!("accepted {} {}", o.id, o.countdown()),
            });
        }
        assert_eq!(
            seen,
            vec![
                "received order_2",
                "received order_3",
                "order_1 pending -> preparing",
                "accepted order_1 20:00",
                "order_2 pending -> cancelled",
                "order_1 preparing -> ready",
                "order_1 ready -> completed",
            ]
        );

        desk.shutdown().await.unwrap();
        assert!(matches!(
            client.list_orders().await,
            Err(OrderError::ActorCommunicationError(_))
        ));
    }

    #[tokio::test]
    async fn test_suggested_time_for_huge_order_saturates() {
        let desk = OrderDesk::start(&DeskConfig::default());
        let client = desk.order_client.clone();

        let items = vec![OrderItem::new("Wings", u32::MAX), OrderItem::new("Fries", 2)];
        let order = client
            .create_order(OrderCreate::new("Dana", items.clone(), 9.5))
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_quantity(), u32::MAX);

        let accepted = client.accept_with(order.id.clone(), PrepTimeChoice::Suggested).await.unwrap();
        let minutes = accepted.estimated_minutes.unwrap();
        assert_eq!(minutes, suggest_prep_minutes(&items));
        assert!(minutes >= suggest_prep_minutes(&[OrderItem::new("Wings", u32::MAX)]));
        assert_eq!(minutes % 5, 0);

        desk.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_prep_timer_restarts_phase_for_first_countdown() {
        let desk = OrderDesk::start(&DeskConfig::default());
        let client = desk.order_client.clone();

        let order = client.create_order(seed_orders().remove(0)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(900)).await;
        client.accept(order.id.clone(), 15).await.unwrap();

        // Past the old one-second boundary, but not a full interval since acceptance.
        tokio::time::sleep(Duration::from_millis(200)).await;
        let fresh = client.get_order(order.id.clone()).await.unwrap().unwrap();
        assert_eq!(fresh.time_remaining_secs, 900);

        tokio::time::sleep(Duration::from_millis(900)).await;
        let ticked = client.get_order(order.id.clone()).await.unwrap().unwrap();
        assert_eq!(ticked.time_remaining_secs, 899);

        desk.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_prep_timer_counts_down_accepted_orders() {
        let desk = OrderDesk::start(&DeskConfig::default());
        let client = desk.order_client.clone();

        let order = client.create_order(seed_orders().remove(0)).await.unwrap();
        client.accept(order.id.clone(), 15).await.unwrap();

        tokio::time::sleep(Duration::from_millis(3_500)).await;

        let ticking = client.get_order(order.id.clone()).await.unwrap().unwrap();
        assert!(ticking.time_remaining_secs < 900, "countdown did not move");
        assert!(ticking.time_remaining_secs >= 900 - 5);

        // Once ready, the countdown is cleared and stays cleared.
        client.mark_ready(order.id.clone()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;
        let ready = client.get_order(order.id.clone()).await.unwrap().unwrap();
        assert_eq!(ready.status, OrderStatus::Ready);
        assert_eq!(ready.time_remaining_secs, 0);

        desk.shutdown().await.unwrap();
    }
}
