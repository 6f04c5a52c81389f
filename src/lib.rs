//! # Order Desk
//!
//! Order lifecycle core for a vendor storefront: incoming orders are accepted
//! or rejected, prepared against a countdown, marked ready, and completed.
//!
//! - **Domain types** → [`domain::Order`], [`domain::OrderStatus`], [`domain::Queue`]
//! - **Time estimation** → [`domain::suggest_prep_minutes`], [`domain::PrepTimeChoice`]
//! - **Lifecycle state machine** → [`order_actor::lifecycle`], [`order_actor::OrderAction`]
//! - **In-memory store** → [`order_actor::OrderStore`]
//! - **Actor + client** → [`actor_framework::ResourceActor`], [`clients::OrderClient`]
//! - **System coordinator** → [`app_system::OrderDesk`], with the [`app_system::run_prep_timer`] countdown
//!
//! ```rust,ignore
//! let desk = OrderDesk::start(&DeskConfig::default());
//! let order = desk.order_client.create_order(params).await?;
//! desk.order_client.accept_with(order.id, PrepTimeChoice::Suggested).await?;
//! desk.shutdown().await?;
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod order_actor;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;
