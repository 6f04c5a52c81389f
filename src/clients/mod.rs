//! Client handles for talking to the actors.

#[macro_use]
mod macros;
pub mod order_client;

pub use order_client::*;
