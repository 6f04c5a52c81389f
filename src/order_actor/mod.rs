//! Order lifecycle: the status state machine, its actions and events, and the
//! queue views over the order store.

mod actions;
pub mod entity;
pub mod error;
pub mod lifecycle;
pub mod store;

pub use actions::*;
pub use error::*;
pub use store::*;
