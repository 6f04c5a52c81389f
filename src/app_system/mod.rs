//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod order_desk;
pub mod prep_timer;
pub mod presenter;
pub mod seed;
pub mod tracing;

pub use config::*;
pub use order_desk::*;
pub use prep_timer::*;
pub use presenter::*;
pub use seed::*;
pub use self::tracing::*;
