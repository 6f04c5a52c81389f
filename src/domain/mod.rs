//! Business domain types for the order desk. Pure data and pure functions,
//! no actor concerns.

pub mod order;
pub mod estimate;
pub mod rejection;

pub use order::*;
pub use estimate::*;
pub use rejection::*;
