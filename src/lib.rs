pub mod core;

pub use crate::core::buildcore::Restaurant;
pub use crate::core::order::Order;
pub use crate::core::queue::{AddOutcome, OrderQueue, QueueStats};
