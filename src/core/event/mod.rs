use std::sync::atomic::{AtomicU64, Ordering};
use serde::{Serialize, Deserialize};

static EVENT_COUNTER: AtomicU64 = AtomicU64::new(1); // global counter for unique event IDs

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventOp {
    Placed,
    Served,
}

/// Something that happened to an order at the counter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderEvent<T> {
    pub global_id: u64,           // unique event ID
    pub op: EventOp,
    pub actor: String,            // "customer-3", "cook-1"
    pub order_number: u64,
    pub customer_id: usize,
    pub item: T,
}

impl<T> OrderEvent<T> {

    fn next_id() -> u64 {
        EVENT_COUNTER.fetch_add(1, Ordering::SeqCst)
    }

    pub fn placed(customer_id: usize, order_number: u64, item: T) -> Self {
        Self {
            global_id: Self::next_id(),
            op: EventOp::Placed,
            actor: format!("customer-{}", customer_id),
            order_number,
            customer_id,
            item,
        }
    }

    pub fn served(cook_id: usize, customer_id: usize, order_number: u64, item: T) -> Self {
        Self {
            global_id: Self::next_id(),
            op: EventOp::Served,
            actor: format!("cook-{}", cook_id),
            order_number,
            customer_id,
            item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_ids_are_unique_and_increasing() {
        let first = OrderEvent::placed(1, 1, "BensCake");
        let second = OrderEvent::served(2, 1, 1, "BensCake");
        assert!(second.global_id > first.global_id);
        assert_eq!(first.actor, "customer-1");
        assert_eq!(second.actor, "cook-2");
        assert_eq!(second.op, EventOp::Served);
    }
}
