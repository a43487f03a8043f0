use serde::{Deserialize, Serialize};

/// A single unit of work travelling from a customer to a cook.
///
/// The order number is left unset by the customer and stamped exactly once by
/// the queue when the order is accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order<T> {
    pub customer_id: usize,
    pub item: T,
    number: Option<u64>,
}

impl<T> Order<T> {
    /// Build a fresh, unnumbered order
    pub fn new(customer_id: usize, item: T) -> Self {
        Self { customer_id, item, number: None }
    }

    /// Number assigned by the queue, `None` until the order has been accepted
    pub fn number(&self) -> Option<u64> {
        self.number
    }

    pub(crate) fn assign_number(&mut self, number: u64) {
        // --- Negative-space assertion: numbers are stamped exactly once ---
        assert!(
            self.number.is_none(),
            "Order already carries number {:?}",
            self.number
        );
        assert!(number > 0, "Order numbers start at 1");
        self.number = Some(number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_order_is_unnumbered() {
        let order = Order::new(7, "BensChilli");
        assert_eq!(order.number(), None);
        assert_eq!(order.customer_id, 7);
    }

    #[test]
    #[should_panic(expected = "already carries number")]
    fn number_cannot_be_stamped_twice() {
        let mut order = Order::new(1, "BensShake");
        order.assign_number(1);
        order.assign_number(2);
    }
}
