pub use crate::core::{
    queue::{AddOutcome, OrderQueue, QueueStats},
    log::{LogEntry, Logger, SafeLogger, State},
    event::{OrderEvent, EventOp},
    order::Order,
    error::QueueError,
};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Restaurant handle shared between customer and cook threads
pub type SharedRestaurant<T> = Arc<Restaurant<T>>;

/// Restaurant: the bounded order queue plus the order journal
pub struct Restaurant<T> {
    name: String,
    queue: OrderQueue<T>,
    journal: SafeLogger<T>,
}

impl<T: Clone> Restaurant<T> {
    /// Open a restaurant holding at most `capacity` orders and expecting
    /// `expected_orders` in total
    pub fn open(name: impl Into<String>, capacity: usize, expected_orders: u64) -> Self {
        let name = name.into();
        let restaurant = Self {
            queue: OrderQueue::open(capacity, expected_orders),
            journal: Arc::new(Mutex::new(Logger::new(name.clone()))),
            name,
        };
        info!(
            "Restaurant is open! ({}, capacity {}, expecting {} orders)",
            restaurant.name, capacity, expected_orders
        );
        restaurant
    }

    /// Close the restaurant.
    ///
    /// # Panics
    ///
    /// Panics unless every expected order was served.
    pub fn close(self) {
        let stats = self.queue.stats();
        self.queue.close();
        info!("Restaurant is closed! ({}, {} orders served)", self.name, stats.handled);
    }

    /// Place an order, waiting for room at the counter. Returns its number
    pub fn place_order(&self, order: Order<T>) -> u64 {
        let customer_id = order.customer_id;
        let item = order.item.clone();
        let number = self.queue.add_order(order);
        self.journal_placed(customer_id, number, item);
        number
    }

    /// Place an order, giving up if the counter stays full for `timeout`
    pub fn place_order_timeout(&self, order: Order<T>, timeout: Duration) -> AddOutcome<T> {
        let customer_id = order.customer_id;
        let item = order.item.clone();
        let outcome = self.queue.add_order_timeout(order, timeout);
        match &outcome {
            AddOutcome::Added(number) => self.journal_placed(customer_id, *number, item),
            AddOutcome::TimedOut(_) => {
                warn!("[Customer {}] Counter still full after {:?}", customer_id, timeout)
            }
        }
        outcome
    }

    /// Hand the next order to a cook. `None` means the kitchen is done
    pub fn take_order(&self, cook_id: usize) -> Option<Order<T>> {
        let order = self.queue.get_order()?;
        self.journal_served(cook_id, &order);
        Some(order)
    }

    /// Like [`take_order`](Self::take_order) but gives up after `timeout`
    pub fn take_order_timeout(
        &self,
        cook_id: usize,
        timeout: Duration,
    ) -> Result<Option<Order<T>>, QueueError> {
        match self.queue.get_order_timeout(timeout) {
            Ok(Some(order)) => {
                self.journal_served(cook_id, &order);
                Ok(Some(order))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                debug!("[Cook {}] {}", cook_id, err);
                Err(err)
            }
        }
    }

    /// Get current queue counters
    pub fn stats(&self) -> QueueStats {
        self.queue.stats()
    }

    /// Expose the journal
    pub fn logs(&self) -> Vec<LogEntry<T>> {
        self.journal().entries.clone()
    }

    fn journal(&self) -> MutexGuard<'_, Logger<T>> {
        self.journal.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn journal_placed(&self, customer_id: usize, number: u64, item: T) {
        debug!("[Customer {}] Order #{} placed", customer_id, number);
        self.journal().log(State::Queued, OrderEvent::placed(customer_id, number, item));
    }

    fn journal_served(&self, cook_id: usize, order: &Order<T>) {
        // numbers are stamped before an order can be dequeued
        let number = order.number().unwrap_or_default();
        debug!(
            "[Cook {}] Fulfilled order #{} for customer {}",
            cook_id, number, order.customer_id
        );
        self.journal().log(
            State::Served,
            OrderEvent::served(cook_id, order.customer_id, number, order.item.clone()),
        );
    }
}
