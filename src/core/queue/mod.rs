use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;

use crate::core::error::QueueError;
use crate::core::order::Order;

/// Mutable state guarded by the queue lock: pending orders plus counters.
struct QueueState<T> {
    pending: VecDeque<Order<T>>,
    handled: u64,
    next_number: u64,
}

impl<T> QueueState<T> {
    fn new(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            handled: 0,
            next_number: 1,
        }
    }

    /// Stamp the next number on the order and append it at the back
    fn enqueue(&mut self, mut order: Order<T>) -> u64 {
        let number = self.next_number;
        self.next_number += 1;
        order.assign_number(number);

        let len_before = self.pending.len();
        self.pending.push_back(order);
        // --- post operation assertion ---
        assert_eq!(
            self.pending.len(),
            len_before + 1,
            "Queue length should grow by 1"
        );
        number
    }

    /// Remove the head order and count it as handled
    fn dequeue(&mut self) -> Option<Order<T>> {
        let len_before = self.pending.len();
        let order = self.pending.pop_front()?;
        self.handled += 1;
        // --- post operation assertion ---
        assert_eq!(
            self.pending.len(),
            len_before - 1,
            "Queue length should decrease by 1"
        );
        Some(order)
    }
}

/// Consistent snapshot of the queue counters, taken under the lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    pub current_size: usize,
    pub handled: u64,
    pub expected_total: u64,
    pub capacity: usize,
    pub next_number: u64,
}

/// Result of [`OrderQueue::add_order_timeout`].
#[derive(Debug, PartialEq, Eq)]
pub enum AddOutcome<T> {
    /// The order was queued under this number.
    Added(u64),
    /// The queue stayed full; the order comes back unnumbered.
    TimedOut(Order<T>),
}

/// Bounded blocking FIFO shared by customers (producers) and cooks (consumers).
///
/// A single mutex guards every counter and the pending list. Customers wait on
/// `space_available` while the queue is full; cooks wait on `order_available`
/// while it is empty and the expected number of orders has not yet been
/// handled. Once `expected_total` orders have been handled every cook gets
/// `None` without blocking.
pub struct OrderQueue<T> {
    state: Mutex<QueueState<T>>,
    space_available: Condvar,
    order_available: Condvar,
    capacity: usize,
    expected_total: u64,
}

impl<T> OrderQueue<T> {
    /// Create an empty queue.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` or `expected_total` is zero.
    pub fn open(capacity: usize, expected_total: u64) -> Self {
        assert!(capacity > 0, "queue capacity must be positive");
        assert!(expected_total > 0, "expected order total must be positive");
        Self {
            state: Mutex::new(QueueState::new(capacity)),
            space_available: Condvar::new(),
            order_available: Condvar::new(),
            capacity,
            expected_total,
        }
    }

    /// Tear the queue down once all expected work is done.
    ///
    /// # Panics
    ///
    /// Panics if the number of handled orders differs from the expected total:
    /// orders were lost or a cook never finished.
    pub fn close(self) {
        let state = self
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        assert_eq!(
            state.handled, self.expected_total,
            "closing with {} of {} expected orders handled",
            state.handled, self.expected_total
        );
    }

    /// Queue an order, blocking while the queue is full. Returns its number.
    pub fn add_order(&self, order: Order<T>) -> u64 {
        let guard = self.lock();
        let mut state = self
            .space_available
            .wait_while(guard, |s| s.pending.len() >= self.capacity)
            .unwrap_or_else(PoisonError::into_inner);
        self.push(&mut state, order)
    }

    /// Like [`add_order`](Self::add_order) but gives up after `timeout`.
    pub fn add_order_timeout(&self, order: Order<T>, timeout: Duration) -> AddOutcome<T> {
        let guard = self.lock();
        let (mut state, _) = self
            .space_available
            .wait_timeout_while(guard, timeout, |s| s.pending.len() >= self.capacity)
            .unwrap_or_else(PoisonError::into_inner);
        if state.pending.len() >= self.capacity {
            return AddOutcome::TimedOut(order);
        }
        AddOutcome::Added(self.push(&mut state, order))
    }

    /// Take the oldest order, blocking while none is pending.
    ///
    /// Returns `None` once every expected order has been handled.
    pub fn get_order(&self) -> Option<Order<T>> {
        let guard = self.lock();
        let mut state = self
            .order_available
            .wait_while(guard, |s| self.must_wait_for_order(s))
            .unwrap_or_else(PoisonError::into_inner);
        self.pop(&mut state)
    }

    /// Like [`get_order`](Self::get_order) but fails after `timeout` if no
    /// order arrives and the queue is not complete.
    pub fn get_order_timeout(
        &self,
        timeout: Duration,
    ) -> Result<Option<Order<T>>, QueueError> {
        let guard = self.lock();
        let (mut state, _) = self
            .order_available
            .wait_timeout_while(guard, timeout, |s| self.must_wait_for_order(s))
            .unwrap_or_else(PoisonError::into_inner);
        if self.must_wait_for_order(&state) {
            return Err(QueueError::Timeout(timeout));
        }
        Ok(self.pop(&mut state))
    }

    pub fn stats(&self) -> QueueStats {
        let state = self.lock();
        QueueStats {
            current_size: state.pending.len(),
            handled: state.handled,
            expected_total: self.expected_total,
            capacity: self.capacity,
            next_number: state.next_number,
        }
    }

    /// True once every expected order has been handed to a cook
    pub fn is_complete(&self) -> bool {
        self.lock().handled >= self.expected_total
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn must_wait_for_order(&self, state: &QueueState<T>) -> bool {
        state.pending.is_empty() && state.handled < self.expected_total
    }

    fn push(&self, state: &mut QueueState<T>, order: Order<T>) -> u64 {
        let number = state.enqueue(order);
        // --- Negative-space assertion: capacity bound ---
        assert!(
            state.pending.len() <= self.capacity,
            "Queue holds {} orders, capacity is {}",
            state.pending.len(),
            self.capacity
        );
        self.order_available.notify_one();
        number
    }

    fn pop(&self, state: &mut QueueState<T>) -> Option<Order<T>> {
        // Orders beyond the expected total are never served.
        if state.handled >= self.expected_total {
            return None;
        }
        let order = state.dequeue()?;
        self.space_available.notify_one();
        if state.handled == self.expected_total {
            // Last order: every idle cook has to see the queue is done.
            self.order_available.notify_all();
        }
        Some(order)
    }
}
