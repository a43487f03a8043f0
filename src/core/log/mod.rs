use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};
use crate::core::event::{EventOp, OrderEvent};
use serde::{Serialize, Deserialize};

static LOG_ID_COUNTER: AtomicU64 = AtomicU64::new(1);
/// Where an order stands in the journal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    Queued,
    Served,
}

/// Journal entry recording one order event
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEntry<T> {
    pub local_log_id: u64,
    pub restaurant: String,
    pub state: State,
    pub event: OrderEvent<T>,
}

impl <T: std::fmt::Debug> Display for LogEntry<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogEntry {{ local_log_id: {}, restaurant: {}, state: {:?}, op: {:?}, \
             actor: {}, order_number: {}, item: {:?} }}",
            self.local_log_id,
            self.restaurant,
            self.state,
            self.event.op,
            self.event.actor,
            self.event.order_number,
            self.event.item,
        )
    }
}


#[derive(Clone, Debug)]
/// Order journal storing every placement and service
pub struct Logger<T> {
    pub(crate) entries: Vec<LogEntry<T>>,
    restaurant: String,
}

impl<T: Clone> Logger<T> {
    pub fn new(restaurant: String) -> Self {
        Self { entries: Vec::new(), restaurant }
    }

    /// Record an order event
    pub fn log(&mut self, state: State, event: OrderEvent<T>) -> u64 {
        // --- Negative-space assertion: state must match operation ---
        match event.op {
            EventOp::Placed => assert!(
                state == State::Queued,
                "Placed orders must be journaled as Queued"
            ),
            EventOp::Served => assert!(
                state == State::Served,
                "Served orders must be journaled as Served"
            ),
        }

        let local_log_id = LOG_ID_COUNTER.fetch_add(1, Ordering::SeqCst);

        // --- Log entry insertion ---
        let before = self.entries.len();
        self.entries.push(LogEntry {
            local_log_id,
            restaurant: self.restaurant.clone(),
            state,
            event,
        });

        // --- Negative-space assertion: log length increased exactly by 1 ---
        assert_eq!(
            self.entries.len(),
            before + 1,
            "Logger must increase by exactly one entry"
        );
        local_log_id
    }

    /// Entries recorded after the given log id
    pub fn entries_since(&self, log_id: u64) -> Vec<LogEntry<T>> {
        self.entries
            .iter()
            .filter(|entry| entry.local_log_id > log_id)
            .cloned()
            .collect()
    }

    /// Entries touching one order number
    pub fn history_of(&self, order_number: u64) -> Vec<LogEntry<T>> {
        self.entries
            .iter()
            .filter(|entry| entry.event.order_number == order_number)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}


/// Append entries to `path` as NDJSON, one object per line
pub fn append_logs<T: Serialize>(
    log: &[LogEntry<T>],
    path: impl AsRef<Path>,
) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;
    let mut writer = BufWriter::new(file);

    for entry in log {
        serde_json::to_writer(&mut writer, entry)?;
        writeln!(writer)?; // one JSON object per line
    }
    writer.flush()
}
/// Thread-safe wrapper
pub type SafeLogger<T> = Arc<Mutex<Logger<T>>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_and_service_are_journaled_in_order() {
        let mut logger = Logger::new("bcb".to_string());
        let first = logger.log(State::Queued, OrderEvent::placed(4, 1, "BensHotDog"));
        logger.log(State::Served, OrderEvent::served(0, 4, 1, "BensHotDog"));

        assert_eq!(logger.len(), 2);
        let later = logger.entries_since(first);
        assert_eq!(later.len(), 1);
        assert_eq!(later[0].state, State::Served);
        assert_eq!(logger.history_of(1).len(), 2);
        assert!(logger.history_of(2).is_empty());
    }

    #[test]
    #[should_panic(expected = "must be journaled as Queued")]
    fn placement_cannot_be_journaled_as_served() {
        let mut logger = Logger::new("bcb".to_string());
        logger.log(State::Served, OrderEvent::placed(1, 1, "BensShake"));
    }

    #[test]
    fn display_names_the_actor() {
        let mut logger = Logger::new("bcb".to_string());
        logger.log(State::Queued, OrderEvent::placed(9, 3, "BensCake"));
        let line = logger.entries[0].to_string();
        assert!(line.contains("customer-9"));
        assert!(line.contains("order_number: 3"));
    }
}
