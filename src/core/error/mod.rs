use std::time::Duration;

use thiserror::Error;

/// Failure of a timed wait on the order queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The wait elapsed before its condition was met.
    #[error("timed out after {0:?} waiting on the order queue")]
    Timeout(Duration),
}

/// Error loading or validating a restaurant configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A count that must be positive was zero.
    #[error("`{0}` must be greater than zero")]
    ZeroField(&'static str),
    /// `customers * orders_per_customer` does not fit in a `u64`.
    #[error("{customers} customers x {orders_per_customer} orders overflows the order count")]
    TooManyOrders {
        customers: usize,
        orders_per_customer: usize,
    },
}

/// Error running a full kitchen session.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write order journal: {0}")]
    Io(#[from] std::io::Error),
    #[error("customer {0} panicked")]
    CustomerPanicked(usize),
    #[error("cook {0} panicked")]
    CookPanicked(usize),
    /// The restaurant handle was still shared when it was time to close.
    #[error("restaurant still referenced by another thread at close time")]
    StillShared,
}
