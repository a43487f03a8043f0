use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// Restaurant sizing for one kitchen session.
///
/// Missing fields in a config file fall back to the defaults below.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantConfig {
    /// Maximum number of orders waiting at once
    pub capacity: usize,
    pub customers: usize,
    pub cooks: usize,
    pub orders_per_customer: usize,
    /// Where to append the order journal as NDJSON
    pub journal_path: Option<PathBuf>,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            customers: 90,
            cooks: 10,
            orders_per_customer: 3,
            journal_path: None,
        }
    }
}

impl RestaurantConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            ("capacity", self.capacity),
            ("customers", self.customers),
            ("cooks", self.cooks),
            ("orders_per_customer", self.orders_per_customer),
        ];
        if let Some((name, _)) = counts.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroField(*name));
        }
        self.checked_expected_orders()
            .map(|_| ())
            .ok_or(ConfigError::TooManyOrders {
                customers: self.customers,
                orders_per_customer: self.orders_per_customer,
            })
    }

    /// Total number of orders the customers will place, saturating at
    /// `u64::MAX`; [`validate`](Self::validate) rejects totals that overflow
    pub fn expected_orders(&self) -> u64 {
        self.checked_expected_orders().unwrap_or(u64::MAX)
    }

    fn checked_expected_orders(&self) -> Option<u64> {
        let customers = u64::try_from(self.customers).ok()?;
        let per_customer = u64::try_from(self.orders_per_customer).ok()?;
        customers.checked_mul(per_customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_expect_270_orders() {
        let config = RestaurantConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.expected_orders(), 270);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = RestaurantConfig::from_json_str(r#"{ "capacity": 4, "cooks": 2 }"#).unwrap();
        assert_eq!(config.capacity, 4);
        assert_eq!(config.cooks, 2);
        assert_eq!(config.customers, 90);
        assert_eq!(config.journal_path, None);
    }

    #[test]
    fn zero_counts_are_rejected() {
        let err = RestaurantConfig::from_json_str(r#"{ "orders_per_customer": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroField("orders_per_customer")));
    }

    #[test]
    fn overflowing_order_total_is_rejected() {
        let config = RestaurantConfig {
            customers: usize::MAX / 2,
            orders_per_customer: 4,
            ..RestaurantConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TooManyOrders { orders_per_customer: 4, .. }
        ));
        assert_eq!(config.expected_orders(), u64::MAX);

        let largest = RestaurantConfig {
            customers: usize::MAX,
            orders_per_customer: 1,
            ..RestaurantConfig::default()
        };
        assert!(largest.validate().is_ok());
        assert_eq!(largest.expected_orders(), usize::MAX as u64);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = RestaurantConfig::from_json_str("{ capacity: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
