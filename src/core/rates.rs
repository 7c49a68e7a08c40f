//! Exchange rate abstractions and core types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;

/// The base currency every fetched rate is quoted against.
pub const BASE_CURRENCY: &str = "USD";

/// A snapshot of rates quoted against a single base currency.
///
/// The service normalizes to USD = 1.0, so converting between two
/// arbitrary codes is a ratio of their base-relative rates.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<String, f64>,
    last_updated: Option<DateTime<Utc>>,
}

impl RateTable {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self {
            rates,
            last_updated: None,
        }
    }

    pub fn with_last_updated(mut self, at: DateTime<Utc>) -> Self {
        self.last_updated = Some(at);
        self
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// When the service last refreshed this table, if it said.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(String, f64)> for RateTable {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Failures while fetching a rate table from the service.
#[derive(Debug, Error)]
pub enum RateError {
    /// Non-2xx response; the body is not read.
    #[error("HTTP error: {status}")]
    Http { status: reqwest::StatusCode },

    /// The request never completed (connect, DNS, timeout, ...).
    #[error("rate request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The body was not the JSON shape the service documents.
    #[error("could not parse rate response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch the latest rate table quoted against `base`.
    async fn latest(&self, base: &str) -> Result<RateTable, RateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_table_lookup() {
        let table: RateTable = [("USD".to_string(), 1.0), ("INR".to_string(), 83.0)]
            .into_iter()
            .collect();

        assert_eq!(table.rate("USD"), Some(1.0));
        assert_eq!(table.rate("INR"), Some(83.0));
        assert_eq!(table.rate("EUR"), None);
        assert_eq!(table.rate("inr"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_rate_table_last_updated() {
        let table = RateTable::new(HashMap::new());
        assert!(table.last_updated().is_none());

        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let table = table.with_last_updated(at);
        assert_eq!(table.last_updated(), Some(at));
    }

    #[test]
    fn test_http_error_message_carries_status() {
        let err = RateError::Http {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(err.to_string(), "HTTP error: 500 Internal Server Error");
    }
}
