use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error, instrument};

use crate::core::rates::{RateError, RateProvider, RateTable};

// ExchangeRateApi implementation for RateProvider
pub struct ExchangeRateApi {
    base_url: String,
    api_key: String,
}

impl ExchangeRateApi {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        ExchangeRateApi {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    conversion_rates: HashMap<String, f64>,
    time_last_update_unix: Option<i64>,
}

#[async_trait]
impl RateProvider for ExchangeRateApi {
    #[instrument(name = "RatesFetch", skip(self), fields(base = %base))]
    async fn latest(&self, base: &str) -> Result<RateTable, RateError> {
        // The credential is part of the URL path, so log the base only.
        let url = format!("{}/v6/{}/latest/{}", self.base_url, self.api_key, base);
        debug!("Requesting latest {base} rates");

        let client = reqwest::Client::builder().user_agent("xfx/0.1").build()?;
        let response = client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(RateError::Http {
                status: response.status(),
            });
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text).map_err(|e| {
            error!(
                error = ?e,
                response = %text,
                "Failed to parse rate response"
            );
            RateError::Parse(e)
        })?;

        let mut table = RateTable::new(data.conversion_rates);
        if let Some(at) = data
            .time_last_update_unix
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
        {
            table = table.with_last_updated(at);
        }
        Ok(table)
    }
}
