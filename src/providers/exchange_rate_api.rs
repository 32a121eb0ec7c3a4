use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::util::{endpoint, http_client};
use crate::core::currency::CurrencyRateProvider;

/// Pair conversion rates from ExchangeRate-API v6.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: Option<String>,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.to_string(),
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PairResponse {
    result: String,
    conversion_rate: Option<f64>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRateApiProvider {
    #[instrument(name = "PairRateFetch", skip(self))]
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        let pair = format!("{from}/{to}");
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("No exchange rate API key configured"))?;

        let url = endpoint(&self.base_url, &[api_key, "pair", from, to])?;
        // Keep the key out of the logs
        debug!("Requesting conversion rate for {}", pair);

        let client = http_client()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for currency pair: {}", e.without_url(), pair))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency pair: {}",
                response.status(),
                pair
            ));
        }

        let text = response.text().await?;
        let data: PairResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", pair, e))?;

        if data.result != "success" {
            return Err(anyhow!(
                "Rate service returned '{}' ({}) for currency pair: {}",
                data.result,
                data.error_type.as_deref().unwrap_or("unknown error"),
                pair
            ));
        }

        match data.conversion_rate {
            Some(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
            _ => Err(anyhow!("No valid rate found for currency pair: {}", pair)),
        }
    }
}
