use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::util::{endpoint, http_client};
use crate::core::country::CountryDirectory;
use crate::core::currency::CurrencyInfo;

/// Country directory backed by the REST Countries v3.1 API.
pub struct RestCountriesProvider {
    base_url: String,
}

impl RestCountriesProvider {
    pub fn new(base_url: &str) -> Self {
        RestCountriesProvider {
            base_url: base_url.to_string(),
        }
    }

    async fn fetch_records(&self, url: reqwest::Url) -> Result<Vec<CountryRecord>> {
        debug!("Requesting country data from {}", url);

        let client = http_client()?;
        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} URL: {}", response.status(), url));
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse country response from {url}"))
    }
}

#[derive(Debug, Deserialize)]
struct CountryRecord {
    name: CountryName,
    // Kept as a JSON map so entries stay in the order the API lists them
    #[serde(default)]
    currencies: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct CountryName {
    common: String,
}

impl CountryRecord {
    fn first_currency(&self) -> Option<CurrencyInfo> {
        let (code, details) = self.currencies.as_ref()?.iter().next()?;
        let symbol = details
            .get("symbol")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Some(CurrencyInfo::new(code.as_str(), symbol))
    }
}

#[async_trait]
impl CountryDirectory for RestCountriesProvider {
    async fn list_countries(&self) -> Result<Vec<String>> {
        let mut url = endpoint(&self.base_url, &["v3.1", "all"])?;
        url.query_pairs_mut().append_pair("fields", "name");

        let records = self.fetch_records(url).await?;
        Ok(records.into_iter().map(|r| r.name.common).collect())
    }

    #[instrument(name = "CurrencyLookup", skip(self), fields(country = %country))]
    async fn lookup_currency(&self, country: &str) -> Result<CurrencyInfo> {
        let url = endpoint(&self.base_url, &["v3.1", "name", country])?;
        let records = self.fetch_records(url).await?;

        let record = records
            .first()
            .ok_or_else(|| anyhow!("No country data found for: {}", country))?;
        let currency = record
            .first_currency()
            .ok_or_else(|| anyhow!("No currency listed for: {}", record.name.common))?;

        debug!(code = %currency.code, symbol = %currency.symbol, "Resolved currency");
        Ok(currency)
    }
}
