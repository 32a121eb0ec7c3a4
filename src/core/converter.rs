//! Conversion orchestration: validate, resolve currencies, fetch the rate

use crate::core::country::CountryDirectory;
use crate::core::currency::{CurrencyInfo, CurrencyRateProvider};
use crate::core::history::{ConversionRecord, History};
use chrono::Local;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// User-facing conversion failures.
#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Could not find currency information for {country}")]
    CurrencyNotFound { country: String },
    #[error("Failed to retrieve conversion rate from {from} to {to}. Try again later.")]
    RateUnavailable { from: String, to: String },
}

/// Validated form input.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub from_country: String,
    pub to_country: String,
    pub amount: f64,
}

impl ConversionRequest {
    pub fn parse(
        from_country: &str,
        to_country: &str,
        amount_text: &str,
    ) -> Result<Self, ConversionError> {
        let from_country = from_country.trim();
        let to_country = to_country.trim();
        let amount_text = amount_text.trim();

        if from_country.is_empty() || to_country.is_empty() || amount_text.is_empty() {
            return Err(ConversionError::InvalidInput(
                "Please fill all fields before converting.".to_string(),
            ));
        }

        let amount = amount_text
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
            .ok_or_else(|| {
                ConversionError::InvalidInput(
                    "Please enter a valid number for amount.".to_string(),
                )
            })?;

        Ok(Self {
            from_country: from_country.to_string(),
            to_country: to_country.to_string(),
            amount,
        })
    }
}

/// Runs conversions for one session and owns its history.
///
/// `convert` borrows the converter mutably, so a session can never have two
/// conversions in flight.
pub struct Converter {
    directory: Arc<dyn CountryDirectory>,
    rates: Arc<dyn CurrencyRateProvider>,
    history: History,
}

impl Converter {
    pub fn new(directory: Arc<dyn CountryDirectory>, rates: Arc<dyn CurrencyRateProvider>) -> Self {
        Self {
            directory,
            rates,
            history: History::new(),
        }
    }

    pub fn directory(&self) -> &dyn CountryDirectory {
        self.directory.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    #[instrument(skip(self))]
    pub async fn convert(
        &mut self,
        from_country: &str,
        to_country: &str,
        amount_text: &str,
    ) -> Result<ConversionRecord, ConversionError> {
        let request = ConversionRequest::parse(from_country, to_country, amount_text)?;

        let source = self.resolve_currency(&request.from_country).await?;
        let target = self.resolve_currency(&request.to_country).await?;

        let rate = self
            .rates
            .get_rate(&source.code, &target.code)
            .await
            .map_err(|e| {
                warn!(error = %e, from = %source.code, to = %target.code, "Rate lookup failed");
                ConversionError::RateUnavailable {
                    from: source.code.clone(),
                    to: target.code.clone(),
                }
            })?;

        let record = ConversionRecord {
            target_amount: request.amount * rate,
            from_country: request.from_country,
            to_country: request.to_country,
            source_amount: request.amount,
            source,
            target,
            rate,
            converted_at: Local::now(),
        };
        debug!(%record, "Conversion complete");

        self.history.record(record.clone());
        Ok(record)
    }

    async fn resolve_currency(&self, country: &str) -> Result<CurrencyInfo, ConversionError> {
        self.directory.lookup_currency(country).await.map_err(|e| {
            warn!(error = %e, country, "Currency lookup failed");
            ConversionError::CurrencyNotFound {
                country: country.to_string(),
            }
        })
    }
}
