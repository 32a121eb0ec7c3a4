//! Session history of completed conversions

use crate::core::currency::CurrencyInfo;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Display;

/// Number of most recent conversions shown to the user.
pub const VISIBLE_HISTORY: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionRecord {
    pub from_country: String,
    pub to_country: String,
    pub source_amount: f64,
    pub source: CurrencyInfo,
    /// Full precision; rounded to cents only when displayed.
    pub target_amount: f64,
    pub target: CurrencyInfo,
    pub rate: f64,
    pub converted_at: DateTime<Local>,
}

/// `100.0 USD ($) = 14987.46 JPY (¥)`: the source amount always keeps a
/// decimal point, the target is rounded to cents.
impl Display for ConversionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} {} = {:.2} {}",
            self.source_amount, self.source, self.target_amount, self.target
        )
    }
}

/// Append-only log of conversions for the current session.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<ConversionRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: ConversionRecord) {
        self.records.push(entry);
    }

    /// The last [`VISIBLE_HISTORY`] records, oldest first.
    pub fn visible_entries(&self) -> &[ConversionRecord] {
        let start = self.records.len().saturating_sub(VISIBLE_HISTORY);
        &self.records[start..]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
