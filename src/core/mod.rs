//! Core business logic abstractions

pub mod autocomplete;
pub mod config;
pub mod converter;
pub mod country;
pub mod currency;
pub mod history;
pub mod log;

// Re-export main types for cleaner imports
pub use autocomplete::{AutocompleteField, AutocompleteIndex, InputKey};
pub use converter::{ConversionError, Converter};
pub use country::{CountryDirectory, load_catalog};
pub use currency::{CurrencyInfo, CurrencyRateProvider};
pub use history::{ConversionRecord, History};
