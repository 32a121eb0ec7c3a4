//! Country directory abstraction and catalog loading

use crate::core::currency::CurrencyInfo;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

/// Countries offered when the directory service cannot be reached.
pub const FALLBACK_COUNTRIES: [&str; 6] = [
    "Bangladesh",
    "United States",
    "India",
    "Japan",
    "United Kingdom",
    "Canada",
];

#[async_trait]
pub trait CountryDirectory: Send + Sync {
    /// Common names of every known country.
    async fn list_countries(&self) -> Result<Vec<String>>;

    /// Currency of the named country. Countries with several currencies
    /// resolve to the first one listed by the directory.
    async fn lookup_currency(&self, country: &str) -> Result<CurrencyInfo>;
}

/// Loads the country catalog, sorted case-insensitively.
///
/// Never returns an empty catalog: failures and empty responses fall back to
/// [`FALLBACK_COUNTRIES`].
pub async fn load_catalog(directory: &dyn CountryDirectory) -> Vec<String> {
    let mut names = match directory.list_countries().await {
        Ok(names) if !names.is_empty() => {
            info!("Fetched {} countries", names.len());
            names
        }
        Ok(_) => {
            warn!("Country directory returned no countries, using fallback list");
            fallback_catalog()
        }
        Err(e) => {
            warn!(error = %e, "Failed to fetch countries, using fallback list");
            fallback_catalog()
        }
    };
    names.sort_by_cached_key(|name| name.to_lowercase());
    names
}

fn fallback_catalog() -> Vec<String> {
    FALLBACK_COUNTRIES.iter().map(|c| c.to_string()).collect()
}
