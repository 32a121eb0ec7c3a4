use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_REST_COUNTRIES_URL: &str = "https://restcountries.com";
pub const DEFAULT_EXCHANGE_RATE_URL: &str = "https://v6.exchangerate-api.com/v6";

/// Environment variable overriding the configured exchange rate API key.
pub const API_KEY_ENV: &str = "FXCONV_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RestCountriesConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub rest_countries: Option<RestCountriesConfig>,
    pub exchange_rate: Option<ExchangeRateConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            rest_countries: Some(RestCountriesConfig {
                base_url: DEFAULT_REST_COUNTRIES_URL.to_string(),
            }),
            exchange_rate: Some(ExchangeRateConfig {
                base_url: DEFAULT_EXCHANGE_RATE_URL.to_string(),
                api_key: None,
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    /// Loads the config from the default location, or defaults if there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxconv", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn rest_countries_url(&self) -> &str {
        self.providers
            .rest_countries
            .as_ref()
            .map_or(DEFAULT_REST_COUNTRIES_URL, |p| &p.base_url)
    }

    pub fn exchange_rate_url(&self) -> &str {
        self.providers
            .exchange_rate
            .as_ref()
            .map_or(DEFAULT_EXCHANGE_RATE_URL, |p| &p.base_url)
    }

    /// API key from `env_key` (the value of [`API_KEY_ENV`]), falling back
    /// to the config file.
    pub fn exchange_rate_api_key(&self, env_key: Option<String>) -> Option<String> {
        resolve_api_key(env_key, self.configured_api_key())
    }

    fn configured_api_key(&self) -> Option<String> {
        self.providers
            .exchange_rate
            .as_ref()
            .and_then(|p| p.api_key.clone())
    }
}

/// The environment key wins over the configured one. Blank keys count as
/// missing.
pub fn resolve_api_key(env_key: Option<String>, configured: Option<String>) -> Option<String> {
    let non_blank = |key: &String| !key.trim().is_empty();
    env_key.filter(non_blank).or(configured.filter(non_blank))
}
