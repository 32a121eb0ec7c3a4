pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{Converter, load_catalog};
use crate::providers::exchange_rate_api::ExchangeRateApiProvider;
use crate::providers::rest_countries::RestCountriesProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub enum AppCommand {
    /// Interactive conversion session
    Session,
    /// One conversion, printed and discarded
    Convert {
        from: String,
        to: String,
        amount: String,
        json: bool,
    },
    /// Catalog entries suggested for a prefix
    Countries { prefix: Option<String> },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let env_key = std::env::var(crate::core::config::API_KEY_ENV).ok();
    run_command_with_env(command, config_path, env_key).await
}

/// Like [`run_command`], with the `FXCONV_API_KEY` value passed in instead
/// of read from the process environment.
pub async fn run_command_with_env(
    command: AppCommand,
    config_path: Option<&str>,
    env_api_key: Option<String>,
) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        countries_url = config.rest_countries_url(),
        rates_url = config.exchange_rate_url(),
        "Loaded config"
    );

    let api_key = config.exchange_rate_api_key(env_api_key);
    if api_key.is_none() {
        warn!(
            "No exchange rate API key configured; set {} or run `fxconv setup`",
            crate::core::config::API_KEY_ENV
        );
    }

    let directory = Arc::new(RestCountriesProvider::new(config.rest_countries_url()));
    let rates = Arc::new(ExchangeRateApiProvider::new(
        config.exchange_rate_url(),
        api_key,
    ));
    let mut converter = Converter::new(directory, rates);

    match command {
        AppCommand::Session => {
            let catalog = load_catalog(converter.directory()).await;
            cli::session::run(&catalog, &mut converter).await
        }
        AppCommand::Convert {
            from,
            to,
            amount,
            json,
        } => cli::convert::run(&mut converter, &from, &to, &amount, json).await,
        AppCommand::Countries { prefix } => {
            let catalog = load_catalog(converter.directory()).await;
            cli::countries::run(&catalog, prefix.as_deref())
        }
    }
}
