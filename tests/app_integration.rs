use std::sync::Arc;
use tracing::{error, info};

use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use fxconv::cli::countries::write_matches;
use fxconv::core::{ConversionError, Converter, load_catalog};
use fxconv::providers::exchange_rate_api::ExchangeRateApiProvider;
use fxconv::providers::rest_countries::RestCountriesProvider;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const API_KEY: &str = "test-key";

    pub async fn mount_country(server: &MockServer, country: &str, code: &str, symbol: &str) {
        let body = format!(
            r#"[{{"name": {{"common": "{country}"}}, "currencies": {{"{code}": {{"name": "{code}", "symbol": "{symbol}"}}}}}}]"#
        );
        Mock::given(method("GET"))
            .and(path(format!("/v3.1/name/{}", country.replace(' ', "%20"))))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    pub async fn mount_rate(server: &MockServer, from: &str, to: &str, rate: f64) {
        let body = format!(r#"{{"result": "success", "conversion_rate": {rate}}}"#);
        Mock::given(method("GET"))
            .and(path(format!("/v6/{API_KEY}/pair/{from}/{to}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    pub async fn create_mock_server() -> MockServer {
        let server = MockServer::start().await;
        mount_country(&server, "United States", "USD", "$").await;
        mount_country(&server, "Japan", "JPY", "¥").await;
        mount_country(&server, "Bangladesh", "BDT", "৳").await;
        mount_rate(&server, "USD", "JPY", 150.25).await;
        mount_rate(&server, "USD", "BDT", 0.5).await;
        server
    }

    pub fn write_config(server: &MockServer) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
            providers:
              rest_countries:
                base_url: {uri}
              exchange_rate:
                base_url: {uri}/v6
                api_key: {API_KEY}
            "#,
            uri = server.uri()
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }
}

fn converter_for(server: &wiremock::MockServer) -> Converter {
    let directory = Arc::new(RestCountriesProvider::new(&server.uri()));
    let rates = Arc::new(ExchangeRateApiProvider::new(
        &format!("{}/v6", server.uri()),
        Some(test_utils::API_KEY.to_string()),
    ));
    Converter::new(directory, rates)
}

#[test_log::test(tokio::test)]
async fn test_conversion_against_mock_services() {
    let server = test_utils::create_mock_server().await;
    let mut converter = converter_for(&server);

    let record = converter
        .convert("United States", "Bangladesh", "100")
        .await
        .expect("conversion should succeed");

    assert_eq!(record.target_amount, 50.0);
    assert_eq!(record.to_string(), "100.0 USD ($) = 50.00 BDT (৳)");
    assert_eq!(converter.history().len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_unknown_country_against_mock_services() {
    let server = test_utils::create_mock_server().await;
    let mut converter = converter_for(&server);

    // Unmatched requests get a 404 from the mock server
    let result = converter.convert("Atlantis", "Japan", "10").await;
    assert_eq!(
        result,
        Err(ConversionError::CurrencyNotFound {
            country: "Atlantis".to_string()
        })
    );
    assert!(converter.history().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_missing_pair_is_rate_unavailable() {
    let server = test_utils::create_mock_server().await;
    let mut converter = converter_for(&server);

    let result = converter.convert("Japan", "United States", "10").await;
    assert_eq!(
        result,
        Err(ConversionError::RateUnavailable {
            from: "JPY".to_string(),
            to: "USD".to_string()
        })
    );
}

#[test_log::test(tokio::test)]
async fn test_history_window_after_twelve_conversions() {
    let server = test_utils::create_mock_server().await;
    let mut converter = converter_for(&server);

    for amount in 1..=12 {
        converter
            .convert("United States", "Japan", &amount.to_string())
            .await
            .expect("conversion should succeed");
    }

    let history = converter.history();
    assert_eq!(history.len(), 12);
    let visible: Vec<f64> = history
        .visible_entries()
        .iter()
        .map(|r| r.source_amount)
        .collect();
    assert_eq!(visible, (3..=12).map(f64::from).collect::<Vec<_>>());
}

#[test_log::test(tokio::test)]
async fn test_catalog_falls_back_when_directory_is_down() {
    // Nothing mounted: every request answers 404
    let server = wiremock::MockServer::start().await;
    let directory = RestCountriesProvider::new(&server.uri());

    let catalog = load_catalog(&directory).await;
    assert_eq!(
        catalog,
        [
            "Bangladesh",
            "Canada",
            "India",
            "Japan",
            "United Kingdom",
            "United States"
        ]
    );
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_convert_command() {
    let server = test_utils::create_mock_server().await;
    let config_file = test_utils::write_config(&server);

    let result = fxconv::run_command_with_env(
        fxconv::AppCommand::Convert {
            from: "United States".to_string(),
            to: "Japan".to_string(),
            amount: "12.5".to_string(),
            json: false,
        },
        Some(config_file.path().to_str().unwrap()),
        None,
    )
    .await;
    assert!(
        result.is_ok(),
        "Convert command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_convert_command_reports_invalid_amount() {
    let server = test_utils::create_mock_server().await;
    let config_file = test_utils::write_config(&server);

    let result = fxconv::run_command_with_env(
        fxconv::AppCommand::Convert {
            from: "United States".to_string(),
            to: "Japan".to_string(),
            amount: "abc".to_string(),
            json: true,
        },
        Some(config_file.path().to_str().unwrap()),
        None,
    )
    .await;

    let err = result.expect_err("invalid amount should fail");
    assert_eq!(err.to_string(), "Please enter a valid number for amount.");
}

#[test_log::test(tokio::test)]
async fn test_env_api_key_overrides_config_file() {
    let server = test_utils::create_mock_server().await;
    let config_file = test_utils::write_config(&server);
    // Only the environment key's path answers; the config file's key would 404
    Mock::given(method("GET"))
        .and(path("/v6/env-key/pair/USD/BDT"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"result": "success", "conversion_rate": 0.5}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let convert = || fxconv::AppCommand::Convert {
        from: "United States".to_string(),
        to: "Bangladesh".to_string(),
        amount: "10".to_string(),
        json: false,
    };
    let config_path = config_file.path().to_str().unwrap();

    let result =
        fxconv::run_command_with_env(convert(), Some(config_path), Some("env-key".to_string()))
            .await;
    assert!(result.is_ok(), "Convert command failed with: {:?}", result.err());

    // A blank environment value falls back to the configured key
    let result =
        fxconv::run_command_with_env(convert(), Some(config_path), Some("  ".to_string())).await;
    assert!(result.is_ok(), "Convert command failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_countries_command() {
    let server = test_utils::create_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[
                {"name": {"common": "United States"}},
                {"name": {"common": "Uganda"}},
                {"name": {"common": "United Kingdom"}},
                {"name": {"common": "Peru"}}
            ]"#,
        ))
        .mount(&server)
        .await;
    let config_file = test_utils::write_config(&server);

    let result = fxconv::run_command_with_env(
        fxconv::AppCommand::Countries {
            prefix: Some("uni".to_string()),
        },
        Some(config_file.path().to_str().unwrap()),
        None,
    )
    .await;
    assert!(result.is_ok(), "Countries command failed with: {:?}", result.err());

    let catalog = load_catalog(&RestCountriesProvider::new(&server.uri())).await;
    let mut out = Vec::new();
    write_matches(&mut out, &catalog, Some("uni")).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "United Kingdom\nUnited States\n"
    );
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("absent.yaml");

    let result = fxconv::run_command_with_env(
        fxconv::AppCommand::Countries { prefix: None },
        Some(missing.to_str().unwrap()),
        None,
    )
    .await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
#[ignore = "calls the live restcountries.com API"]
async fn test_real_rest_countries_api() {
    use fxconv::core::CountryDirectory;

    let provider = RestCountriesProvider::new("https://restcountries.com");

    let country = "Japan";
    info!(?country, "Fetching currency from REST Countries");

    match provider.lookup_currency(country).await {
        Ok(currency) => {
            info!(?currency, "Received currency");
            assert_eq!(currency.code, "JPY");
        }
        Err(e) => {
            error!("Currency lookup failed: {e}\n{e:?}");
            panic!("Currency lookup failed: {e}");
        }
    }
}
