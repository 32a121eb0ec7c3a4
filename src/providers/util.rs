use anyhow::{Result, anyhow};
use reqwest::Url;

const USER_AGENT: &str = concat!("fxconv/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
}

/// Appends `segments` to the path of `base_url`, percent-encoding each one.
///
/// Country names such as "United States" or "Côte d'Ivoire" end up as single
/// path segments.
pub fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base_url).map_err(|e| anyhow!("Invalid base URL {base_url}: {e}"))?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("Base URL cannot have path segments: {base_url}"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
