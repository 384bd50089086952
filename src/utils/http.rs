// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::StatusCode;

use crate::error::Result;
use crate::models::SearchConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &SearchConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a URL and return the status code with the raw body.
///
/// The status is not checked here. Transport errors are stripped of their
/// URL because the query string carries the API key.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<(StatusCode, String)> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(reqwest::Error::without_url)?;
    let status = response.status();
    let text = response.text().await.map_err(reqwest::Error::without_url)?;
    Ok((status, text))
}
