// src/services/search.rs

//! Search API client.
//!
//! Issues shopping-mode and image-mode queries against a ValueSERP-style
//! endpoint and returns the raw JSON document.

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::SearchConfig;
use crate::utils::http::{create_async_client, fetch_text};

/// Kind of search to run upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Commerce listings
    Shopping,
    /// Image results
    Images,
}

impl SearchMode {
    /// Value of the upstream `tbm` parameter.
    pub fn tbm(self) -> &'static str {
        match self {
            Self::Shopping => "shop",
            Self::Images => "isch",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shopping => f.write_str("shopping"),
            Self::Images => f.write_str("images"),
        }
    }
}

/// Anything that can answer a search query with a raw JSON document.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str, mode: SearchMode) -> Result<Value>;
}

/// HTTP client for the search API.
///
/// The API key travels in the query string; `Debug` output redacts it.
#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    base_url: Url,
    api_key: String,
    country: String,
}

impl SearchClient {
    /// Build a client; fails when no API key is configured.
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::config("API Key is not configured."))?;

        Ok(Self {
            client: create_async_client(config)?,
            base_url: Url::parse(&config.base_url)?,
            api_key: api_key.to_string(),
            country: config.country.clone(),
        })
    }

    /// Full request URL for a query.
    pub fn request_url(&self, query: &str, mode: SearchMode) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("q", query)
            .append_pair("gl", &self.country)
            .append_pair("tbm", mode.tbm())
            .append_pair("output", "json");
        url
    }
}

impl fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("country", &self.country)
            .finish()
    }
}

#[async_trait]
impl SearchBackend for SearchClient {
    async fn search(&self, query: &str, mode: SearchMode) -> Result<Value> {
        log::debug!("Running {mode} search for '{query}'");
        let url = self.request_url(query, mode);
        let (status, body) = fetch_text(&self.client, url.as_str()).await?;
        parse_response(status, &body)
    }
}

/// Interpret an upstream answer.
///
/// A `request_info` failure wins over the HTTP status, so a 401 carrying
/// "Invalid api_key" surfaces as that API error.
pub fn parse_response(status: StatusCode, body: &str) -> Result<Value> {
    let doc: Value = match serde_json::from_str(body) {
        Ok(doc) => doc,
        Err(_) if !status.is_success() => return Err(AppError::Status(status.as_u16())),
        Err(e) => return Err(e.into()),
    };

    check_request_info(&doc)?;
    if !status.is_success() {
        return Err(AppError::Status(status.as_u16()));
    }
    Ok(doc)
}

/// Reject documents in which the API reports `request_info.success == false`.
pub fn check_request_info(doc: &Value) -> Result<()> {
    if doc.pointer("/request_info/success") == Some(&Value::Bool(false)) {
        let message = doc
            .pointer("/request_info/message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(AppError::upstream(message));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config_with_key(key: Option<&str>) -> SearchConfig {
        SearchConfig {
            api_key: key.map(str::to_string),
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let err = SearchClient::new(&config_with_key(None)).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = SearchClient::new(&config_with_key(Some("  "))).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_request_url_encodes_query() {
        let client = SearchClient::new(&config_with_key(Some("k3y"))).unwrap();
        let url = client.request_url("Sony WH-1000XM5 & case", SearchMode::Shopping);

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(url.host_str(), Some("api.valueserp.com"));
        assert_eq!(
            pairs,
            vec![
                ("api_key".to_string(), "k3y".to_string()),
                ("q".to_string(), "Sony WH-1000XM5 & case".to_string()),
                ("gl".to_string(), "gb".to_string()),
                ("tbm".to_string(), "shop".to_string()),
                ("output".to_string(), "json".to_string()),
            ]
        );
    }

    #[test]
    fn test_image_mode_parameter() {
        let client = SearchClient::new(&config_with_key(Some("k"))).unwrap();
        let url = client.request_url("lamp", SearchMode::Images);
        assert!(url.as_str().contains("tbm=isch"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = SearchClient::new(&config_with_key(Some("SECRETKEY123"))).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("SECRETKEY123"));
    }

    #[tokio::test]
    async fn test_transport_error_hides_api_key() {
        let config = SearchConfig {
            base_url: "http://127.0.0.1:9/search".to_string(),
            api_key: Some("SECRETKEY123".to_string()),
            timeout_secs: 5,
            ..SearchConfig::default()
        };
        let client = SearchClient::new(&config).unwrap();

        let err = client.search("widget", SearchMode::Images).await.unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
        assert!(!err.to_string().contains("SECRETKEY123"));
        assert!(!format!("{err:?}").contains("SECRETKEY123"));
    }

    #[test]
    fn test_error_status_reports_request_info_message() {
        let body = r#"{"request_info":{"success":false,"message":"Invalid api_key"}}"#;
        let err = parse_response(StatusCode::UNAUTHORIZED, body).unwrap_err();
        assert_eq!(err.to_string(), "API Error: Invalid api_key");

        let response = crate::api::ApiResponse::from_error(&err);
        assert_eq!(response.status, 500);
        assert_eq!(response.body["error"], "API Error: Invalid api_key");
    }

    #[test]
    fn test_error_status_without_json_body() {
        let err = parse_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, AppError::Status(502)));

        let err = parse_response(StatusCode::INTERNAL_SERVER_ERROR, "{}").unwrap_err();
        assert!(matches!(err, AppError::Status(500)));
    }

    #[test]
    fn test_success_status_parses_document() {
        let doc = parse_response(StatusCode::OK, r#"{"shopping_results":[]}"#).unwrap();
        assert_eq!(doc["shopping_results"], json!([]));

        let err = parse_response(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn test_check_request_info() {
        assert!(check_request_info(&json!({})).is_ok());
        assert!(check_request_info(&json!({ "request_info": { "success": true } })).is_ok());

        let err = check_request_info(&json!({
            "request_info": { "success": false, "message": "Invalid api_key" }
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "API Error: Invalid api_key");
    }
}
