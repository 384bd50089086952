// src/lambda/mod.rs

//! AWS Lambda HTTP handler.
//!
//! Reads `productName` from the query string, runs the lookup and answers
//! with the JSON contract from [`crate::api`].

use std::sync::Arc;

use lambda_http::{Body, Error as LambdaError, Request, RequestExt, Response};
use tracing::{error, info, instrument, warn};

use crate::api::{self, ApiResponse};
use crate::error::{AppError, Result};
use crate::models::Config;
use crate::normalizer::Normalizer;
use crate::services::{ProductLookup, SearchBackend, SearchClient};

/// Lookup state built once per cold start.
///
/// A configuration failure is kept and reported on every request instead of
/// crashing the runtime.
pub struct AppState<B> {
    lookup: std::result::Result<ProductLookup<B>, String>,
}

impl<B: SearchBackend> AppState<B> {
    pub fn new(lookup: ProductLookup<B>) -> Self {
        Self { lookup: Ok(lookup) }
    }

    pub fn unconfigured(message: impl Into<String>) -> Self {
        Self {
            lookup: Err(message.into()),
        }
    }

    /// Produce the response for a (possibly missing) product name.
    pub async fn respond(&self, param: Option<&str>) -> ApiResponse {
        let lookup = match &self.lookup {
            Ok(lookup) => lookup,
            Err(message) => {
                error!("Lookup unavailable: {}", message);
                return ApiResponse::from_error(&AppError::config(message.as_str()));
            }
        };

        let Some(name) = api::product_name(param) else {
            warn!("Request without {}", api::PRODUCT_NAME_PARAM);
            return ApiResponse::missing_product();
        };

        let result = lookup.lookup(name).await;
        match &result {
            Ok(found) => info!("Found {} deal(s) for '{}'", found.deals.len(), name),
            Err(e) if e.is_not_found() => info!("No product data for '{}'", name),
            Err(e) => error!("Lookup failed for '{}': {}", name, e),
        }
        ApiResponse::from_lookup(&result)
    }
}

/// Build the state from configuration loaded at cold start.
pub fn build_state(config: &Config) -> AppState<SearchClient> {
    let built = config
        .validate()
        .and_then(|()| SearchClient::new(&config.search))
        .map(|client| ProductLookup::new(client, Normalizer::new(config.normalizer.clone())));

    match built {
        Ok(lookup) => AppState::new(lookup),
        Err(AppError::Config(message)) => AppState::unconfigured(message),
        Err(e) => AppState::unconfigured(e.to_string()),
    }
}

/// Load configuration for the Lambda environment.
///
/// The TOML path comes from `CONFIG_PATH` (default `config.toml`); defaults
/// are used when the file is absent, then environment overrides apply.
pub fn load_lambda_config() -> Result<Config> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let mut config = Config::load_or_default(&path);
    config.apply_env();
    Ok(config)
}

/// Main Lambda handler function.
#[instrument(skip(event, state))]
pub async fn handler<B: SearchBackend>(
    event: Request,
    state: Arc<AppState<B>>,
) -> std::result::Result<Response<Body>, LambdaError> {
    let params = event.query_string_parameters();
    let response = state.respond(params.first(api::PRODUCT_NAME_PARAM)).await;
    into_response(&response)
}

fn into_response(response: &ApiResponse) -> std::result::Result<Response<Body>, LambdaError> {
    let resp = Response::builder()
        .status(response.status)
        .header("content-type", "application/json")
        .body(response.body.to_string().into())
        .map_err(Box::new)?;
    Ok(resp)
}
