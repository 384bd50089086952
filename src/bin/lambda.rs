//! AWS Lambda entry point for the product lookup.
//!
//! Deploy with `cargo lambda build --release --features lambda`.
//!
//! ## Environment Variables
//!
//! - `VALUESERP_API_KEY`: search API key (required)
//! - `CONFIG_PATH`: optional TOML configuration (default: `config.toml`)
//! - `SEARCH_BASE_URL`, `SEARCH_COUNTRY`, `SEARCH_TIMEOUT_SECS`: overrides
//! - `RUST_LOG`: log level (e.g., `info`, `debug`)

use std::sync::Arc;

use lambda_http::{Error as LambdaError, service_fn};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_data::lambda::{build_state, handler, load_lambda_config};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Product data Lambda starting...");

    let config = load_lambda_config()?;
    let state = Arc::new(build_state(&config));

    lambda_http::run(service_fn(move |event| handler(event, Arc::clone(&state)))).await
}
