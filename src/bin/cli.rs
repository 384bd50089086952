//! Product data CLI
//!
//! Local execution entry point. For AWS Lambda, use `product-data-lambda`.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use product_data::{
    api::ApiResponse,
    error::{AppError, Result},
    models::{Config, NormalizedResult},
    normalizer::Normalizer,
    services::{ProductLookup, SearchClient},
};
use serde_json::Value;

/// product-data - product image and deal finder
#[derive(Parser, Debug)]
#[command(
    name = "product-data",
    version,
    about = "Finds a product image and the best deals through a search API"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a product through the search API
    Lookup {
        /// Product name to search for
        product: String,
    },

    /// Normalize saved search API responses without network access
    Normalize {
        /// Shopping-mode response (JSON file)
        #[arg(long)]
        shopping: PathBuf,

        /// Image-mode response (JSON file)
        #[arg(long)]
        images: Option<PathBuf>,

        /// Query used for log messages
        #[arg(long, default_value = "")]
        query: String,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

async fn read_json(path: &Path) -> Result<Value> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Print the response body; non-success responses become an error exit.
fn report(result: Result<NormalizedResult>) -> Result<()> {
    let response = ApiResponse::from_lookup(&result);
    println!("{}", serde_json::to_string_pretty(&response.body)?);
    if response.is_success() {
        return Ok(());
    }
    result.and_then(|_| Err(AppError::Status(response.status)))
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    config.apply_env();

    match cli.command {
        Command::Lookup { product } => {
            let client = SearchClient::new(&config.search)?;
            let lookup = ProductLookup::new(client, Normalizer::new(config.normalizer.clone()));

            log::info!("Looking up '{}'...", product);
            report(lookup.lookup(&product).await)?;
        }

        Command::Normalize {
            shopping,
            images,
            query,
        } => {
            let shopping_doc = read_json(&shopping).await?;
            let images_doc = match images {
                Some(path) => Some(read_json(&path).await?),
                None => None,
            };

            let normalizer = Normalizer::new(config.normalizer.clone());
            report(normalizer.normalize(&shopping_doc, images_doc.as_ref(), &query))?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            if config.search.api_key.is_none() {
                log::warn!("No API key configured; set VALUESERP_API_KEY before running lookups");
            }
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}
