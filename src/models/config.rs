//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{DealStage, ImageStage};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream search API settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Fallback chain settings
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a key lookup.
    ///
    /// Recognised keys: `VALUESERP_API_KEY`, `SEARCH_BASE_URL`,
    /// `SEARCH_COUNTRY`, `SEARCH_TIMEOUT_SECS`. Unparseable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("VALUESERP_API_KEY") {
            self.search.api_key = Some(key);
        }

        if let Some(url) = lookup("SEARCH_BASE_URL") {
            self.search.base_url = url;
        }

        if let Some(country) = lookup("SEARCH_COUNTRY") {
            self.search.country = country;
        }

        if let Some(timeout) = lookup("SEARCH_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.search.timeout_secs = secs,
                Err(_) => log::warn!("Ignoring invalid SEARCH_TIMEOUT_SECS: {timeout}"),
            }
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.search.user_agent.trim().is_empty() {
            return Err(AppError::validation("search.user_agent is empty"));
        }
        if self.search.timeout_secs == 0 {
            return Err(AppError::validation("search.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.search.base_url)?;

        let normalizer = &self.normalizer;
        if normalizer.secure_prefix.is_empty() {
            return Err(AppError::validation("normalizer.secure_prefix is empty"));
        }
        if normalizer.image_extensions.is_empty() {
            return Err(AppError::validation("normalizer.image_extensions is empty"));
        }
        if normalizer.placeholder_url.trim().is_empty() {
            return Err(AppError::validation("normalizer.placeholder_url is empty"));
        }
        if has_duplicates(&normalizer.deal_stages) {
            return Err(AppError::validation("normalizer.deal_stages has duplicates"));
        }
        if has_duplicates(&normalizer.image_stages) {
            return Err(AppError::validation(
                "normalizer.image_stages has duplicates",
            ));
        }
        Ok(())
    }
}

fn has_duplicates<T: Eq + std::hash::Hash>(items: &[T]) -> bool {
    let mut seen = HashSet::new();
    !items.iter().all(|item| seen.insert(item))
}

/// Upstream search API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search endpoint
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// API key; usually supplied through `VALUESERP_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Country code passed as `gl`
    #[serde(default = "defaults::country")]
    pub country: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            api_key: None,
            country: defaults::country(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Fallback chain settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Deal sources, tried in order
    #[serde(default = "defaults::deal_stages")]
    pub deal_stages: Vec<DealStage>,

    /// Image sources, tried in order
    #[serde(default = "defaults::image_stages")]
    pub image_stages: Vec<ImageStage>,

    /// Scheme prefix an image URL must start with
    #[serde(default = "defaults::secure_prefix")]
    pub secure_prefix: String,

    /// File extensions the deep scan accepts
    #[serde(default = "defaults::image_extensions")]
    pub image_extensions: Vec<String>,

    /// URL returned when no image is found
    #[serde(default = "defaults::placeholder_url")]
    pub placeholder_url: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            deal_stages: defaults::deal_stages(),
            image_stages: defaults::image_stages(),
            secure_prefix: defaults::secure_prefix(),
            image_extensions: defaults::image_extensions(),
            placeholder_url: defaults::placeholder_url(),
        }
    }
}

mod defaults {
    use super::{DealStage, ImageStage};

    // Search defaults
    pub fn base_url() -> String {
        "https://api.valueserp.com/search".into()
    }
    pub fn country() -> String {
        "gb".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; product-data/0.1)".into()
    }

    // Normalizer defaults
    pub fn deal_stages() -> Vec<DealStage> {
        vec![DealStage::ShoppingOffers, DealStage::OrganicPrices]
    }
    pub fn image_stages() -> Vec<ImageStage> {
        vec![
            ImageStage::ShoppingImage,
            ImageStage::ProductMedia,
            ImageStage::Thumbnail,
            ImageStage::DeepScan,
            ImageStage::ImageSearch,
        ]
    }
    pub fn secure_prefix() -> String {
        "https://".into()
    }
    pub fn image_extensions() -> Vec<String> {
        vec![".jpg".into(), ".png".into(), ".webp".into()]
    }
    pub fn placeholder_url() -> String {
        r"https://placehold.co/600x400/f3f4f6/333333?text=Image\nNot\nFound".into()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.search.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.search.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_stages() {
        let mut config = Config::default();
        config.normalizer.image_stages = vec![ImageStage::DeepScan, ImageStage::DeepScan];
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[search]
country = "us"

[normalizer]
image_stages = ["deep_scan", "shopping_image"]
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.search.country, "us");
        assert_eq!(config.search.timeout_secs, 30);
        assert_eq!(
            config.normalizer.image_stages,
            vec![ImageStage::DeepScan, ImageStage::ShoppingImage]
        );
        assert_eq!(config.normalizer.deal_stages.len(), 2);
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let config = Config::load_or_default("/nonexistent/config.toml");
        assert_eq!(config.search.base_url, "https://api.valueserp.com/search");
        assert!(config.search.api_key.is_none());
    }

    #[test]
    fn overrides_replace_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("VALUESERP_API_KEY", "secret"),
            ("SEARCH_COUNTRY", "de"),
            ("SEARCH_TIMEOUT_SECS", "not-a-number"),
        ]);

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.search.api_key.as_deref(), Some("secret"));
        assert_eq!(config.search.country, "de");
        assert_eq!(config.search.timeout_secs, 30);
    }

    #[test]
    fn example_config_parses() {
        let config: Config = toml::from_str(include_str!("../../config.example.toml")).unwrap();
        assert!(config.validate().is_ok());
    }
}
