// src/normalizer/mod.rs

//! Response normalization.
//!
//! Maps an arbitrary search-API payload onto the stable
//! `{ imageUrl, deals }` contract by walking two ordered fallback chains:
//!
//! - deal stages: the first stage that yields at least one deal wins
//! - image stages: the first stage that yields a URL wins, otherwise the
//!   configured placeholder is used
//!
//! Both chains come from [`NormalizerConfig`], so the order can be tuned
//! without touching code.

mod deals;
mod images;
mod scan;

pub use scan::{ImageUrlMatcher, find_image_url};

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Deal, NormalizedResult, NormalizerConfig};
use images::ImageSources;

/// Turns raw search responses into a [`NormalizedResult`].
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: NormalizerConfig,
    matcher: ImageUrlMatcher,
}

impl Normalizer {
    /// Create a normalizer from its configuration.
    pub fn new(config: NormalizerConfig) -> Self {
        let matcher = ImageUrlMatcher::new(&config.secure_prefix, &config.image_extensions);
        Self { config, matcher }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize a shopping-mode response and an optional image-mode response.
    ///
    /// Fails with [`AppError::NotFound`] only when no deal and no image was
    /// located; partial data is a success.
    pub fn normalize(
        &self,
        shopping: &Value,
        image_doc: Option<&Value>,
        query: &str,
    ) -> Result<NormalizedResult> {
        let deals = self.find_deals(shopping, query);
        let image = self.find_image(shopping, image_doc, query);
        self.finish(deals, image, query)
    }

    /// Build the result from already extracted deals and image.
    ///
    /// Applies the placeholder when `image` is `None`, or fails with
    /// [`AppError::NotFound`] when there are no deals either.
    pub fn finish(
        &self,
        deals: Vec<Deal>,
        image: Option<String>,
        query: &str,
    ) -> Result<NormalizedResult> {
        match image {
            Some(image_url) => Ok(NormalizedResult { image_url, deals }),
            None if deals.is_empty() => {
                log::info!("No deals and no image for '{query}'");
                Err(AppError::not_found(query))
            }
            None => {
                log::info!("No image for '{query}'. Using placeholder.");
                Ok(NormalizedResult {
                    image_url: self.config.placeholder_url.clone(),
                    deals,
                })
            }
        }
    }

    /// Run the deal stages in order; the first non-empty list wins.
    pub fn find_deals(&self, shopping: &Value, query: &str) -> Vec<Deal> {
        for &stage in &self.config.deal_stages {
            let found = deals::extract(stage, shopping);
            if !found.is_empty() {
                log::debug!("{} deal(s) for '{query}' from {stage}", found.len());
                return found;
            }
        }
        Vec::new()
    }

    /// Run the image stages in order; the first URL wins.
    ///
    /// Returns `None` when every stage came up empty; the placeholder is only
    /// applied by [`Normalizer::normalize`].
    pub fn find_image(
        &self,
        shopping: &Value,
        image_doc: Option<&Value>,
        query: &str,
    ) -> Option<String> {
        let sources = ImageSources {
            shopping,
            image_doc,
            matcher: &self.matcher,
            secure_prefix: &self.config.secure_prefix,
        };

        self.config.image_stages.iter().find_map(|&stage| {
            let url = images::extract(stage, &sources)?;
            log::debug!("Image for '{query}' from {stage}: {url}");
            Some(url)
        })
    }

    /// Whether an image-mode document can ever be consulted.
    pub fn uses_image_search(&self) -> bool {
        self.config
            .image_stages
            .iter()
            .any(|stage| stage.needs_image_document())
    }

    /// Image from the stages that only read the shopping document.
    pub fn find_shopping_image(&self, shopping: &Value, query: &str) -> Option<String> {
        self.find_image(shopping, None, query)
    }

    /// Image from the stages that only read an image-mode document.
    pub fn find_search_image(&self, image_doc: &Value, query: &str) -> Option<String> {
        let sources = ImageSources {
            shopping: &Value::Null,
            image_doc: Some(image_doc),
            matcher: &self.matcher,
            secure_prefix: &self.config.secure_prefix,
        };

        self.config
            .image_stages
            .iter()
            .filter(|stage| stage.needs_image_document())
            .find_map(|&stage| {
                let url = images::extract(stage, &sources)?;
                log::debug!("Image for '{query}' from {stage}: {url}");
                Some(url)
            })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}
