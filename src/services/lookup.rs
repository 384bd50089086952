// src/services/lookup.rs

//! Product lookup orchestration.
//!
//! Runs the shopping-mode search, falls back to a single image-mode search
//! only when the shopping document holds no image, then normalizes.

use crate::error::{AppError, Result};
use crate::models::NormalizedResult;
use crate::normalizer::Normalizer;
use crate::services::{SearchBackend, SearchMode};

/// Looks up a product's image and deals through a search backend.
pub struct ProductLookup<B> {
    backend: B,
    normalizer: Normalizer,
}

impl<B: SearchBackend> ProductLookup<B> {
    pub fn new(backend: B, normalizer: Normalizer) -> Self {
        Self {
            backend,
            normalizer,
        }
    }

    /// Look up a product by name.
    ///
    /// At most two upstream requests are made, sequentially.
    pub async fn lookup(&self, product_name: &str) -> Result<NormalizedResult> {
        let query = product_name.trim();
        if query.is_empty() {
            return Err(AppError::validation("product name is empty"));
        }

        let shopping = self.backend.search(query, SearchMode::Shopping).await?;

        let deals = self.normalizer.find_deals(&shopping, query);
        let mut image = self.normalizer.find_shopping_image(&shopping, query);

        if image.is_none() && self.normalizer.uses_image_search() {
            log::info!("No image in shopping results for '{query}'. Falling back to image search.");
            match self.backend.search(query, SearchMode::Images).await {
                Ok(doc) => image = self.normalizer.find_search_image(&doc, query),
                Err(e) => log::warn!("Image search failed for '{query}': {e}"),
            }
        }

        self.normalizer.finish(deals, image, query)
    }
}
