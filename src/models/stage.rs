//! Extraction stages of the fallback chain.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A source of deals in the shopping document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    /// `shopping_results[0].offers`
    ShoppingOffers,
    /// Organic results carrying a detected price extension
    OrganicPrices,
}

/// A source of the product image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStage {
    /// `shopping_results[0].image`
    ShoppingImage,
    /// `product_results.media[0].link`
    ProductMedia,
    /// Organic thumbnail or inline image carousel
    Thumbnail,
    /// Pre-order scan of the whole shopping document
    DeepScan,
    /// First secure result of the image-mode document
    ImageSearch,
}

impl ImageStage {
    /// Whether the stage reads the image-mode document rather than the shopping one.
    pub fn needs_image_document(self) -> bool {
        matches!(self, Self::ImageSearch)
    }
}

impl fmt::Display for DealStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ShoppingOffers => "shopping_offers",
            Self::OrganicPrices => "organic_prices",
        };
        f.write_str(name)
    }
}

impl fmt::Display for ImageStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ShoppingImage => "shopping_image",
            Self::ProductMedia => "product_media",
            Self::Thumbnail => "thumbnail",
            Self::DeepScan => "deep_scan",
            Self::ImageSearch => "image_search",
        };
        f.write_str(name)
    }
}
