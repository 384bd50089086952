// src/normalizer/images.rs

//! Image extraction stages.

use serde_json::Value;

use super::scan::{ImageUrlMatcher, find_image_url};
use crate::models::ImageStage;
use crate::utils::url::is_inline_data;

/// Documents and rules an image stage may consult.
pub struct ImageSources<'a> {
    pub shopping: &'a Value,
    pub image_doc: Option<&'a Value>,
    pub matcher: &'a ImageUrlMatcher,
    pub secure_prefix: &'a str,
}

/// Run a single image stage.
pub fn extract(stage: ImageStage, sources: &ImageSources<'_>) -> Option<String> {
    match stage {
        ImageStage::ShoppingImage => non_empty(sources.shopping.pointer("/shopping_results/0/image")),
        ImageStage::ProductMedia => non_empty(sources.shopping.pointer("/product_results/media/0/link")),
        ImageStage::Thumbnail => thumbnail(sources.shopping),
        ImageStage::DeepScan => find_image_url(sources.shopping, sources.matcher).map(str::to_string),
        ImageStage::ImageSearch => sources
            .image_doc
            .and_then(|doc| image_search(doc, sources.secure_prefix)),
    }
}

fn thumbnail(shopping: &Value) -> Option<String> {
    let organic = shopping
        .get("organic_results")
        .and_then(Value::as_array)
        .and_then(|results| {
            results
                .iter()
                .find_map(|result| remote_url(result.get("thumbnail")))
        });

    organic.or_else(|| {
        shopping
            .get("inline_images")
            .and_then(Value::as_array)
            .and_then(|images| {
                images.iter().find_map(|image| {
                    remote_url(image.get("image")).or_else(|| remote_url(image.get("thumbnail")))
                })
            })
    })
}

fn image_search(doc: &Value, secure_prefix: &str) -> Option<String> {
    doc.get("image_results")?
        .as_array()?
        .iter()
        .filter_map(|result| result.get("image").and_then(Value::as_str))
        .find(|url| url.starts_with(secure_prefix))
        .map(str::to_string)
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A non-empty URL that is not an embedded `data:` placeholder.
fn remote_url(value: Option<&Value>) -> Option<String> {
    non_empty(value).filter(|url| !is_inline_data(url))
}
