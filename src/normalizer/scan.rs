// src/normalizer/scan.rs

//! Depth-first search of an arbitrary JSON tree for an image URL.

use serde_json::Value;

/// Decides whether a string looks like a usable image URL.
#[derive(Debug, Clone)]
pub struct ImageUrlMatcher {
    prefix: String,
    extensions: Vec<String>,
}

impl ImageUrlMatcher {
    pub fn new(prefix: impl Into<String>, extensions: &[String]) -> Self {
        Self {
            prefix: prefix.into(),
            extensions: extensions.to_vec(),
        }
    }

    /// Secure scheme prefix and a known image extension, compared case-sensitively.
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.starts_with(&self.prefix)
            && self
                .extensions
                .iter()
                .any(|ext| candidate.ends_with(ext.as_str()))
    }
}

/// Return the first matching string in pre-order.
///
/// Object members are visited in document order (serde_json is built with
/// `preserve_order`), array elements by index. Recursion depth is bounded by
/// the parser's own nesting limit.
pub fn find_image_url<'a>(value: &'a Value, matcher: &ImageUrlMatcher) -> Option<&'a str> {
    match value {
        Value::String(s) if matcher.matches(s) => Some(s.as_str()),
        Value::Object(map) => map.values().find_map(|v| find_image_url(v, matcher)),
        Value::Array(items) => items.iter().find_map(|v| find_image_url(v, matcher)),
        _ => None,
    }
}
