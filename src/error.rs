// src/error.rs

//! Unified error handling for the product lookup.

use thiserror::Error;

/// Result type alias for lookup operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input or configuration validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The search API answered with a non-success status and no usable body
    #[error("HTTP status {0}")]
    Status(u16),

    /// The search API answered but reported a failure
    #[error("API Error: {0}")]
    Upstream(String),

    /// Neither an image nor a deal was located for the query
    #[error("No product data found for '{query}'")]
    NotFound { query: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an upstream API error.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    /// Create a not-found error for a query.
    pub fn not_found(query: impl Into<String>) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Whether this is the expected "nothing found" outcome rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message() {
        let err = AppError::upstream("Invalid API key");
        assert_eq!(err.to_string(), "API Error: Invalid API key");
    }

    #[test]
    fn test_not_found_flag() {
        assert!(AppError::not_found("widget").is_not_found());
        assert!(!AppError::config("missing").is_not_found());
    }
}
