// src/api.rs

//! Transport-independent HTTP contract.
//!
//! Maps lookup outcomes onto status codes and JSON bodies so every
//! front door (Lambda, CLI) answers the same way.

use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::models::NormalizedResult;

/// Query-string parameter carrying the product name.
pub const PRODUCT_NAME_PARAM: &str = "productName";

const NOT_FOUND_MESSAGE: &str =
    "Oops! We couldn't find that product. Please try a different name.";
const MISSING_PRODUCT_MESSAGE: &str = "Missing productName query parameter.";
const BACKEND_FAILURE_MESSAGE: &str = "The backend function failed.";

/// Status code and JSON body of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    /// 400 for a request without a usable product name.
    pub fn missing_product() -> Self {
        Self::error(400, MISSING_PRODUCT_MESSAGE)
    }

    /// Map a lookup outcome onto the response contract.
    pub fn from_lookup(result: &Result<NormalizedResult>) -> Self {
        match result {
            Ok(found) => match serde_json::to_value(found) {
                Ok(body) => Self { status: 200, body },
                Err(_) => Self::error(500, BACKEND_FAILURE_MESSAGE),
            },
            Err(e) => Self::from_error(e),
        }
    }

    /// Map an error onto the response contract.
    pub fn from_error(error: &AppError) -> Self {
        match error {
            AppError::NotFound { .. } => Self::error(404, NOT_FOUND_MESSAGE),
            AppError::Validation(_) => Self::missing_product(),
            AppError::Config(message) => Self::error(500, message.as_str()),
            AppError::Upstream(_) => Self::error(500, error.to_string()),
            _ => Self::error(500, BACKEND_FAILURE_MESSAGE),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trimmed, non-empty product name from an optional parameter.
pub fn product_name(param: Option<&str>) -> Option<&str> {
    param.map(str::trim).filter(|name| !name.is_empty())
}
