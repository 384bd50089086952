//! Service layer for the product lookup.
//!
//! This module contains:
//! - The upstream search API client (`SearchClient`)
//! - The lookup orchestration (`ProductLookup`)

mod lookup;
mod search;

pub use lookup::ProductLookup;
pub use search::{SearchBackend, SearchClient, SearchMode, check_request_info};
