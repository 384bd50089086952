// src/models/mod.rs

//! Domain models for the product lookup.
//!
//! This module contains the data structures shared by the normalizer,
//! the search client and the HTTP surface.

mod config;
mod product;
mod stage;

// Re-export all public types
pub use config::{Config, NormalizerConfig, SearchConfig};
pub use product::{Deal, MAX_DEALS, NormalizedResult};
pub use stage::{DealStage, ImageStage};
