// src/lib.rs

//! Product data lookup library.
//!
//! Queries a search API for a product and normalizes the unpredictable
//! response into `{ imageUrl, deals }`.

pub mod api;
pub mod error;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod models;
pub mod normalizer;
pub mod services;
pub mod utils;
