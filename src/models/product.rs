//! Normalized product data returned to the front end.

use serde::{Deserialize, Serialize};

/// Upper bound on the number of deals in a result.
pub const MAX_DEALS: usize = 3;

/// One offer for the product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deal {
    /// Seller or site name
    pub source: String,

    /// Price as displayed upstream (currency symbol included)
    pub price: String,

    /// Link to the offer
    pub link: String,
}

/// The stable `{ imageUrl, deals }` contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    /// Product image, or the placeholder when none was found
    pub image_url: String,

    /// At most [`MAX_DEALS`] offers, in discovery order
    pub deals: Vec<Deal>,
}
