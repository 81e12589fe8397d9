//! # Product Types
//!
//! Products as listed by the commerce provider.
//! They are fetched per request and never stored locally.

use serde::{Deserialize, Serialize};

/// A product offered on the storefront
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Provider product ID (passed back on checkout)
    pub id: String,
    /// Display name
    pub name: String,
    /// Description (optional)
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the product bills on a recurring interval
    #[serde(default)]
    pub is_recurring: bool,
    /// Whether the product is archived
    #[serde(default)]
    pub is_archived: bool,
}

impl Product {
    /// Create a product with just an ID and a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            is_recurring: false,
            is_archived: false,
        }
    }

    /// Storefront path that starts a checkout for this product
    pub fn checkout_path(&self) -> String {
        format!("/checkout?products={}", urlencoding::encode(&self.id))
    }
}
