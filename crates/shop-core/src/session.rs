//! # Checkout and Customer Types
//!
//! Request and response shapes for checkout sessions, customer lookup
//! and customer portal sessions.

use crate::error::{ShopError, ShopResult};
use serde::{Deserialize, Serialize};

/// Request to open a checkout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    /// Product IDs to purchase
    #[serde(rename = "products")]
    pub product_ids: Vec<String>,
    /// Where the provider sends the customer after payment
    pub success_url: String,
}

impl CheckoutRequest {
    pub fn new(product_ids: Vec<String>, success_url: impl Into<String>) -> Self {
        Self {
            product_ids,
            success_url: success_url.into(),
        }
    }
}

/// Checkout session issued by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    #[serde(default)]
    pub id: Option<String>,
    /// Hosted checkout page
    #[serde(default)]
    pub url: Option<String>,
}

impl CheckoutSession {
    /// The hosted checkout URL, or an error if the provider left it out
    pub fn redirect_url(&self) -> ShopResult<&str> {
        self.url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(ShopError::MissingField {
                resource: "Checkout",
                field: "URL",
            })
    }
}

/// A customer known to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Customer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            name: None,
        }
    }
}

/// Customer portal session issued by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSession {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub customer_portal_url: Option<String>,
}

impl CustomerSession {
    /// The portal URL, or an error if the provider left it out
    pub fn redirect_url(&self) -> ShopResult<&str> {
        self.customer_portal_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(ShopError::MissingField {
                resource: "Customer portal",
                field: "URL",
            })
    }
}
