//! # Commerce Provider Trait
//!
//! The seam between the HTTP handlers and the commerce platform.
//! Handlers only talk to `CommerceProvider`; the Polar adapter implements it
//! and tests substitute an in-memory one.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 CommerceProvider (trait)                    │
//! │  ├── list_products()                                        │
//! │  ├── create_checkout()                                      │
//! │  ├── list_customers()                                       │
//! │  └── create_customer_session()                              │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!          ┌─────────────────┴─────────────────┐
//!          │                                   │
//!  ┌───────┴───────┐                   ┌───────┴───────┐
//!  │  PolarClient  │                   │ test doubles  │
//!  └───────────────┘                   └───────────────┘
//! ```

use crate::error::{ShopError, ShopResult};
use crate::product::Product;
use crate::session::{CheckoutRequest, CheckoutSession, Customer, CustomerSession};
use async_trait::async_trait;
use std::sync::Arc;

/// Operations the storefront needs from a commerce platform.
///
/// Implementations hold no per-call mutable state and are shared across
/// request tasks.
#[async_trait]
pub trait CommerceProvider: Send + Sync {
    /// List products, filtered on their archived flag.
    async fn list_products(&self, archived: bool) -> ShopResult<Vec<Product>>;

    /// Open a hosted checkout session for the given products.
    async fn create_checkout(&self, request: &CheckoutRequest) -> ShopResult<CheckoutSession>;

    /// List customers whose email matches exactly.
    async fn list_customers(&self, email: &str) -> ShopResult<Vec<Customer>>;

    /// Open a customer portal session for a customer ID.
    async fn create_customer_session(&self, customer_id: &str) -> ShopResult<CustomerSession>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;

    /// Look up a customer by email, taking the first match.
    ///
    /// Multiple matches are not disambiguated.
    async fn find_customer_by_email(&self, email: &str) -> ShopResult<Customer> {
        self.list_customers(email)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ShopError::CustomerNotFound {
                email: email.to_string(),
            })
    }
}

/// Type alias for a shared provider (dynamic dispatch)
pub type BoxedCommerceProvider = Arc<dyn CommerceProvider>;
