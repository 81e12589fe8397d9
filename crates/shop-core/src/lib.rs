//! # shop-core
//!
//! Core types and traits for the polar-storefront server.
//!
//! This crate provides:
//! - `CommerceProvider` trait for talking to a commerce platform
//! - `Product`, `CheckoutSession`, `Customer` and `CustomerSession` shapes
//! - `ShopError` for typed error handling and HTTP status mapping
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{CheckoutRequest, CommerceProvider};
//!
//! let request = CheckoutRequest::new(vec!["prod_1".into()], "https://shop.example/");
//! let session = provider.create_checkout(&request).await?;
//!
//! // Redirect user to session.redirect_url()?
//! ```

pub mod error;
pub mod product;
pub mod provider;
pub mod session;

// Re-exports for convenience
pub use error::{ShopError, ShopResult};
pub use product::Product;
pub use provider::{BoxedCommerceProvider, CommerceProvider};
pub use session::{CheckoutRequest, CheckoutSession, Customer, CustomerSession};
