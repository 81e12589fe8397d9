//! # shop-polar
//!
//! Polar adapter for polar-storefront-rs.
//!
//! This crate provides:
//!
//! 1. **PolarClient** - `CommerceProvider` over the Polar REST API
//!    - Product listing
//!    - Checkout sessions
//!    - Customer lookup and customer portal sessions
//!
//! 2. **Webhook** - Standard Webhooks signature verification
//!    - `webhook-id` / `webhook-timestamp` / `webhook-signature` headers
//!    - Timestamp tolerance
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_polar::PolarClient;
//! use shop_core::{CheckoutRequest, CommerceProvider};
//!
//! // Create client from environment
//! let client = PolarClient::from_env()?;
//!
//! let request = CheckoutRequest::new(vec![product_id], "https://example.com/");
//! let session = client.create_checkout(&request).await?;
//!
//! // Redirect user to session.redirect_url()?
//! ```
//!
//! ## Webhook Handling
//!
//! ```rust,ignore
//! use shop_polar::Webhook;
//!
//! let wh = Webhook::from_raw_secret(&config.webhook_secret)?;
//! wh.verify(&body, &headers)?;
//! ```

pub mod client;
pub mod config;
pub mod webhook;

// Re-exports
pub use client::PolarClient;
pub use config::{PolarConfig, PolarMode};
pub use webhook::{Webhook, WebhookError};
