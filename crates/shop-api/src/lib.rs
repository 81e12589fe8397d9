//! # shop-api
//!
//! HTTP storefront layer for polar-storefront-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Storefront page, checkout and customer portal redirects
//! - Polar webhook receiver
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Storefront page |
//! | GET | `/health` | Health check |
//! | GET | `/checkout?products=...` | Redirect to Polar checkout |
//! | GET | `/portal?email=...` | Redirect to Polar customer portal |
//! | POST | `/polar/webhooks` | Polar webhook |

pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
