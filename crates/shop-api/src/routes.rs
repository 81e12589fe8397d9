//! # Routes
//!
//! Axum router configuration for the storefront.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the main application router
///
/// Routes:
/// - GET  /                - Storefront page
/// - GET  /health          - Health check
/// - GET  /checkout        - Create checkout, 302 to Polar
/// - GET  /portal          - Create customer portal session, 302 to Polar
/// - POST /polar/webhooks  - Polar webhook receiver
pub fn create_router(state: AppState) -> Router {
    // Webhook routes (must accept raw body)
    let webhook_routes = Router::new().route("/webhooks", post(handlers::polar_webhook));

    Router::new()
        .route("/", get(handlers::storefront))
        .route("/health", get(handlers::health))
        .route("/checkout", get(handlers::checkout))
        .route("/portal", get(handlers::portal))
        .nest("/polar", webhook_routes)
        // Middleware
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
