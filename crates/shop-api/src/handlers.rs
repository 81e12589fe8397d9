//! # Request Handlers
//!
//! Axum request handlers for the storefront.
//! Each handler extracts its parameters, makes the provider calls it needs
//! and maps the outcome onto an HTTP response. Nothing is retried.

use crate::pages;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use shop_core::{CheckoutRequest, ShopError};
use shop_polar::webhook::HEADER_WEBHOOK_ID;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Error response: status plus a plain-text message
pub type ErrorResponse = (StatusCode, String);

fn shop_error_to_response(err: ShopError) -> ErrorResponse {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = match err {
        ShopError::InvalidRequest(message) => message,
        ShopError::CustomerNotFound { .. } => "Customer not found".to_string(),
        // No verification detail goes back to the caller
        ShopError::WebhookVerificationFailed(_) => "Webhook verification failed".to_string(),
        other => other.to_string(),
    };
    (status, message)
}

/// Upstream failure with the action that failed in front of the provider text
fn upstream_error(action: &str, err: ShopError) -> ErrorResponse {
    if err.is_upstream() {
        error!("Error {}: {}", action, err);
        let (status, message) = shop_error_to_response(err);
        (status, format!("Error {}: {}", action, message))
    } else {
        info!("{} stopped: {}", action, err);
        shop_error_to_response(err)
    }
}

/// 302 Found to a provider-hosted page
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Host the request was addressed to: the `Host` header, else the URI
/// authority (HTTP/2 carries it in `:authority`)
fn request_host(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    header_str(headers, header::HOST.as_str())
        .map(String::from)
        .or_else(|| uri.authority().map(|a| a.as_str().to_string()))
}

/// First value of a query key, if that value is non-blank
fn first_query_value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty())
}

/// Collect `products` values; each value may hold a comma-separated list
fn product_ids_from_query(params: &[(String, String)]) -> Vec<String> {
    params
        .iter()
        .filter(|(key, _)| key == "products")
        .flat_map(|(_, value)| value.split(','))
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "polar-storefront",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Storefront page listing every non-archived product
#[instrument(skip(state))]
pub async fn storefront(State(state): State<AppState>) -> Result<Html<String>, ErrorResponse> {
    let products = state
        .provider
        .list_products(false)
        .await
        .map_err(|e| upstream_error("fetching products", e))?;

    info!("Rendering storefront with {} products", products.len());

    Ok(Html(pages::render_storefront(&products)))
}

/// Verify a Polar webhook and echo its body
#[instrument(skip(state, headers, body), fields(bytes = body.len()))]
pub async fn polar_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ErrorResponse> {
    state.webhook.verify(&body, &headers).map_err(|e| {
        warn!("Webhook verification failed: {}", e);
        shop_error_to_response(e.into())
    })?;

    info!(
        "Received webhook: id={}",
        header_str(&headers, HEADER_WEBHOOK_ID).unwrap_or_default()
    );

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Create a checkout session and redirect to it
#[instrument(skip(state, headers, uri, params))]
pub async fn checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ErrorResponse> {
    let product_ids = product_ids_from_query(&params);
    if product_ids.is_empty() {
        return Err(shop_error_to_response(ShopError::InvalidRequest(
            "Missing products parameter".to_string(),
        )));
    }

    let host = request_host(&headers, &uri);
    let success_url = state.config.success_url_for_host(host.as_deref());

    info!(
        "Creating checkout: {} products, success_url={}",
        product_ids.len(),
        success_url
    );

    let request = CheckoutRequest::new(product_ids, success_url);
    let session = state
        .provider
        .create_checkout(&request)
        .await
        .map_err(|e| upstream_error("creating checkout", e))?;

    let url = session
        .redirect_url()
        .map_err(|e| upstream_error("creating checkout", e))?;

    Ok(found(url))
}

/// Open the customer portal for the first customer matching an email.
///
/// A repeated `email` key uses its first value.
#[instrument(skip(state, params))]
pub async fn portal(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ErrorResponse> {
    let email = first_query_value(&params, "email").ok_or_else(|| {
        shop_error_to_response(ShopError::InvalidRequest(
            "Missing email parameter".to_string(),
        ))
    })?;

    let customer = state
        .provider
        .find_customer_by_email(email)
        .await
        .map_err(|e| upstream_error("fetching customer", e))?;

    let session = state
        .provider
        .create_customer_session(&customer.id)
        .await
        .map_err(|e| upstream_error("creating portal session", e))?;

    let url = session
        .redirect_url()
        .map_err(|e| upstream_error("creating portal session", e))?;

    info!("Redirecting customer {} to portal", customer.id);

    Ok(found(url))
}
