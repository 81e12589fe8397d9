//! # Storefront Error Types
//!
//! Typed error handling for the storefront.
//! All provider operations return `Result<T, ShopError>`.

use thiserror::Error;

/// Core error type for all storefront operations
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration errors (missing token or secret)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data (missing query parameters)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No customer matches the given email
    #[error("Customer not found: {email}")]
    CustomerNotFound { email: String },

    /// Commerce provider answered with a non-success status
    #[error("Provider error [{provider}]: HTTP {status}: {message}")]
    ProviderError {
        provider: String,
        status: u16,
        message: String,
    },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Provider response could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Provider response decoded but lacks a field we redirect to
    #[error("{resource} {field} not available")]
    MissingField {
        resource: &'static str,
        field: &'static str,
    },

    /// Webhook signature verification failed
    #[error("Webhook verification failed: {0}")]
    WebhookVerificationFailed(String),
}

impl ShopError {
    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Every upstream failure surfaces as 500; nothing here is retried.
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Configuration(_) => 500,
            ShopError::InvalidRequest(_) => 400,
            ShopError::CustomerNotFound { .. } => 404,
            ShopError::ProviderError { .. } => 500,
            ShopError::NetworkError(_) => 500,
            ShopError::Serialization(_) => 500,
            ShopError::MissingField { .. } => 500,
            ShopError::WebhookVerificationFailed(_) => 403,
        }
    }

    /// Returns true if this error originated at the commerce provider
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ShopError::ProviderError { .. }
                | ShopError::NetworkError(_)
                | ShopError::Serialization(_)
                | ShopError::MissingField { .. }
        )
    }
}

/// Result type alias for storefront operations
pub type ShopResult<T> = Result<T, ShopError>;
