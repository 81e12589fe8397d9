//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the commerce provider, the webhook verifier and configuration.
//! Everything here is built once at startup and only read afterwards.

use shop_core::BoxedCommerceProvider;
use shop_polar::{PolarClient, Webhook};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

/// Port used when `PORT` is unset or not a number
pub const DEFAULT_PORT: u16 = 8080;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Fixed post-checkout redirect; derived from the request host when unset
    pub success_url: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_port(lookup("PORT").as_deref()),
            success_url: lookup("POLAR_SUCCESS_URL").filter(|u| !u.trim().is_empty()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Where checkout sends the customer afterwards.
    ///
    /// The configured URL wins; otherwise the root of the host the request
    /// came in on.
    pub fn success_url_for_host(&self, host: Option<&str>) -> String {
        match (&self.success_url, host) {
            (Some(url), _) => url.clone(),
            (None, Some(host)) => format!("http://{}/", host),
            (None, None) => format!("http://localhost:{}/", self.port),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            success_url: None,
        }
    }
}

/// Parse a `PORT` value, falling back to 8080 when it is missing or not numeric
pub fn parse_port(value: Option<&str>) -> u16 {
    match value.map(str::trim) {
        None | Some("") => DEFAULT_PORT,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid PORT {:?}, using {}", raw, DEFAULT_PORT);
            DEFAULT_PORT
        }),
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Commerce provider (Polar in production)
    pub provider: BoxedCommerceProvider,
    /// Webhook signature verifier
    pub webhook: Arc<Webhook>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by the Polar API.
    ///
    /// Fails when the access token or webhook secret is missing.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let client = PolarClient::from_env()?;
        let polar = client.config();

        info!("Polar mode: {} ({})", polar.mode, polar.api_base_url);
        if polar.is_sandbox() {
            warn!("Using the Polar sandbox; no real payments are taken");
        }

        let webhook = Webhook::from_raw_secret(&polar.webhook_secret)?;

        Ok(Self::with_provider(config, Arc::new(client), webhook))
    }

    /// Assemble state from explicit parts
    pub fn with_provider(
        config: AppConfig,
        provider: BoxedCommerceProvider,
        webhook: Webhook,
    ) -> Self {
        Self {
            provider,
            webhook: Arc::new(webhook),
            config,
        }
    }
}
