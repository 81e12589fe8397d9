//! # Polar Configuration
//!
//! Configuration management for the Polar integration.
//! All secrets are loaded from environment variables.

use shop_core::ShopError;
use std::env;
use std::fmt;
use tracing::warn;

/// Production API base URL
pub const PRODUCTION_API_URL: &str = "https://api.polar.sh/v1";

/// Sandbox API base URL
pub const SANDBOX_API_URL: &str = "https://sandbox-api.polar.sh/v1";

/// Which Polar environment to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolarMode {
    #[default]
    Production,
    Sandbox,
}

impl PolarMode {
    /// Parse a `POLAR_MODE` value. Anything other than `sandbox` means production.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "sandbox" => PolarMode::Sandbox,
            "production" | "" => PolarMode::Production,
            other => {
                warn!("Unknown POLAR_MODE {:?}, using production", other);
                PolarMode::Production
            }
        }
    }

    /// API base URL for this mode
    pub fn api_base_url(&self) -> &'static str {
        match self {
            PolarMode::Production => PRODUCTION_API_URL,
            PolarMode::Sandbox => SANDBOX_API_URL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PolarMode::Production => "production",
            PolarMode::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for PolarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polar API configuration
#[derive(Clone)]
pub struct PolarConfig {
    /// Organization access token
    pub access_token: String,

    /// Raw webhook secret as shown in the Polar dashboard
    pub webhook_secret: String,

    /// Production or sandbox
    pub mode: PolarMode,

    /// API base URL (follows `mode` unless overridden)
    pub api_base_url: String,
}

impl PolarConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `POLAR_ACCESS_TOKEN`
    /// - `POLAR_WEBHOOK_SECRET`
    ///
    /// Optional:
    /// - `POLAR_MODE` (`production` or `sandbox`)
    pub fn from_env() -> Result<Self, ShopError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ShopError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let access_token = non_empty("POLAR_ACCESS_TOKEN").ok_or_else(|| {
            ShopError::Configuration("POLAR_ACCESS_TOKEN is required".to_string())
        })?;

        let webhook_secret = non_empty("POLAR_WEBHOOK_SECRET").ok_or_else(|| {
            ShopError::Configuration("POLAR_WEBHOOK_SECRET is required".to_string())
        })?;

        let mode = non_empty("POLAR_MODE")
            .map(|m| PolarMode::parse(&m))
            .unwrap_or_default();

        Ok(Self::new(access_token, webhook_secret).with_mode(mode))
    }

    /// Create config with explicit values (production mode)
    pub fn new(access_token: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            webhook_secret: webhook_secret.into(),
            mode: PolarMode::Production,
            api_base_url: PolarMode::Production.api_base_url().to_string(),
        }
    }

    /// Builder: switch mode (and the base URL with it)
    pub fn with_mode(mut self, mode: PolarMode) -> Self {
        self.mode = mode;
        self.api_base_url = mode.api_base_url().to_string();
        self
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Check if talking to the sandbox
    pub fn is_sandbox(&self) -> bool {
        self.mode == PolarMode::Sandbox
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Full URL for an API path such as `/products`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

impl fmt::Debug for PolarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolarConfig")
            .field("access_token", &"***")
            .field("webhook_secret", &"***")
            .field("mode", &self.mode)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}
