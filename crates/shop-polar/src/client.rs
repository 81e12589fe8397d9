//! # Polar API Client
//!
//! Implementation of `CommerceProvider` over the Polar REST API.
//! Requests carry the organization access token as a bearer token.

use crate::config::PolarConfig;
use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, AUTHORIZATION},
    Client, RequestBuilder,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shop_core::{
    CheckoutRequest, CheckoutSession, CommerceProvider, Customer, CustomerSession, Product,
    ShopError, ShopResult,
};
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "polar";

/// Polar API client
///
/// Holds no per-call state, so one instance is shared by every request task.
pub struct PolarClient {
    config: PolarConfig,
    client: Client,
}

impl PolarClient {
    /// Create a new client. The underlying HTTP client keeps its default timeouts.
    pub fn new(config: PolarConfig) -> ShopResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("polar-storefront/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ShopError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> ShopResult<Self> {
        let config = PolarConfig::from_env()?;
        Self::new(config)
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &PolarConfig {
        &self.config
    }

    /// Send an authorized request and decode a JSON response
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ShopResult<T> {
        let response = request
            .header(AUTHORIZATION, self.config.auth_header())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ShopError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShopError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Polar API error: status={}, body={}", status, body);

            return Err(ShopError::ProviderError {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            ShopError::Serialization(format!("Failed to parse Polar response: {}", e))
        })
    }
}

#[async_trait]
impl CommerceProvider for PolarClient {
    #[instrument(skip(self))]
    async fn list_products(&self, archived: bool) -> ShopResult<Vec<Product>> {
        let url = self.config.endpoint("/products/");
        let request = self
            .client
            .get(&url)
            .query(&[("is_archived", archived.to_string())]);

        let page: ListResource<Product> = self.send(request).await?;
        debug!(
            "Listed {} products (total={:?})",
            page.items.len(),
            page.pagination.map(|p| p.total_count)
        );

        Ok(page.items)
    }

    #[instrument(skip(self, request), fields(products = request.product_ids.len()))]
    async fn create_checkout(&self, request: &CheckoutRequest) -> ShopResult<CheckoutSession> {
        let url = self.config.endpoint("/checkouts/");
        let session: CheckoutSession = self.send(self.client.post(&url).json(request)).await?;

        info!(
            "Created Polar checkout: id={:?}, url={:?}",
            session.id, session.url
        );

        Ok(session)
    }

    #[instrument(skip(self, email))]
    async fn list_customers(&self, email: &str) -> ShopResult<Vec<Customer>> {
        let url = self.config.endpoint("/customers/");
        let request = self.client.get(&url).query(&[("email", email)]);

        let page: ListResource<Customer> = self.send(request).await?;
        debug!("Customer lookup matched {} customers", page.items.len());

        Ok(page.items)
    }

    #[instrument(skip(self))]
    async fn create_customer_session(&self, customer_id: &str) -> ShopResult<CustomerSession> {
        let url = self.config.endpoint("/customer-sessions/");
        let body = CustomerSessionCreate { customer_id };
        let session: CustomerSession = self.send(self.client.post(&url).json(&body)).await?;

        info!("Created Polar customer session: id={:?}", session.id);

        Ok(session)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Best-effort human message from a Polar error body
fn error_message(body: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<PolarErrorResponse>(body) else {
        return body.to_string();
    };

    let detail = match parsed.detail {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    };

    match (parsed.error, detail) {
        (Some(kind), Some(detail)) => format!("{}: {}", kind, detail),
        (None, Some(detail)) => detail,
        (Some(kind), None) => kind,
        (None, None) => body.to_string(),
    }
}

// =============================================================================
// Polar API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct ListResource<T> {
    items: Vec<T>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct Pagination {
    total_count: u64,
}

#[derive(Debug, Serialize)]
struct CustomerSessionCreate<'a> {
    customer_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct PolarErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}
