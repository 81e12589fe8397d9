//! # Polar Storefront
//!
//! Storefront, checkout and customer portal on top of Polar.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables (or put them in .env)
//! export POLAR_ACCESS_TOKEN=polar_oat_...
//! export POLAR_WEBHOOK_SECRET=...
//! export POLAR_MODE=sandbox
//!
//! # Run the server
//! polar-storefront
//! ```

use shop_api::{routes, state::AppState};
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    // Missing secrets stop us here, before anything is bound
    let state = match AppState::new() {
        Ok(state) => state,
        Err(e) => {
            error!("Configuration error: {}", e);
            return Err(e);
        }
    };

    let addr = state.config.socket_addr()?;

    info!("Payment provider: {}", state.provider.provider_name());
    match &state.config.success_url {
        Some(url) => info!("Checkout success URL: {}", url),
        None => info!("Checkout success URL: derived from request host"),
    }

    let app = routes::create_router(state);

    info!("Storefront starting on http://{}", addr);
    info!("Webhook: POST http://{}/polar/webhooks", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  Polar Storefront
  ━━━━━━━━━━━━━━━━
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
