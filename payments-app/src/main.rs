//! # Payment Processor Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the configured gateway connector
//! - Create the in-memory record store and the payment service
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payments_gateways::build_gateway;
use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::build_repo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,payments_app=debug,payments_hex=debug,payments_gateways=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!(
        provider = ?config.provider,
        timeout_secs = config.gateway_timeout.as_secs(),
        "Starting payment processor on {}",
        config.addr()
    );

    // Only the selected provider is initialized
    let gateway = build_gateway(config.provider, config.gateway_settings())?;

    // Records live for the lifetime of the process
    let repo = build_repo();

    let service = PaymentService::new(repo, gateway);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    server.run(&config.addr()).await?;

    Ok(())
}
