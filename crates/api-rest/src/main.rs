//! Standalone REST gateway binary.
//!
//! ## Purpose
//! Runs the REST gateway on its own, forwarding every request to a separately started gRPC
//! server. The workspace's main `tutorial-run` binary runs both in one process.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{app, connect_lazy, AppState};
use tutorial_core::config;

/// Main entry point for the REST gateway
///
/// # Environment Variables
/// - `TUTORIAL_REST_ADDR`: Listen address (default: "0.0.0.0:8000")
/// - `TUTORIAL_GRPC_URL`: gRPC upstream (default: "http://localhost:50051")
///
/// # Errors
/// Returns an error if the upstream URL is invalid, the address cannot be bound, or the HTTP
/// server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = config::rest_addr_from_env();
    let upstream = config::grpc_url_from_env();

    let client = connect_lazy(upstream.clone())?;
    tracing::info!("gRPC channel to {} created", upstream);
    tracing::info!("-- Starting REST gateway on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(AppState::new(client)))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown requested");
            }
        })
        .await?;

    tracing::info!("gRPC channel closed");
    Ok(())
}
