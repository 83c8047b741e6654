use std::net::{Ipv4Addr, SocketAddr};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{app, connect_lazy, AppState};
use tutorial_core::{config, CoreConfig, TodoService};

/// Main entry point for the combined runner
///
/// Starts both servers concurrently:
/// - gRPC server (Greeter + TodoService) on port 50051 (configurable via TUTORIAL_GRPC_ADDR)
/// - REST gateway on port 8000 (configurable via TUTORIAL_REST_ADDR), dialling the local gRPC
///   server
///
/// # Environment Variables
/// - `TUTORIAL_GRPC_ADDR`: gRPC server address (default: "0.0.0.0:50051")
/// - `TUTORIAL_REST_ADDR`: REST server address (default: "0.0.0.0:8000")
/// - `TODO_DB_PATH`: SQLite database file (default: "todos.db")
/// - `TUTORIAL_ENABLE_REFLECTION`: "true" to register gRPC server reflection
///
/// # Returns
/// * `Ok(())` - If servers start and run successfully
/// * `Err(anyhow::Error)` - If server startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tutorial_run=info".parse()?)
                .add_directive("api_grpc=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("tutorial_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let grpc_addr: SocketAddr = config::grpc_addr_from_env().parse()?;
    let rest_addr = config::rest_addr_from_env();

    let cfg = CoreConfig::from_env();
    let todos = TodoService::open(cfg.db_path())?;

    tracing::info!("++ Starting gRPC on {}", grpc_addr);
    tracing::info!("++ Starting REST gateway on {}", rest_addr);

    let upstream = local_upstream(grpc_addr);
    let rest_app = app(AppState::new(connect_lazy(upstream)?));
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    let rest_server = async move { axum::serve(listener, rest_app).await };

    let grpc_server = api_grpc::serve(
        grpc_addr,
        todos,
        config::reflection_enabled_from_env(),
        async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown requested");
            }
        },
    );

    // The gRPC server returns on Ctrl-C; the gateway is dropped with it.
    tokio::select! {
        res = rest_server => res?,
        res = grpc_server => res?,
    }

    Ok(())
}

/// URL the embedded gateway dials to reach the gRPC server in this process.
fn local_upstream(grpc_addr: SocketAddr) -> String {
    let host = if grpc_addr.ip().is_unspecified() {
        SocketAddr::from((Ipv4Addr::LOCALHOST, grpc_addr.port()))
    } else {
        grpc_addr
    };
    format!("http://{host}")
}
