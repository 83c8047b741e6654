use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tutorial_core::{config, CoreConfig, TodoService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_grpc=info".parse()?)
                .add_directive("tutorial_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = config::grpc_addr_from_env().parse()?;
    let cfg = CoreConfig::from_env();
    let todos = TodoService::open(cfg.db_path())?;

    tracing::info!("-- Starting gRPC server on {}", addr);

    api_grpc::serve(addr, todos, config::reflection_enabled_from_env(), async {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown requested");
        }
    })
    .await
}
