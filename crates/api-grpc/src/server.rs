//! Server assembly shared by the standalone gRPC binary and the combined runner.

use std::future::Future;
use std::net::SocketAddr;

use api_shared::pb::hello::greeter_server::GreeterServer;
use api_shared::pb::todo::service::todo_service_server::TodoServiceServer;
use api_shared::FILE_DESCRIPTOR_SET;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::server::Router;
use tonic::transport::Server;
use tonic_reflection::server::Builder;
use tutorial_core::TodoService;

use crate::{GreeterService, TodoGrpcService};

fn router(todos: TodoService, reflection: bool) -> anyhow::Result<Router> {
    let mut router = Server::builder()
        .add_service(GreeterServer::new(GreeterService))
        .add_service(TodoServiceServer::new(TodoGrpcService::new(todos)));

    if reflection {
        let reflection_service = Builder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .build_v1()?;
        router = router.add_service(reflection_service);
        tracing::info!("gRPC server reflection enabled");
    } else {
        tracing::info!("gRPC server reflection disabled");
    }

    Ok(router)
}

/// Serves the greeter and todo services on `addr` until `shutdown` resolves.
pub async fn serve<F>(
    addr: SocketAddr,
    todos: TodoService,
    reflection: bool,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send,
{
    router(todos, reflection)?
        .serve_with_shutdown(addr, shutdown)
        .await?;
    tracing::info!("gRPC server stopped");
    Ok(())
}

/// Serves on an already-bound listener. Used when the caller needs the bound port, as tests do.
pub async fn serve_with_incoming(
    listener: tokio::net::TcpListener,
    todos: TodoService,
) -> anyhow::Result<()> {
    router(todos, false)?
        .serve_with_incoming(TcpListenerStream::new(listener))
        .await?;
    Ok(())
}
