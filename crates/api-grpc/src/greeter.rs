use api_shared::pb::hello::{greeter_server::Greeter, HelloRequest, HelloResponse};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};
use tutorial_core::greeting;

/// Implements the hello service's `Greeter`.
#[derive(Debug, Default, Clone)]
pub struct GreeterService;

#[tonic::async_trait]
impl Greeter for GreeterService {
    async fn say_hello(
        &self,
        req: Request<HelloRequest>,
    ) -> Result<Response<HelloResponse>, Status> {
        let req = req.into_inner();
        tracing::info!(person = %req.name, age = req.age, "say_hello");

        Ok(Response::new(HelloResponse {
            message: greeting::hello_message(&req.name, req.age),
            timestamp: greeting::unix_timestamp(),
        }))
    }

    type SayHelloStreamStream = ReceiverStream<Result<HelloResponse, Status>>;

    async fn say_hello_stream(
        &self,
        req: Request<HelloRequest>,
    ) -> Result<Response<Self::SayHelloStreamStream>, Status> {
        let req = req.into_inner();
        tracing::info!(person = %req.name, "say_hello_stream");

        let messages = greeting::stream_messages(&req.name);
        let (tx, rx) = mpsc::channel(messages.len().max(1));
        tokio::spawn(async move {
            for message in messages {
                let reply = HelloResponse {
                    message,
                    timestamp: greeting::unix_timestamp(),
                };
                if tx.send(Ok(reply)).await.is_err() {
                    tracing::debug!("hello stream receiver dropped");
                    break;
                }
            }
        });

        Ok(Response::new(ReceiverStream::new(rx)))
    }
}
