use std::net::SocketAddr;

use api_shared::pb::hello::{greeter_client::GreeterClient, HelloRequest};
use api_shared::pb::todo::messages::{AddTodoRequest, EditTodoRequest, Empty, TodoId};
use api_shared::pb::todo::service::todo_service_client::TodoServiceClient;
use tonic::Code;
use tutorial_core::TodoService;

async fn start_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind gRPC port");
    let addr = listener.local_addr().unwrap();
    let todos = TodoService::in_memory().unwrap();

    tokio::spawn(async move {
        api_grpc::serve_with_incoming(listener, todos)
            .await
            .expect("serve gRPC");
    });

    addr
}

#[tokio::test]
async fn say_hello_formats_greeting() {
    let addr = start_server().await;
    let mut client = GreeterClient::connect(format!("http://{addr}")).await.unwrap();

    let reply = client
        .say_hello(HelloRequest {
            name: "Alice".into(),
            age: 30,
        })
        .await
        .unwrap()
        .into_inner();

    assert_eq!(reply.message, "Hello Alice! You are 30 years old.");
    assert!(reply.timestamp > 0);
}

#[tokio::test]
async fn say_hello_stream_yields_five_messages() {
    let addr = start_server().await;
    let mut client = GreeterClient::connect(format!("http://{addr}")).await.unwrap();

    let mut stream = client
        .say_hello_stream(HelloRequest {
            name: "Bob".into(),
            age: 25,
        })
        .await
        .unwrap()
        .into_inner();

    let mut messages = Vec::new();
    while let Some(reply) = stream.message().await.unwrap() {
        messages.push(reply.message);
    }

    assert_eq!(messages.len(), 5);
    assert_eq!(messages.first().unwrap(), "Hello Bob, message #1");
    assert_eq!(messages.last().unwrap(), "Hello Bob, message #5");
}

#[tokio::test]
async fn todo_lifecycle_over_grpc() {
    let addr = start_server().await;
    let mut client = TodoServiceClient::connect(format!("http://{addr}"))
        .await
        .unwrap();

    let added = client
        .add_todo(AddTodoRequest {
            task: "Buy groceries".into(),
        })
        .await
        .unwrap()
        .into_inner();

    let edited = client
        .edit_todo(EditTodoRequest {
            id: added.id,
            task: "Buy more groceries".into(),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(edited.id, added.id);

    let listed = client.list_todos(Empty {}).await.unwrap().into_inner();
    assert_eq!(listed.todos, vec![edited.clone()]);

    let missing = client.get_todo(TodoId { id: added.id + 100 }).await.unwrap_err();
    assert_eq!(missing.code(), Code::NotFound);

    let empty_task = client
        .add_todo(AddTodoRequest { task: "".into() })
        .await
        .unwrap_err();
    assert_eq!(empty_task.code(), Code::InvalidArgument);
}
