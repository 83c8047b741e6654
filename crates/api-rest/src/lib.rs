//! # API REST
//!
//! REST gateway for the todo service.
//!
//! Handles:
//! - HTTP endpoints with axum, each translated into a `TodoService` gRPC call
//! - Concurrent fan-out for batch create and batch delete
//! - OpenAPI/Swagger documentation and permissive CORS
//!
//! Uses `api-shared` for the generated gRPC client.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod extract;
pub mod models;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use futures::future::join_all;
use tonic::transport::{Channel, Endpoint};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::pb::todo::messages::{
    AddTodoRequest, EditTodoRequest, Empty, RemoveTodoRequest, Todo, TodoId,
};
use api_shared::pb::todo::service::todo_service_client::TodoServiceClient;
use api_shared::{HealthRes, HealthService};

pub use error::{ApiError, ApiResult};
use extract::{AppJson, AppPath};
use models::{
    BatchResponse, BatchResult, DeleteResponse, ErrorBody, TodoCreate, TodoCreateBatch,
    TodoDeleteBatch, TodoListResponse, TodoResponse, TodoUpdate,
};

/// Application state for the REST gateway
///
/// Holds the gRPC client; tonic clients are cheap to clone and share one channel.
#[derive(Clone)]
pub struct AppState {
    client: TodoServiceClient<Channel>,
}

impl AppState {
    pub fn new(client: TodoServiceClient<Channel>) -> Self {
        Self { client }
    }
}

/// Builds a client whose channel connects on first use.
pub fn connect_lazy(url: impl Into<String>) -> anyhow::Result<TodoServiceClient<Channel>> {
    let channel = Endpoint::from_shared(url.into())?.connect_lazy();
    Ok(TodoServiceClient::new(channel))
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        description = "REST API wrapping gRPC Todo Service",
        version = "1.0.0"
    ),
    paths(
        health,
        create_todo,
        create_todos_batch,
        list_todos,
        get_todo,
        update_todo,
        delete_todos_batch,
        delete_todo,
    ),
    components(schemas(
        HealthRes,
        TodoCreate,
        TodoUpdate,
        TodoResponse,
        TodoListResponse,
        DeleteResponse,
        TodoCreateBatch,
        TodoDeleteBatch,
        BatchResult,
        BatchResponse,
        ErrorBody,
    )),
    tags(
        (name = "Todos", description = "Operations for managing individual todos"),
        (name = "Batch Operations", description = "Bulk operations for creating or deleting multiple todos at once"),
        (name = "System", description = "Health checks and system information"),
    )
)]
pub struct ApiDoc;

/// Assembles the gateway router with Swagger UI and CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/batch",
            post(create_todos_batch).delete(delete_todos_batch),
        )
        .route(
            "/todos/:todo_id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn to_response(todo: Todo) -> TodoResponse {
    TodoResponse {
        id: todo.id,
        task: todo.task,
    }
}

// Some upstreams answer a miss with an empty message instead of NOT_FOUND.
fn found(todo: Todo) -> ApiResult<TodoResponse> {
    if todo.id == 0 && todo.task.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(to_response(todo))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/todos",
    tag = "Todos",
    request_body = TodoCreate,
    responses(
        (status = 201, description = "Todo created", body = TodoResponse),
        (status = 400, description = "Invalid task", body = ErrorBody),
        (status = 500, description = "gRPC error", body = ErrorBody)
    )
)]
/// Creates a new todo item
#[axum::debug_handler]
async fn create_todo(
    State(state): State<AppState>,
    AppJson(req): AppJson<TodoCreate>,
) -> ApiResult<(StatusCode, Json<TodoResponse>)> {
    tracing::info!("Creating Todo: {}", req.task);
    let mut client = state.client.clone();
    let todo = client
        .add_todo(AddTodoRequest { task: req.task })
        .await?
        .into_inner();
    Ok((StatusCode::CREATED, Json(to_response(todo))))
}

#[utoipa::path(
    post,
    path = "/todos/batch",
    tag = "Batch Operations",
    request_body = TodoCreateBatch,
    responses(
        (status = 201, description = "Batch processed", body = BatchResponse)
    )
)]
/// Creates multiple todo items in a batch
///
/// Every task is sent as its own `AddTodo` call, all in flight at once. Results keep the order
/// of `tasks`; a failed item does not fail the batch.
#[axum::debug_handler]
async fn create_todos_batch(
    State(state): State<AppState>,
    AppJson(batch): AppJson<TodoCreateBatch>,
) -> (StatusCode, Json<BatchResponse>) {
    let calls = batch.tasks.into_iter().map(|task| {
        let mut client = state.client.clone();
        async move { client.add_todo(AddTodoRequest { task }).await }
    });

    let mut results = Vec::new();
    let mut success_count = 0;
    let mut failure_count = 0;
    for outcome in join_all(calls).await {
        match outcome {
            Ok(res) => {
                let todo = res.into_inner();
                results.push(BatchResult::created(todo.id, todo.task));
                success_count += 1;
            }
            Err(status) => {
                tracing::error!("Error creating todo: {}", status.message());
                results.push(BatchResult::failed(status.message().to_string()));
                failure_count += 1;
            }
        }
    }

    (
        StatusCode::CREATED,
        Json(BatchResponse {
            success_count,
            failure_count,
            results,
        }),
    )
}

#[utoipa::path(
    get,
    path = "/todos",
    tag = "Todos",
    responses(
        (status = 200, description = "All todos", body = TodoListResponse),
        (status = 500, description = "gRPC error", body = ErrorBody)
    )
)]
/// Gets all todo items
#[axum::debug_handler]
async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<TodoListResponse>> {
    let mut client = state.client.clone();
    let res = client.list_todos(Empty {}).await?.into_inner();
    tracing::info!("Listing todos...");
    Ok(Json(TodoListResponse {
        todos: res.todos.into_iter().map(to_response).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/todos/{todo_id}",
    tag = "Todos",
    params(("todo_id" = i64, Path, description = "The ID of the todo to retrieve")),
    responses(
        (status = 200, description = "The todo", body = TodoResponse),
        (status = 404, description = "Todo not found", body = ErrorBody),
        (status = 500, description = "gRPC error", body = ErrorBody)
    )
)]
/// Get a specific todo by ID
#[axum::debug_handler]
async fn get_todo(
    State(state): State<AppState>,
    AppPath(todo_id): AppPath<i64>,
) -> ApiResult<Json<TodoResponse>> {
    tracing::info!("Getting Todo ID: {}", todo_id);
    let mut client = state.client.clone();
    let todo = client.get_todo(TodoId { id: todo_id }).await?.into_inner();
    Ok(Json(found(todo)?))
}

#[utoipa::path(
    put,
    path = "/todos/{todo_id}",
    tag = "Todos",
    request_body = TodoUpdate,
    params(("todo_id" = i64, Path, description = "The ID of the todo to update")),
    responses(
        (status = 200, description = "Updated todo", body = TodoResponse),
        (status = 404, description = "Todo not found", body = ErrorBody),
        (status = 500, description = "gRPC error", body = ErrorBody)
    )
)]
/// Update an existing todo
#[axum::debug_handler]
async fn update_todo(
    State(state): State<AppState>,
    AppPath(todo_id): AppPath<i64>,
    AppJson(req): AppJson<TodoUpdate>,
) -> ApiResult<Json<TodoResponse>> {
    tracing::info!("Updating Todo ID: {} with task: {}", todo_id, req.task);
    let mut client = state.client.clone();
    let todo = client
        .edit_todo(EditTodoRequest {
            id: todo_id,
            task: req.task,
        })
        .await?
        .into_inner();
    Ok(Json(found(todo)?))
}

#[utoipa::path(
    delete,
    path = "/todos/batch",
    tag = "Batch Operations",
    request_body = TodoDeleteBatch,
    responses(
        (status = 200, description = "Batch processed", body = BatchResponse)
    )
)]
/// Deletes multiple todo items in a batch
///
/// Unknown ids and failed calls both count as failures. `results` is always empty.
#[axum::debug_handler]
async fn delete_todos_batch(
    State(state): State<AppState>,
    AppJson(batch): AppJson<TodoDeleteBatch>,
) -> Json<BatchResponse> {
    let calls = batch.ids.into_iter().map(|id| {
        let mut client = state.client.clone();
        async move { (id, client.remove_todo(RemoveTodoRequest { id }).await) }
    });

    let mut success_count = 0;
    let mut failure_count = 0;
    for (id, outcome) in join_all(calls).await {
        match outcome {
            Ok(res) if res.get_ref().success => success_count += 1,
            Ok(_) => {
                tracing::info!("Error deleting todo {}: not found", id);
                failure_count += 1;
            }
            Err(status) => {
                tracing::info!("Error deleting todo {}: {}", id, status.message());
                failure_count += 1;
            }
        }
    }

    Json(BatchResponse {
        success_count,
        failure_count,
        results: Vec::new(),
    })
}

#[utoipa::path(
    delete,
    path = "/todos/{todo_id}",
    tag = "Todos",
    params(("todo_id" = i64, Path, description = "The ID of the todo to delete")),
    responses(
        (status = 200, description = "Todo deleted", body = DeleteResponse),
        (status = 404, description = "Todo not found", body = ErrorBody),
        (status = 500, description = "gRPC error", body = ErrorBody)
    )
)]
/// Delete a todo
#[axum::debug_handler]
async fn delete_todo(
    State(state): State<AppState>,
    AppPath(todo_id): AppPath<i64>,
) -> ApiResult<Json<DeleteResponse>> {
    let mut client = state.client.clone();
    let res = client
        .remove_todo(RemoveTodoRequest { id: todo_id })
        .await?
        .into_inner();

    if !res.success {
        return Err(ApiError::NotFound);
    }

    Ok(Json(DeleteResponse {
        success: true,
        message: format!("Todo {todo_id} deleted successfully"),
    }))
}
