use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use tutorial_core::TodoService;

use api_rest::{app, connect_lazy, AppState};

/// Starts an in-process gRPC server over an in-memory store and returns a gateway router
/// pointed at it.
async fn gateway() -> Router {
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

    let client = connect_lazy(format!("http://{addr}")).unwrap();
    app(AppState::new(client))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let res = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_healthy() {
    let app = gateway().await;
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "service": "todo-api"}));
}

#[tokio::test]
async fn create_get_update_delete_round_trip() {
    let app = gateway().await;

    let (status, created) = send(&app, "POST", "/todos", Some(json!({"task": "Buy groceries"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["task"], "Buy groceries");
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/todos/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/todos/{id}"),
        Some(json!({"task": "Buy more groceries"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({"id": id, "task": "Buy more groceries"}));

    let (status, listed) = send(&app, "GET", "/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!({"todos": [updated]}));

    let (status, deleted) = send(&app, "DELETE", &format!("/todos/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        deleted,
        json!({"success": true, "message": format!("Todo {id} deleted successfully")})
    );

    let (status, _) = send(&app, "GET", &format!("/todos/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_todo_is_404_with_detail() {
    let app = gateway().await;

    let (status, body) = send(&app, "GET", "/todos/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Todo not found"}));

    let (status, _) = send(&app, "PUT", "/todos/999", Some(json!({"task": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/todos/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_task_is_bad_request() {
    let app = gateway().await;
    let (status, body) = send(&app, "POST", "/todos", Some(json!({"task": "  "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "task cannot be empty"}));
}

#[tokio::test]
async fn malformed_requests_get_json_detail_bodies() {
    let app = gateway().await;

    let (status, body) = send(&app, "GET", "/todos/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()), "{body}");

    let (status, body) = send(&app, "POST", "/todos", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().is_some_and(|d| d.contains("task")), "{body}");

    let (status, body) = send(&app, "PUT", "/todos/1", None).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body["detail"].is_string(), "{body}");
}

#[tokio::test]
async fn batch_create_reports_each_task_in_order() {
    let app = gateway().await;

    let (status, body) = send(
        &app,
        "POST",
        "/todos/batch",
        Some(json!({"tasks": ["Task 1", "", "Task 3"]})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success_count"], 2);
    assert_eq!(body["failure_count"], 1);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["task"], "Task 1");
    assert_eq!(results[1]["success"], false);
    assert!(results[1]["error"].as_str().unwrap().contains("task cannot be empty"));
    assert_eq!(results[2]["task"], "Task 3");

    let (_, listed) = send(&app, "GET", "/todos", None).await;
    assert_eq!(listed["todos"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn batch_delete_counts_unknown_ids_as_failures() {
    let app = gateway().await;

    let (_, a) = send(&app, "POST", "/todos", Some(json!({"task": "a"}))).await;
    let (_, b) = send(&app, "POST", "/todos", Some(json!({"task": "b"}))).await;

    let (status, body) = send(
        &app,
        "DELETE",
        "/todos/batch",
        Some(json!({"ids": [a["id"], b["id"], 12345]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success_count": 2, "failure_count": 1, "results": []})
    );

    let (_, listed) = send(&app, "GET", "/todos", None).await;
    assert_eq!(listed, json!({"todos": []}));
}

#[tokio::test]
async fn openapi_document_lists_todo_paths() {
    let app = gateway().await;
    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Todo API");
    assert!(doc["paths"]["/todos/{todo_id}"].is_object());
    assert!(doc["paths"]["/todos/batch"]["delete"].is_object());
}
