//! JSON request and response bodies of the REST gateway.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TodoCreate {
    #[schema(example = "Buy groceries")]
    pub task: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TodoUpdate {
    pub task: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoResponse {
    pub id: i64,
    pub task: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TodoListResponse {
    pub todos: Vec<TodoResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TodoCreateBatch {
    #[schema(example = json!(["Task 1", "Task 2"]))]
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TodoDeleteBatch {
    #[schema(example = json!([1, 2, 3]))]
    pub ids: Vec<i64>,
}

/// Outcome of one item in a batch create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchResult {
    pub fn created(id: i64, task: String) -> Self {
        Self {
            success: true,
            id: Some(id),
            task: Some(task),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            id: None,
            task: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchResponse {
    pub success_count: usize,
    pub failure_count: usize,
    pub results: Vec<BatchResult>,
}

/// Error body, `{"detail": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}
