// Re-export the proto module from the shared `api-shared` crate so callers
// can reference `api_grpc::pb`.
pub use api_shared::pb;

use api_shared::pb::todo::messages::{
    AddTodoRequest, EditTodoRequest, Empty, RemoveTodoRequest, Todo, TodoId,
};
use api_shared::pb::todo::service::{
    todo_service_server::TodoService, ListTodosResponse, RemoveTodoResponse,
};
use tonic::{Request, Response, Status};
use tutorial_core::{TodoError, TodoService as TodoStore};

/// Maps a core error onto the gRPC status the gateway and clients expect.
pub fn todo_status(err: TodoError) -> Status {
    match err {
        TodoError::NotFound(_) => Status::not_found("Todo not found"),
        TodoError::InvalidInput(msg) => Status::invalid_argument(msg),
        other => {
            tracing::error!(error = %other, "todo store failure");
            Status::internal(other.to_string())
        }
    }
}

fn to_pb(todo: tutorial_core::Todo) -> Todo {
    Todo {
        id: todo.id,
        task: todo.task,
    }
}

/// Implements the `TodoService` RPCs over the core todo store.
#[derive(Clone)]
pub struct TodoGrpcService {
    todos: TodoStore,
}

impl TodoGrpcService {
    pub fn new(todos: TodoStore) -> Self {
        Self { todos }
    }
}

#[tonic::async_trait]
impl TodoService for TodoGrpcService {
    async fn add_todo(&self, req: Request<AddTodoRequest>) -> Result<Response<Todo>, Status> {
        let req = req.into_inner();
        let todo = self.todos.add(&req.task).map_err(todo_status)?;
        Ok(Response::new(to_pb(todo)))
    }

    async fn edit_todo(&self, req: Request<EditTodoRequest>) -> Result<Response<Todo>, Status> {
        let req = req.into_inner();
        let todo = self.todos.edit(req.id, &req.task).map_err(todo_status)?;
        Ok(Response::new(to_pb(todo)))
    }

    async fn get_todo(&self, req: Request<TodoId>) -> Result<Response<Todo>, Status> {
        let todo = self.todos.get(req.into_inner().id).map_err(todo_status)?;
        Ok(Response::new(to_pb(todo)))
    }

    async fn list_todos(
        &self,
        _req: Request<Empty>,
    ) -> Result<Response<ListTodosResponse>, Status> {
        let todos = self.todos.list().map_err(todo_status)?;
        tracing::debug!(count = todos.len(), "list_todos");
        Ok(Response::new(ListTodosResponse {
            todos: todos.into_iter().map(to_pb).collect(),
        }))
    }

    async fn remove_todo(
        &self,
        req: Request<RemoveTodoRequest>,
    ) -> Result<Response<RemoveTodoResponse>, Status> {
        let success = self
            .todos
            .remove(req.into_inner().id)
            .map_err(todo_status)?;
        Ok(Response::new(RemoveTodoResponse { success }))
    }
}
