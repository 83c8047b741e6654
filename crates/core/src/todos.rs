//! Todo persistence on top of the `todo` table.
//!
//! Ids come from SQLite `AUTOINCREMENT`, so they increase monotonically and are never reused
//! after a delete.

use crate::db::{open_db, open_db_in_memory};
use crate::{TodoError, TodoResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// A stored todo item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub task: String,
}

/// Todo data operations - no API concerns.
///
/// Cloning is cheap; all clones share one connection, so operations are serialised.
#[derive(Clone)]
pub struct TodoService {
    conn: Arc<Mutex<Connection>>,
}

impl TodoService {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> TodoResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Creates a service over a fresh in-memory database.
    pub fn in_memory() -> TodoResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn lock(&self) -> TodoResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| TodoError::LockPoisoned)
    }

    /// Stores a new todo and returns it with its assigned id.
    pub fn add(&self, task: &str) -> TodoResult<Todo> {
        validate_task(task)?;
        let conn = self.lock()?;
        conn.execute("INSERT INTO todo (task) VALUES (?1);", params![task])?;
        let todo = Todo {
            id: conn.last_insert_rowid(),
            task: task.to_string(),
        };
        tracing::info!(todo_id = todo.id, "todo added");
        Ok(todo)
    }

    /// Replaces the task text of an existing todo.
    ///
    /// # Errors
    /// Returns `TodoError::NotFound` if no todo has the given id.
    pub fn edit(&self, id: i64, task: &str) -> TodoResult<Todo> {
        validate_task(task)?;
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE todo SET task = ?2 WHERE id = ?1;",
            params![id, task],
        )?;
        if changed == 0 {
            return Err(TodoError::NotFound(id));
        }
        tracing::info!(todo_id = id, "todo edited");
        Ok(Todo {
            id,
            task: task.to_string(),
        })
    }

    /// Fetches one todo by id.
    pub fn get(&self, id: i64) -> TodoResult<Todo> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, task FROM todo WHERE id = ?1;",
            params![id],
            |row| {
                Ok(Todo {
                    id: row.get(0)?,
                    task: row.get(1)?,
                })
            },
        )
        .optional()?
        .ok_or(TodoError::NotFound(id))
    }

    /// Lists all todos ordered by id.
    pub fn list(&self) -> TodoResult<Vec<Todo>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, task FROM todo ORDER BY id;")?;
        let todos = stmt
            .query_map([], |row| {
                Ok(Todo {
                    id: row.get(0)?,
                    task: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(todos)
    }

    /// Deletes a todo. Returns `false` when there was nothing to delete.
    pub fn remove(&self, id: i64) -> TodoResult<bool> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM todo WHERE id = ?1;", params![id])? > 0;
        if removed {
            tracing::info!(todo_id = id, "todo removed");
        } else {
            tracing::debug!(todo_id = id, "remove requested for missing todo");
        }
        Ok(removed)
    }
}

fn validate_task(task: &str) -> TodoResult<()> {
    if task.trim().is_empty() {
        return Err(TodoError::InvalidInput("task cannot be empty".into()));
    }
    Ok(())
}
