use crate::db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("todo {0} not found")]
    NotFound(i64),
    #[error("database error: {0}")]
    Database(#[from] DbError),
    #[error("todo store lock poisoned")]
    LockPoisoned,
}

impl From<rusqlite::Error> for TodoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Database(DbError::Sqlite(value))
    }
}

pub type TodoResult<T> = std::result::Result<T, TodoError>;
