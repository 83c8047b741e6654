//! SQLite storage bootstrap and schema migrations for the todo store.
//!
//! Migration version is tracked via `PRAGMA user_version`; nothing reads or writes todo rows
//! before migrations succeed.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

pub type DbResult<T> = std::result::Result<T, DbError>;
