use super::migrations::apply_migrations;
use super::DbResult;
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite database file, creating it if needed, and applies all pending migrations.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let mut conn = Connection::open(path).inspect_err(|err| {
        tracing::error!(path = %path.display(), error = %err, "failed to open todo database");
    })?;
    bootstrap_connection(&mut conn).inspect_err(|err| {
        tracing::error!(path = %path.display(), error = %err, "failed to bootstrap todo database");
    })?;

    tracing::info!(
        path = %path.display(),
        duration_ms = started_at.elapsed().as_millis() as u64,
        "todo database ready"
    );
    Ok(conn)
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let mut conn = Connection::open_in_memory()?;
    bootstrap_connection(&mut conn)?;
    tracing::debug!("in-memory todo database ready");
    Ok(conn)
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}
