//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into services, so request
//! handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_DB_PATH, DEFAULT_GRPC_ADDR, DEFAULT_GRPC_URL, DEFAULT_REST_ADDR};
use std::path::{Path, PathBuf};

/// Environment variable naming the todo database file.
pub const DB_PATH_ENV: &str = "TODO_DB_PATH";
/// Environment variable for the gRPC listen address.
pub const GRPC_ADDR_ENV: &str = "TUTORIAL_GRPC_ADDR";
/// Environment variable for the REST listen address.
pub const REST_ADDR_ENV: &str = "TUTORIAL_REST_ADDR";
/// Environment variable for the gateway's gRPC upstream.
pub const GRPC_URL_ENV: &str = "TUTORIAL_GRPC_URL";
/// Environment variable toggling gRPC server reflection.
pub const REFLECTION_ENV: &str = "TUTORIAL_ENABLE_REFLECTION";

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    db_path: PathBuf,
}

impl CoreConfig {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Reads `TODO_DB_PATH`, falling back to `todos.db` in the working directory.
    pub fn from_env() -> Self {
        Self::new(db_path_from_env_value(std::env::var(DB_PATH_ENV).ok()))
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

/// Parse the database path from an optional string value.
///
/// `None` or a blank value yields the default path.
pub fn db_path_from_env_value(value: Option<String>) -> PathBuf {
    non_blank(value)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
}

/// Reads a string setting, falling back to `default` when unset or blank.
pub fn string_from_env(key: &str, default: &str) -> String {
    non_blank(std::env::var(key).ok()).unwrap_or_else(|| default.to_string())
}

pub fn grpc_addr_from_env() -> String {
    string_from_env(GRPC_ADDR_ENV, DEFAULT_GRPC_ADDR)
}

pub fn rest_addr_from_env() -> String {
    string_from_env(REST_ADDR_ENV, DEFAULT_REST_ADDR)
}

pub fn grpc_url_from_env() -> String {
    string_from_env(GRPC_URL_ENV, DEFAULT_GRPC_URL)
}

/// Interprets a boolean flag value; only `true` (any case) enables it.
pub fn flag_from_env_value(value: Option<String>) -> bool {
    non_blank(value).is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

pub fn reflection_enabled_from_env() -> bool {
    flag_from_env_value(std::env::var(REFLECTION_ENV).ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_path_defaults_when_missing_or_blank() {
        assert_eq!(db_path_from_env_value(None), PathBuf::from("todos.db"));
        assert_eq!(
            db_path_from_env_value(Some("  ".into())),
            PathBuf::from("todos.db")
        );
        assert_eq!(
            db_path_from_env_value(Some("/tmp/x.db".into())),
            PathBuf::from("/tmp/x.db")
        );
    }

    #[test]
    fn only_true_enables_flag() {
        assert!(flag_from_env_value(Some("TRUE".into())));
        assert!(flag_from_env_value(Some(" true ".into())));
        assert!(!flag_from_env_value(Some("1".into())));
        assert!(!flag_from_env_value(None));
    }
}
