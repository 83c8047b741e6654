//! Constants used throughout the tutorial core crate.

/// Default SQLite database file for the todo store, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "todos.db";

/// Number of replies produced by the streaming greeting.
pub const HELLO_STREAM_LEN: u32 = 5;

/// Default gRPC listen address.
pub const DEFAULT_GRPC_ADDR: &str = "0.0.0.0:50051";

/// Default REST gateway listen address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:8000";

/// Default upstream the gateway and the hello client dial.
pub const DEFAULT_GRPC_URL: &str = "http://localhost:50051";
