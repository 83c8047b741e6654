//! # Tutorial Core
//!
//! Core business logic for the hello and todo services.
//!
//! This crate contains pure data operations:
//! - Todo storage in a local SQLite database with versioned schema migrations
//! - Greeting text for the hello service
//! - Startup configuration
//!
//! **No API concerns**: gRPC servers, the REST gateway, and protobuf types belong in `api-grpc`,
//! `api-rest`, or `api-shared`.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod greeting;
pub mod todos;

pub use config::CoreConfig;
pub use error::{TodoError, TodoResult};
pub use todos::{Todo, TodoService};
