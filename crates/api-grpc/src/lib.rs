//! # API gRPC
//!
//! gRPC server implementation for the tutorial services.
//!
//! Handles:
//! - The `Greeter` service (unary and server-streaming greetings)
//! - The `TodoService` service backed by `tutorial-core` storage
//! - Server assembly, optional reflection and graceful shutdown
//!
//! Uses `api-shared` for the generated protobuf types.

#![warn(rust_2018_idioms)]

pub use greeter::GreeterService;
pub use server::{serve, serve_with_incoming};
pub use service::{pb, todo_status, TodoGrpcService};

pub mod greeter;
pub mod server;
pub mod service;
