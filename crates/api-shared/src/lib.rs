//! # API Shared
//!
//! Shared utilities and definitions for the tutorial APIs.
//!
//! Contains:
//! - Protobuf-generated types and stubs (`pb` module) for the hello and todo services
//! - Shared services like `HealthService`
//!
//! Used by `api-grpc`, `api-rest` and the CLI for common functionality.

// Re-export the generated protobuf modules. The generated code will be placed
// into OUT_DIR at build time by the build script.
pub mod pb {
    pub mod hello {
        tonic::include_proto!("hello");
    }

    pub mod todo {
        pub mod messages {
            tonic::include_proto!("todo.messages");
        }

        pub mod service {
            tonic::include_proto!("todo.service");
        }
    }
}

pub mod health;

pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("proto_descriptor");

pub use health::{HealthRes, HealthService};
