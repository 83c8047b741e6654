//! Build script for the `api-shared` crate.
//!
//! ## Purpose
//! Generates Rust protobuf types and service stubs from the hello and todo `.proto` files and
//! emits a file-descriptor set.
//!
//! ## Intended use
//! The generated types are shared by the gRPC server, the REST gateway and the CLI client. The
//! descriptor set is used for gRPC reflection.

use std::path::{Path, PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The crate lives in `<repo>/crates/api-shared`, the proto sources sit at the repo root.
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let repo_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(Path::to_path_buf)
        .ok_or("could not determine repository root from CARGO_MANIFEST_DIR")?;

    let hello_dir = repo_root.join("helloService");
    let todo_dir = repo_root.join("todoService").join("protos");
    let proto_files: Vec<PathBuf> = vec![
        hello_dir.join("hello.proto"),
        todo_dir.join("todo_messages.proto"),
        todo_dir.join("todo_service.proto"),
    ];

    for proto in &proto_files {
        if !proto.exists() {
            return Err(format!("proto file not found: {}", proto.display()).into());
        }
        println!("cargo:rerun-if-changed={}", proto.display());
    }

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .file_descriptor_set_path(Path::new(&std::env::var("OUT_DIR")?).join("proto_descriptor.bin"))
        .compile_protos(proto_files.as_slice(), &[hello_dir, todo_dir])?;

    Ok(())
}
