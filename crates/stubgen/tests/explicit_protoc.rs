//! A compiler built with an explicit `protoc` path must not go looking for another one.
//!
//! Kept in its own test binary: it rewrites `PATH` for the whole process.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;

use tempfile::TempDir;
use tutorial_stubgen::{generate, ProtocCompiler, StubTarget};

/// Logs every invocation and writes an empty descriptor set wherever one is requested.
const RECORDING_PROTOC: &str = r#"#!/bin/sh
echo "$*" >> "@LOG@"
next=
for arg in "$@"; do
  if [ -n "$next" ]; then : > "$arg"; next=; continue; fi
  case "$arg" in
  --descriptor_set_out=*) : > "${arg#--descriptor_set_out=}" ;;
  -o) next=1 ;;
  esac
done
"#;

#[test]
fn explicit_protoc_serves_both_compiler_steps() {
    let temp = TempDir::new().unwrap();
    let target = StubTarget::hello();
    let proto_dir = temp.path().join(&target.proto_dir);
    fs::create_dir_all(&proto_dir).unwrap();
    fs::write(proto_dir.join("hello.proto"), "syntax = \"proto3\";\n").unwrap();

    let bin_dir = temp.path().join("bin");
    fs::create_dir_all(&bin_dir).unwrap();
    let log = bin_dir.join("calls.log");
    let script = bin_dir.join("protoc-custom");
    fs::write(
        &script,
        RECORDING_PROTOC.replace("@LOG@", &log.display().to_string()),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    std::env::set_var("PATH", temp.path().join("empty-path"));
    std::env::remove_var("PROTOC");
    std::env::remove_var("PROTOC_INCLUDE");

    let written = generate(temp.path(), &target, &ProtocCompiler::new(&script)).unwrap();

    let calls = fs::read_to_string(&log).unwrap();
    assert_eq!(calls.lines().count(), 2, "{calls}");
    assert!(written.iter().any(|p| p.ends_with("hello_descriptor.bin")));
}
