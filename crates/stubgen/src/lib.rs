//! # Tutorial Stubgen
//!
//! Regenerates and removes the gRPC stubs of the hello and todo services.
//!
//! Each [`StubTarget`] names a proto directory, the proto files in it, and the exact files a
//! generation run writes. [`generate`] hands the protos to a [`ProtoCompiler`]; [`clean`]
//! deletes the enumerated files and nothing else.
//!
//! ```no_run
//! use std::path::Path;
//! use tutorial_stubgen::{clean, generate, ProtocCompiler, StubTarget};
//!
//! # fn main() -> Result<(), tutorial_stubgen::StubError> {
//! let root = Path::new(".");
//! generate(root, &StubTarget::hello(), &ProtocCompiler::from_env())?;
//! clean(root, &StubTarget::hello())?;
//! # Ok(())
//! # }
//! ```

mod compiler;
mod error;
mod target;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub use compiler::{CompileJob, ProtoCompiler, ProtocCompiler};
pub use error::{StubError, StubResult};
pub use target::StubTarget;

/// Compiles `target`'s protos into its output directory under `root`.
///
/// The output directory is created if missing. Returns the paths of the enumerated generated
/// files that exist afterwards.
pub fn generate(
    root: &Path,
    target: &StubTarget,
    compiler: &dyn ProtoCompiler,
) -> StubResult<Vec<PathBuf>> {
    let proto_dir = root.join(&target.proto_dir);
    let protos: Vec<PathBuf> = target.protos.iter().map(|p| proto_dir.join(p)).collect();
    if let Some(missing) = protos.iter().find(|p| !p.is_file()) {
        return Err(StubError::MissingProto(missing.clone()));
    }

    let out_dir = root.join(&target.out_dir);
    fs::create_dir_all(&out_dir).map_err(|source| StubError::Io {
        path: out_dir.clone(),
        source,
    })?;

    let job = CompileJob {
        protos,
        includes: vec![proto_dir],
        descriptor_path: out_dir.join(target.descriptor_file),
        out_dir: out_dir.clone(),
    };
    compiler.compile(&job)?;

    let written: Vec<PathBuf> = target
        .generated
        .iter()
        .map(|f| out_dir.join(f))
        .filter(|p| p.is_file())
        .collect();
    tracing::info!(
        stub_target = target.name,
        files = written.len(),
        "generated stubs in {}",
        out_dir.display()
    );
    Ok(written)
}

/// Removes `target`'s enumerated generated files under `root`.
///
/// Files that are already absent are skipped. Returns the paths actually removed.
pub fn clean(root: &Path, target: &StubTarget) -> StubResult<Vec<PathBuf>> {
    let out_dir = root.join(&target.out_dir);
    let mut removed = Vec::new();

    for file in &target.generated {
        let path = out_dir.join(file);
        match fs::remove_file(&path) {
            Ok(()) => removed.push(path),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => return Err(StubError::Io { path, source }),
        }
    }

    tracing::info!(
        stub_target = target.name,
        removed = removed.len(),
        "cleaned stubs in {}",
        out_dir.display()
    );
    Ok(removed)
}
