//! The external protocol compiler seam.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{StubError, StubResult};

/// Everything one compiler run needs. Paths are absolute or relative to the process cwd.
#[derive(Debug, Clone)]
pub struct CompileJob {
    pub protos: Vec<PathBuf>,
    pub includes: Vec<PathBuf>,
    pub out_dir: PathBuf,
    pub descriptor_path: PathBuf,
}

/// Turns proto files into stub files.
pub trait ProtoCompiler {
    fn compile(&self, job: &CompileJob) -> StubResult<()>;
}

/// Runs `protoc` as a child process, then renders tonic stubs into the output directory.
///
/// `protoc` is located the way `prost-build` locates it: `$PROTOC`, else `protoc` on `PATH`.
/// The same executable drives both the descriptor set and the stub rendering.
#[derive(Debug, Clone)]
pub struct ProtocCompiler {
    protoc: PathBuf,
}

impl ProtocCompiler {
    pub fn new(protoc: impl Into<PathBuf>) -> Self {
        Self {
            protoc: protoc.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(prost_build::protoc_from_env())
    }

    pub fn protoc(&self) -> &Path {
        &self.protoc
    }

    fn write_descriptor_set(&self, job: &CompileJob) -> StubResult<()> {
        let mut cmd = Command::new(&self.protoc);
        cmd.arg("--include_imports")
            .arg(format!("--descriptor_set_out={}", job.descriptor_path.display()));
        for include in &job.includes {
            cmd.arg(format!("--proto_path={}", include.display()));
        }
        cmd.args(&job.protos);

        tracing::debug!(command = ?cmd, "running protocol compiler");
        let output = cmd.output().map_err(|source| StubError::CompilerSpawn {
            program: self.protoc.display().to_string(),
            source,
        })?;

        if !output.status.success() {
            return Err(StubError::CompilerExited {
                code: output.status.code().unwrap_or(1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ProtocCompiler {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ProtoCompiler for ProtocCompiler {
    fn compile(&self, job: &CompileJob) -> StubResult<()> {
        self.write_descriptor_set(job)?;

        let mut config = prost_build::Config::new();
        config.protoc_executable(self.protoc.clone());

        let rendered = tonic_build::configure()
            .build_server(true)
            .build_client(true)
            .emit_rerun_if_changed(false)
            .out_dir(&job.out_dir)
            .compile_protos_with_config(config, job.protos.as_slice(), job.includes.as_slice());

        if let Err(source) = rendered {
            discard_descriptor(&job.descriptor_path);
            return Err(StubError::Codegen(source));
        }
        Ok(())
    }
}

/// A failed run must not leave a half-finished target behind.
fn discard_descriptor(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("could not remove {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_protoc_is_a_spawn_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let compiler = ProtocCompiler::new(temp.path().join("no-such-protoc"));
        let job = CompileJob {
            protos: vec![temp.path().join("x.proto")],
            includes: vec![temp.path().to_path_buf()],
            out_dir: temp.path().to_path_buf(),
            descriptor_path: temp.path().join("x.bin"),
        };

        let err = compiler.compile(&job).unwrap_err();
        assert!(matches!(err, StubError::CompilerSpawn { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    /// Writes an empty descriptor set when asked for one by `--descriptor_set_out`, then
    /// fails the rendering step, which asks for its descriptor with `-o`.
    #[cfg(unix)]
    #[test]
    fn failed_rendering_discards_the_descriptor_set() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let script = temp.path().join("protoc");
        fs::write(
            &script,
            "#!/bin/sh\n\
             for arg in \"$@\"; do\n\
             case \"$arg\" in\n\
             --descriptor_set_out=*) : > \"${arg#--descriptor_set_out=}\" ;;\n\
             -o) echo 'rendering refused' >&2; exit 7 ;;\n\
             esac\n\
             done\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let job = CompileJob {
            protos: vec![temp.path().join("x.proto")],
            includes: vec![temp.path().to_path_buf()],
            out_dir: temp.path().to_path_buf(),
            descriptor_path: temp.path().join("x.bin"),
        };

        let err = ProtocCompiler::new(&script).compile(&job).unwrap_err();
        assert!(matches!(err, StubError::Codegen(_)), "{err}");
        assert!(!job.descriptor_path.exists());
    }
}
