use std::path::PathBuf;

/// Errors that can occur while generating or removing stubs
#[derive(Debug, thiserror::Error)]
pub enum StubError {
    /// A proto file named by the target does not exist
    #[error("proto file not found: {}", .0.display())]
    MissingProto(PathBuf),

    /// The protocol compiler could not be started
    #[error("failed to run protocol compiler `{program}`: {source}")]
    CompilerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The protocol compiler ran and exited unsuccessfully
    #[error("protocol compiler exited with status {code}: {stderr}")]
    CompilerExited { code: i32, stderr: String },

    /// Rust stub rendering failed
    #[error("failed to render Rust stubs: {0}")]
    Codegen(std::io::Error),

    /// I/O error while preparing or cleaning the output directory
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StubError {
    /// Exit code a command-line caller should report for this error.
    ///
    /// A compiler failure passes the child's own code through; everything else is `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            StubError::CompilerExited { code, .. } => *code,
            _ => 1,
        }
    }
}

pub type StubResult<T> = std::result::Result<T, StubError>;
