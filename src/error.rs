use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Failures raised while locating and reading package sources.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("package directory '{}' does not exist or is not a directory", .0.display())]
    RootNotFound(PathBuf),

    #[error("no source file found for package '{package}' in {}", .dir.display())]
    PackageFileNotFound { package: String, dir: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Whether the run can continue after dropping the affected package.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ScanError::RootNotFound(_))
    }
}

/// Failures raised while handing a graph to Graphviz.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(
        "Graphviz `{tool}` executable not found; install Graphviz or rerun with --dot-only"
    )]
    ToolUnavailable { tool: String },

    #[error("`{tool}` exited with {status}: {stderr}")]
    Failed {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

