use std::path::PathBuf;
use thiserror::Error;

use crate::core::BuildError;

/// Errors that can occur while locating, loading or watching the rc file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The rc file does not exist and could not be created.
    #[error("Could not find or create rc file: {}", .0.display())]
    SourceUnavailable(PathBuf),
    /// The rc file exists but does not compile.
    #[error("Config is malformed: {0}")]
    Malformed(#[from] BuildError),
    /// Writing the template failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),
    /// The host could not open the rc file.
    #[error("Failed to open {}: {message}", .path.display())]
    OpenFailed { path: PathBuf, message: String },
    /// The file watcher could not be started.
    #[error("Failed to watch rc file: {0}")]
    Watch(String),
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
