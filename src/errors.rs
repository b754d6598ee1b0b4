use std::io;
use std::path::PathBuf;

use imageapi::ImageApiError;
use thiserror::Error;

/// Error type for a render run: fatal startup failures plus the per-record
/// failures the orchestrator logs and steps past.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("missing credential: environment variable {0} is not set")]
    Configuration(String),
    #[error("could not find prompt document {}", .0.display())]
    NotFound(PathBuf),
    #[error(transparent)]
    Image(#[from] ImageApiError),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RunError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RunError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the failures that abort a run before any record is processed.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RunError::Configuration(_) | RunError::NotFound(_))
    }
}
