//! Error types for attic-sync.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use attic_core::CoreError;
use attic_git::GitError;

/// All errors that can arise from sync operations.
///
/// Every failure is fatal for the invocation it occurs in: nothing is
/// retried and no partial rollback is attempted. Recovery is re-running
/// the affected flow, which recomputes its state from the repository.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the core layer (intent file, config).
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// An error from the version-control gateway.
    #[error("git error: {0}")]
    Git(#[from] GitError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mirror tool could not be spawned at all.
    #[error("failed to run mirror tool: {0}")]
    MirrorSpawn(#[source] std::io::Error),

    /// The mirror tool exited non-zero.
    #[error("mirror tool failed ({status}): {stderr}")]
    Mirror { status: ExitStatus, stderr: String },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
