//! Error types for attic-git.

use std::process::ExitStatus;

use thiserror::Error;

/// All errors that can arise from gateway operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// The `git` binary could not be spawned at all.
    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    /// A `git` invocation exited non-zero. Carries the subcommand line and
    /// captured stderr; callers abort immediately, no retry.
    #[error("`git {args}` failed ({status}): {stderr}")]
    Command {
        args: String,
        status: ExitStatus,
        stderr: String,
    },

    /// Working-tree listing failed (I/O on the repository directory).
    #[error("failed to list working tree: {0}")]
    ListWorkingTree(#[source] std::io::Error),
}
