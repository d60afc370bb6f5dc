//! The version-control gateway contract and its `git` CLI implementation.
//!
//! Only call sequencing and commit-message conventions are owned by the
//! sync algorithms; everything below the [`Gateway`] trait is replaceable,
//! which is what the test fakes rely on.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::GitError;

/// Primitives the sync core consumes from the version-control system.
///
/// The working-tree listing is deliberately filesystem-derived (top-level
/// names minus `.git`), not reconstructed from persisted metadata — the
/// actual set of projects in a view is whatever the checked-out tree shows.
pub trait Gateway {
    /// Root of the working tree all operations run in.
    fn workdir(&self) -> &Path;

    fn fetch_all(&self) -> Result<(), GitError>;
    fn pull_all(&self) -> Result<(), GitError>;

    /// Switch the working tree to `branch`.
    fn checkout(&self, branch: &str) -> Result<(), GitError>;

    /// Materialize `paths` from `branch` into the current working tree
    /// without switching branches. Restored paths end up staged.
    fn checkout_paths(&self, branch: &str, paths: &[String]) -> Result<(), GitError>;

    /// Create and switch to an orphan branch (no parent history).
    fn checkout_orphan(&self, branch: &str) -> Result<(), GitError>;

    fn stage_all(&self) -> Result<(), GitError>;
    fn has_staged_changes(&self) -> Result<bool, GitError>;
    fn commit(&self, message: &str, allow_empty: bool) -> Result<(), GitError>;

    fn push_all(&self) -> Result<(), GitError>;
    /// Push `branch` and set its upstream tracking ref.
    fn push_upstream(&self, branch: &str) -> Result<(), GitError>;

    fn current_branch(&self) -> Result<String, GitError>;
    fn rename_branch(&self, old: &str, new: &str) -> Result<(), GitError>;

    /// Top-level working-tree entries, minus version-control metadata.
    fn list_working_tree(&self) -> Result<BTreeSet<String>, GitError>;
}

// ---------------------------------------------------------------------------
// GitCli
// ---------------------------------------------------------------------------

/// [`Gateway`] implementation that shells out to the `git` binary.
///
/// Every invocation runs with the repository as its working directory and
/// with `GIT_DIR` removed from the environment — the ambient `GIT_DIR` of
/// hook contexts must never leak into these calls.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.workdir).env_remove("GIT_DIR");
        cmd
    }

    /// Run `git <args>`, capturing output; non-zero exit is an error.
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        tracing::debug!("git {}", args.join(" "));
        let output = self.command().args(args).output().map_err(GitError::Spawn)?;
        if !output.status.success() {
            return Err(GitError::Command {
                args: args.join(" "),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Gateway for GitCli {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn fetch_all(&self) -> Result<(), GitError> {
        self.run(&["fetch", "--all"]).map(drop)
    }

    fn pull_all(&self) -> Result<(), GitError> {
        self.run(&["pull", "--all"]).map(drop)
    }

    fn checkout(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["checkout", branch]).map(drop)
    }

    fn checkout_paths(&self, branch: &str, paths: &[String]) -> Result<(), GitError> {
        let mut args = vec!["checkout", branch, "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run(&args).map(drop)
    }

    fn checkout_orphan(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["checkout", "--orphan", branch]).map(drop)
    }

    fn stage_all(&self) -> Result<(), GitError> {
        self.run(&["add", "--all"]).map(drop)
    }

    fn has_staged_changes(&self) -> Result<bool, GitError> {
        // Plumbing instead of scraping porcelain status text: exit 1 means
        // the index differs from HEAD.
        let args = ["diff", "--cached", "--quiet"];
        let output = self.command().args(args).output().map_err(GitError::Spawn)?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(GitError::Command {
                args: args.join(" "),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }

    fn commit(&self, message: &str, allow_empty: bool) -> Result<(), GitError> {
        let mut args = vec!["commit", "-m", message];
        if allow_empty {
            args.push("--allow-empty");
        }
        self.run(&args).map(drop)
    }

    fn push_all(&self) -> Result<(), GitError> {
        self.run(&["push", "--all"]).map(drop)
    }

    fn push_upstream(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["push", "-u", "origin", branch]).map(drop)
    }

    fn current_branch(&self) -> Result<String, GitError> {
        Ok(self
            .run(&["symbolic-ref", "--short", "HEAD"])?
            .trim()
            .to_string())
    }

    fn rename_branch(&self, old: &str, new: &str) -> Result<(), GitError> {
        self.run(&["branch", "-m", old, new]).map(drop)
    }

    fn list_working_tree(&self) -> Result<BTreeSet<String>, GitError> {
        let entries = std::fs::read_dir(&self.workdir).map_err(GitError::ListWorkingTree)?;
        let mut names = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(GitError::ListWorkingTree)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name != ".git" {
                names.insert(name);
            }
        }
        Ok(names)
    }
}
