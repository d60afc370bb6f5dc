//! Archive reconciler.
//!
//! Restores the partition invariant: the active branch holds exactly the
//! projects not named by the intent file, the archived branch holds
//! exactly the ones that are. Both move directions use the same two-phase
//! sequence — copy-then-commit on the destination branch strictly before
//! delete-then-commit on the source — so content always exists in the
//! destination's history before it vanishes from the source.
//!
//! The whole sequence is safely re-runnable: move sets are recomputed from
//! the current intent file and working-tree listings every time, and an
//! unchanged state produces zero commits.

use std::collections::BTreeSet;
use std::path::Path;

use attic_core::{intent, ProjectName, View};
use attic_git::{Gateway, Session};

use crate::error::{io_err, SyncError};

/// What a reconciliation run did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Projects moved active → archived, sorted.
    pub archived: Vec<ProjectName>,
    /// Projects moved archived → active, sorted.
    pub activated: Vec<ProjectName>,
    /// Whether `push --all` ran (any move happened).
    pub pushed: bool,
}

impl ReconcileOutcome {
    pub fn is_noop(&self) -> bool {
        self.archived.is_empty() && self.activated.is_empty()
    }
}

/// Reconcile both branch views against the intent file.
///
/// Leaves the active view checked out on success. On failure the working
/// tree stays on whichever branch was current at the failure point; no
/// partial-failure recovery is attempted and re-running is the designed
/// remedy.
pub fn reconcile<G: Gateway>(session: &mut Session<G>) -> Result<ReconcileOutcome, SyncError> {
    session.gateway().fetch_all()?;
    session.gateway().pull_all()?;

    session.enter(View::Active)?;
    let intended = intent::read_at(session.workdir())?;

    session.enter(View::Archived)?;
    let actual: BTreeSet<ProjectName> = session
        .gateway()
        .list_working_tree()?
        .into_iter()
        .map(ProjectName::from)
        .collect();

    let to_archive: Vec<ProjectName> = intended.difference(&actual).cloned().collect();
    let to_activate: Vec<ProjectName> = actual.difference(&intended).cloned().collect();
    tracing::info!("projects to archive: {to_archive:?}");
    tracing::info!("projects to activate: {to_activate:?}");

    move_projects(session, &to_archive, View::Archived)?;
    move_projects(session, &to_activate, View::Active)?;

    session.enter(View::Active)?;

    let pushed = !(to_archive.is_empty() && to_activate.is_empty());
    if pushed {
        session.gateway().push_all()?;
    }

    Ok(ReconcileOutcome {
        archived: to_archive,
        activated: to_activate,
        pushed,
    })
}

/// Move `names` into the `dest` view (their content comes from the
/// opposite view). No-op on an empty set.
fn move_projects<G: Gateway>(
    session: &mut Session<G>,
    names: &[ProjectName],
    dest: View,
) -> Result<(), SyncError> {
    if names.is_empty() {
        return Ok(());
    }
    let source = dest.other();
    let message = move_message(dest, names);

    // Phase 1: materialize on the destination and commit.
    session.enter(dest)?;
    let paths: Vec<String> = names.iter().map(|n| n.0.clone()).collect();
    session.gateway().checkout_paths(source.branch(), &paths)?;
    session.gateway().stage_all()?;
    session.gateway().commit(&message, false)?;

    // Phase 2: delete from the source and commit with the same message.
    session.enter(source)?;
    for name in names {
        remove_entry(&session.workdir().join(&name.0))?;
    }
    session.gateway().stage_all()?;
    session.gateway().commit(&message, false)?;
    Ok(())
}

/// `[ARCHIVED] name1, name2` / `[ACTIVATED] name1, name2`.
fn move_message(dest: View, names: &[ProjectName]) -> String {
    let joined = names
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}] {joined}", dest.move_tag())
}

fn remove_entry(path: &Path) -> Result<(), SyncError> {
    if path.is_dir() {
        std::fs::remove_dir_all(path).map_err(|e| io_err(path, e))
    } else {
        std::fs::remove_file(path).map_err(|e| io_err(path, e))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
