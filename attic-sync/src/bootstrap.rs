//! Repository bootstrap — set up the two-branch topology and run the
//! initial mirror import.
//!
//! Expects a freshly initialized working tree with an `origin` remote
//! configured. Key provisioning, access-control setup and hook wiring are
//! external concerns and happen elsewhere.

use std::path::Path;

use attic_core::{intent, View};
use attic_git::{Gateway, Session};

use crate::controller::INITIAL_SYNC_MARKER;
use crate::error::{io_err, SyncError};
use crate::journal::Journal;
use crate::mirror::{MirrorRequest, MirrorTool};

/// Create the `active` and `archived` branches, push both upstream, and
/// import the mirror's current content onto `active`.
///
/// The archived branch is born as an orphan with an empty tree and never
/// holds the intent file. The initial import runs without
/// delete-on-extraneous and without project exclusions — nothing is
/// archived yet.
pub fn bootstrap<G: Gateway, M: MirrorTool>(
    session: &mut Session<G>,
    mirror: &M,
    mirror_dir: &Path,
    journal: &Journal,
) -> Result<(), SyncError> {
    let intent_path = session.workdir().join(intent::INTENT_FILE);
    if !intent_path.exists() {
        std::fs::write(&intent_path, "").map_err(|e| io_err(&intent_path, e))?;
    }
    session.gateway().stage_all()?;
    session.gateway().commit("initial commit", false)?;

    let default_branch = session.gateway().current_branch()?;
    if default_branch != View::Active.branch() {
        session
            .gateway()
            .rename_branch(&default_branch, View::Active.branch())?;
    }
    session.gateway().push_upstream(View::Active.branch())?;

    // Orphan checkout carries the staged tree along; drop the intent file
    // so the archived branch never holds it.
    session.gateway().checkout_orphan(View::Archived.branch())?;
    std::fs::remove_file(&intent_path).map_err(|e| io_err(&intent_path, e))?;
    session.gateway().stage_all()?;
    session.gateway().commit("empty commit", true)?;
    session.gateway().push_upstream(View::Archived.branch())?;

    session.enter(View::Active)?;

    tracing::info!("initial import <- {}", mirror_dir.display());
    let report = mirror.one_way(&MirrorRequest {
        source: mirror_dir,
        dest: session.workdir(),
        delete_extraneous: false,
        excludes: &[],
    })?;
    journal.append(&report)?;

    session.gateway().stage_all()?;
    if session.gateway().has_staged_changes()? {
        session.gateway().commit(INITIAL_SYNC_MARKER, false)?;
        session.gateway().push_all()?;
    }
    Ok(())
}
