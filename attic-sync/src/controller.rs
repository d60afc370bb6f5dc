//! Mirror sync controller — pull-from-mirror and push-to-mirror flows.
//!
//! Both directions run with the active view checked out and exclude
//! version-control metadata, the intent file, and every intended-archive
//! project. The intended data flow is repository → mirror; a pull that
//! finds staged changes has therefore observed an out-of-band mirror edit.

use std::path::Path;

use attic_core::{intent, View};
use attic_git::{Gateway, Session};

use crate::error::SyncError;
use crate::journal::Journal;
use crate::mirror::{MirrorRequest, MirrorTool};

/// Commit marker for anomalous mirror-origin updates.
pub const MIRROR_EDIT_MARKER: &str = "UPDATE FROM MIRROR";

/// Commit marker for the bootstrap import.
pub const INITIAL_SYNC_MARKER: &str = "initial sync from mirror";

/// What a pull run observed.
#[derive(Debug)]
pub struct PullOutcome {
    /// Raw mirror-tool report, as journaled.
    pub report: String,
    /// The mirror was edited out of band; the change was committed and
    /// pushed under [`MIRROR_EDIT_MARKER`].
    pub out_of_band: bool,
}

/// Pull: mirror → repository, delete-on-extraneous.
///
/// Out-of-band mirror edits are logically anomalous but are committed and
/// pushed anyway — current behavior is deliberately permissive rather than
/// rejecting, and must not be silently inverted.
pub fn pull<G: Gateway, M: MirrorTool>(
    session: &mut Session<G>,
    mirror: &M,
    mirror_dir: &Path,
    journal: &Journal,
) -> Result<PullOutcome, SyncError> {
    session.enter(View::Active)?;
    let intended = intent::read_at(session.workdir())?;
    let excludes = intent::exclusions(&intended);

    tracing::info!("mirroring <- {}", mirror_dir.display());
    let report = mirror.one_way(&MirrorRequest {
        source: mirror_dir,
        dest: session.workdir(),
        delete_extraneous: true,
        excludes: &excludes,
    })?;
    journal.append(&report)?;

    session.gateway().stage_all()?;
    let out_of_band = session.gateway().has_staged_changes()?;
    if out_of_band {
        tracing::warn!("update from mirror detected; committing as '{MIRROR_EDIT_MARKER}'");
        session.gateway().commit(MIRROR_EDIT_MARKER, false)?;
        session.gateway().push_all()?;
    }

    Ok(PullOutcome {
        report,
        out_of_band,
    })
}

/// Push: repository → mirror, delete-on-extraneous. The repository is
/// never mutated by a push; there is no commit step.
pub fn push<G: Gateway, M: MirrorTool>(
    session: &mut Session<G>,
    mirror: &M,
    mirror_dir: &Path,
    journal: &Journal,
) -> Result<String, SyncError> {
    session.enter(View::Active)?;
    let intended = intent::read_at(session.workdir())?;
    let excludes = intent::exclusions(&intended);

    tracing::info!("mirroring -> {}", mirror_dir.display());
    let report = mirror.one_way(&MirrorRequest {
        source: session.workdir(),
        dest: mirror_dir,
        delete_extraneous: true,
        excludes: &excludes,
    })?;
    journal.append(&report)?;
    Ok(report)
}
