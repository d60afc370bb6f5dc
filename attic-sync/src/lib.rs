//! # attic-sync
//!
//! Archive reconciliation and bidirectional mirror sync.
//!
//! Call [`reconcile`] to restore the active/archived partition declared by
//! the intent file, [`pull`] / [`push`] to move content between the
//! external mirror and the repository, and [`bootstrap`] to set up the
//! two-branch topology in a fresh repository.

pub mod bootstrap;
pub mod controller;
pub mod error;
pub mod journal;
pub mod mirror;
pub mod reconcile;

pub use bootstrap::bootstrap;
pub use controller::{pull, push, PullOutcome, INITIAL_SYNC_MARKER, MIRROR_EDIT_MARKER};
pub use error::SyncError;
pub use journal::Journal;
pub use mirror::{MirrorRequest, MirrorTool, Rsync};
pub use reconcile::{reconcile, ReconcileOutcome};
