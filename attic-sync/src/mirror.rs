//! Mirror tool — one-way, exclusion-aware directory synchronization.
//!
//! [`Rsync`] is the production implementation; the trait exists so the
//! controller flows can be exercised in tests without an rsync binary.
//! Invocations are blocking with no timeout or cancellation: a stuck
//! mirror operation stalls the whole pipeline.

use std::path::Path;
use std::process::Command;

use attic_core::intent::INTENT_FILE;

use crate::error::SyncError;

/// One directional mirror operation.
#[derive(Debug)]
pub struct MirrorRequest<'a> {
    pub source: &'a Path,
    pub dest: &'a Path,
    /// Delete entries in `dest` that no longer exist in `source`.
    pub delete_extraneous: bool,
    /// Project names that must never be touched (the intended-archive set).
    pub excludes: &'a [String],
}

/// One-way directory synchronization returning the tool's textual report
/// of the changes it made.
pub trait MirrorTool {
    fn one_way(&self, request: &MirrorRequest<'_>) -> Result<String, SyncError>;
}

// ---------------------------------------------------------------------------
// Rsync
// ---------------------------------------------------------------------------

/// [`MirrorTool`] backed by the `rsync` binary.
///
/// Version-control metadata and the intent file itself are always
/// excluded, on top of the per-request project exclusions.
#[derive(Debug, Clone, Default)]
pub struct Rsync;

impl Rsync {
    fn argv(request: &MirrorRequest<'_>) -> Vec<String> {
        let mut args = vec!["-av".to_string()];
        if request.delete_extraneous {
            args.push("--delete".to_string());
        }
        for pattern in [".git", INTENT_FILE]
            .iter()
            .copied()
            .chain(request.excludes.iter().map(String::as_str))
        {
            args.push("--exclude".to_string());
            args.push(pattern.to_string());
        }
        // Trailing slash: sync the *contents* of source into dest.
        args.push(format!("{}/", request.source.display()));
        args.push(format!("{}/", request.dest.display()));
        args
    }
}

impl MirrorTool for Rsync {
    fn one_way(&self, request: &MirrorRequest<'_>) -> Result<String, SyncError> {
        let args = Self::argv(request);
        tracing::info!("rsync {}", args.join(" "));
        let output = Command::new("rsync")
            .args(&args)
            .output()
            .map_err(SyncError::MirrorSpawn)?;
        if !output.status.success() {
            return Err(SyncError::Mirror {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
