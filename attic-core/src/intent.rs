//! Archive-intent file parsing.
//!
//! `ARCHIVED_LIST` lives at the repository root on the active branch only
//! and is never present on the archived branch. Format: one project name
//! per line, whitespace trimmed, blank lines ignored, duplicates collapse
//! silently. No comments, no escaping.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::CoreError;
use crate::types::ProjectName;

/// File name of the persisted archive-intent list.
pub const INTENT_FILE: &str = "ARCHIVED_LIST";

/// Read the intent list from a working tree with the active branch
/// checked out.
///
/// Returns `CoreError::IntentNotFound` if the file is absent — callers
/// treat this as fatal, since mirror exclusions cannot be derived
/// without it.
pub fn read_at(worktree: &Path) -> Result<BTreeSet<ProjectName>, CoreError> {
    let path = worktree.join(INTENT_FILE);
    if !path.exists() {
        return Err(CoreError::IntentNotFound { path });
    }
    let contents = std::fs::read_to_string(&path)?;
    Ok(parse(&contents))
}

/// Parse intent-file contents into a deduplicated set of names.
pub fn parse(contents: &str) -> BTreeSet<ProjectName> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ProjectName::from)
        .collect()
}

/// One mirror-exclusion pattern per intended-archive entry, so mirror
/// operations never touch archived projects' content.
pub fn exclusions<'a, I>(intent: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ProjectName>,
{
    intent.into_iter().map(|name| name.0.clone()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
