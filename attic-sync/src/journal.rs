//! Append-only journal of mirror-tool reports.
//!
//! Entry format: `\n\n\n<timestamp>\n<raw report>`, timestamp as
//! `%Y-%m-%d %H:%M:%S` local time. Entries are never mutated or deleted.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{io_err, SyncError};

/// Timestamp format used for journal entries.
const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Handle on the journal file. Opening is deferred to [`append`](Self::append).
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one mirror report, timestamped. Creates the file (and its
    /// parent directory) on first use.
    pub fn append(&self, report: &str) -> Result<(), SyncError> {
        self.append_stamped(report, &Local::now().format(STAMP_FORMAT).to_string())
    }

    fn append_stamped(&self, report: &str, stamp: &str) -> Result<(), SyncError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| io_err(&self.path, e))?;
        write!(file, "\n\n\n{stamp}\n{report}").map_err(|e| io_err(&self.path, e))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
