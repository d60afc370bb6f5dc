//! Domain types for attic.
//!
//! Project identity is the directory name alone — exact-match and
//! case-sensitive; no other metadata is persisted anywhere.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed project (directory) name.
///
/// `Ord` so that set differences and commit-message name lists come out in
/// a deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectName(pub String);

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Branch views
// ---------------------------------------------------------------------------

/// One of the two branch views the single working tree can materialize.
///
/// The repository partitions projects into these two disjoint views; the
/// working tree holds exactly one of them at any instant. Branch switches
/// go through the checkout session in `attic-git`, so the current view is
/// always an explicit value rather than ambient process state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Active,
    Archived,
}

impl View {
    /// Branch name this view is stored under.
    pub fn branch(self) -> &'static str {
        match self {
            View::Active => "active",
            View::Archived => "archived",
        }
    }

    /// The opposite view.
    pub fn other(self) -> View {
        match self {
            View::Active => View::Archived,
            View::Archived => View::Active,
        }
    }

    /// Commit-message tag for moves *into* this view.
    pub fn move_tag(self) -> &'static str {
        match self {
            View::Active => "ACTIVATED",
            View::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.branch())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
