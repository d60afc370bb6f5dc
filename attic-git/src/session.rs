//! Checkout session — the single working tree as an explicit state value.
//!
//! The repository's two branches are mutually exclusive views of one
//! working tree. [`Session::enter`] is the only branch-switching
//! transition; everything else observes [`Session::current`] instead of
//! guessing at ambient checkout state.
//!
//! Mutual exclusion across *processes* is not provided here: no two
//! invocations may run concurrently against the same repository, which the
//! surrounding deployment must enforce (single serialized operator).

use std::path::Path;

use attic_core::View;

use crate::error::GitError;
use crate::gateway::Gateway;

/// A gateway plus the view its working tree currently materializes.
#[derive(Debug)]
pub struct Session<G: Gateway> {
    gateway: G,
    view: Option<View>,
}

impl<G: Gateway> Session<G> {
    /// Wrap a gateway. The current view is unknown until the first
    /// [`enter`](Self::enter) — a fresh session never trusts whatever
    /// branch a previous (possibly crashed) run left checked out.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            view: None,
        }
    }

    /// Switch the working tree to `view`. Always performs the checkout,
    /// even when `view` is already current.
    pub fn enter(&mut self, view: View) -> Result<(), GitError> {
        self.gateway.checkout(view.branch())?;
        self.view = Some(view);
        Ok(())
    }

    /// The view the working tree materializes, if one has been entered.
    pub fn current(&self) -> Option<View> {
        self.view
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn workdir(&self) -> &Path {
        self.gateway.workdir()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
