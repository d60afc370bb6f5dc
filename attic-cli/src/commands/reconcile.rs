//! `attic reconcile` — restore the active/archived partition.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use attic_git::{GitCli, Session};
use attic_sync::reconcile;

use super::load_config;

/// Arguments for `attic reconcile`.
#[derive(Args, Debug)]
pub struct ReconcileArgs {}

impl ReconcileArgs {
    pub fn run(self) -> Result<()> {
        let config = load_config()?;
        let mut session = Session::new(GitCli::new(&config.repo_dir));
        let outcome = reconcile(&mut session).context("reconciliation failed")?;

        if outcome.is_noop() {
            println!("{} nothing to reconcile", "✓".green());
            return Ok(());
        }

        for name in &outcome.archived {
            println!("  {} {name}", "archived ".yellow());
        }
        for name in &outcome.activated {
            println!("  {} {name}", "activated".green());
        }
        if outcome.pushed {
            println!("{} all branches pushed", "✓".green());
        }
        Ok(())
    }
}
