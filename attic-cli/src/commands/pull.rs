//! `attic pull` — mirror → repository.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use attic_git::{GitCli, Session};
use attic_sync::{pull, Journal, Rsync, MIRROR_EDIT_MARKER};

use super::load_config;

/// Arguments for `attic pull`.
#[derive(Args, Debug)]
pub struct PullArgs {}

impl PullArgs {
    pub fn run(self) -> Result<()> {
        let config = load_config()?;
        println!("{}", "syncing <---- mirror ...".blue());

        let journal = Journal::new(&config.journal_path);
        let mut session = Session::new(GitCli::new(&config.repo_dir));
        let outcome = pull(&mut session, &Rsync, &config.mirror_dir, &journal)
            .context("pull from mirror failed")?;

        if outcome.out_of_band {
            println!(
                "{}",
                format!("update from mirror detected — committed and pushed as '{MIRROR_EDIT_MARKER}'")
                    .red()
            );
        }
        println!("{} pull complete (report journaled)", "✓".green());
        Ok(())
    }
}
