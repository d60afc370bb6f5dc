//! `attic init` — write the config and bootstrap the repository.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use attic_git::{GitCli, Session};
use attic_sync::{bootstrap, Journal, Rsync};

/// Arguments for `attic init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Working tree of the repository (already `git init`ed, with an
    /// `origin` remote configured).
    pub repo_dir: PathBuf,

    /// Externally-synced mirror directory.
    #[arg(long)]
    pub mirror: PathBuf,

    /// Only write `~/.attic/config.yaml`; skip the repository bootstrap.
    #[arg(long)]
    pub config_only: bool,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let config = attic_core::config::init(self.repo_dir, self.mirror)
            .context("failed to write config")?;
        println!("{} config written", "✓".green());

        if self.config_only {
            return Ok(());
        }

        let journal = Journal::new(&config.journal_path);
        let mut session = Session::new(GitCli::new(&config.repo_dir));
        bootstrap(&mut session, &Rsync, &config.mirror_dir, &journal)
            .context("repository bootstrap failed")?;

        println!(
            "{} repository bootstrapped — branches 'active' and 'archived' pushed, mirror imported",
            "✓".green()
        );
        println!("you may now clone with: git clone -b active <remote>");
        Ok(())
    }
}
