//! `attic push` — repository → mirror.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use attic_git::{GitCli, Session};
use attic_sync::{push, Journal, Rsync};

use super::load_config;

/// Arguments for `attic push`.
#[derive(Args, Debug)]
pub struct PushArgs {}

impl PushArgs {
    pub fn run(self) -> Result<()> {
        let config = load_config()?;
        println!("{}", "syncing ----> mirror ...".blue());

        let journal = Journal::new(&config.journal_path);
        let mut session = Session::new(GitCli::new(&config.repo_dir));
        push(&mut session, &Rsync, &config.mirror_dir, &journal)
            .context("push to mirror failed")?;

        println!("{} push complete (report journaled)", "✓".green());
        Ok(())
    }
}
