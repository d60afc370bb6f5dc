//! Attic — two-branch project archival and mirror sync CLI.
//!
//! # Usage
//!
//! ```text
//! attic init <repo_dir> --mirror <dir> [--config-only]
//! attic reconcile
//! attic pull
//! attic push
//! attic status [--json]
//! ```
//!
//! All commands resolve `~/.attic/config.yaml` for the repository, mirror
//! and journal locations. No two invocations may run concurrently against
//! the same repository.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    init::InitArgs, pull::PullArgs, push::PushArgs, reconcile::ReconcileArgs, status::StatusArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "attic",
    version,
    about = "Partition projects between active and archived branch views, synced against an external mirror",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the attic config and bootstrap the two-branch repository.
    Init(InitArgs),

    /// Restore the active/archived partition declared by the intent file.
    Reconcile(ReconcileArgs),

    /// Sync mirror → repository, committing out-of-band mirror edits.
    Pull(PullArgs),

    /// Sync repository → mirror. Never mutates the repository.
    Push(PushArgs),

    /// Show projects and their intended view.
    Status(StatusArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Reconcile(args) => args.run(),
        Commands::Pull(args) => args.run(),
        Commands::Push(args) => args.run(),
        Commands::Status(args) => args.run(),
    }
}
