//! `attic status` — projects and their intended view.
//!
//! Reads the active working tree directly (the repository must have the
//! active branch checked out, which every flow leaves behind on success).

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use attic_core::intent;
use attic_git::{Gateway, GitCli};

use super::load_config;

/// Arguments for `attic status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let config = load_config()?;
        let gateway = GitCli::new(&config.repo_dir);

        let intended = intent::read_at(gateway.workdir())
            .context("failed to read intent file — is the active branch checked out?")?;
        let listing = gateway
            .list_working_tree()
            .context("failed to list working tree")?;

        let report = build_report(&intended, &listing);
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report)
                    .context("failed to serialize status JSON")?
            );
            return Ok(());
        }

        print_table(report);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct StatusReport {
    active: usize,
    archived: usize,
    pending_archive: usize,
    projects: Vec<ProjectStatus>,
}

#[derive(Debug, Serialize)]
struct ProjectStatus {
    name: String,
    state: ProjectState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum ProjectState {
    /// In the active working tree, not named by the intent file.
    Active,
    /// In the active working tree but intended-archive; the next
    /// reconcile will move it.
    PendingArchive,
    /// Named by the intent file and absent from the working tree.
    Archived,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "project")]
    project: String,
    #[tabled(rename = "state")]
    state: String,
}

fn build_report(
    intended: &std::collections::BTreeSet<attic_core::ProjectName>,
    listing: &std::collections::BTreeSet<String>,
) -> StatusReport {
    let mut projects = Vec::new();
    for name in listing {
        if name == intent::INTENT_FILE {
            continue;
        }
        let state = if intended.contains(&attic_core::ProjectName::from(name.as_str())) {
            ProjectState::PendingArchive
        } else {
            ProjectState::Active
        };
        projects.push(ProjectStatus {
            name: name.clone(),
            state,
        });
    }
    for name in intended {
        if !listing.contains(&name.0) {
            projects.push(ProjectStatus {
                name: name.0.clone(),
                state: ProjectState::Archived,
            });
        }
    }
    projects.sort_by(|a, b| a.name.cmp(&b.name));

    let count = |state: ProjectState| projects.iter().filter(|p| p.state == state).count();
    StatusReport {
        active: count(ProjectState::Active),
        archived: count(ProjectState::Archived),
        pending_archive: count(ProjectState::PendingArchive),
        projects,
    }
}

fn print_table(report: StatusReport) {
    println!(
        "attic v{} | {} active | {} archived | {} pending archive",
        env!("CARGO_PKG_VERSION"),
        report.active,
        report.archived,
        report.pending_archive,
    );

    if report.projects.is_empty() {
        println!("No projects yet. Run `attic pull` to import from the mirror.");
        return;
    }

    let rows: Vec<StatusTableRow> = report
        .projects
        .iter()
        .map(|p| StatusTableRow {
            project: p.name.clone(),
            state: state_label(p.state),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if report.pending_archive > 0 {
        println!(
            "{}",
            "Run `attic reconcile` to move pending projects to the archived view.".yellow()
        );
    }
}

fn state_label(state: ProjectState) -> String {
    match state {
        ProjectState::Active => "ACTIVE".green().to_string(),
        ProjectState::PendingArchive => "PENDING ARCHIVE".yellow().to_string(),
        ProjectState::Archived => "ARCHIVED".bright_black().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
