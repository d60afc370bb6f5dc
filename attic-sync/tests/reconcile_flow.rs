//! End-to-end reconciliation tests against a real `git` binary.
//!
//! Topology per test: a bare `origin`, a seed clone that sets up the
//! two-branch state, and an operator clone the reconciler runs in.

use std::path::Path;
use std::process::Command;

use attic_core::{ProjectName, View};
use attic_git::{Gateway, GitCli, Session};
use attic_sync::reconcile;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env_remove("GIT_DIR")
        .output()
        .expect("spawn git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn configure_user(dir: &Path) {
    git(dir, &["config", "user.email", "attic@example.com"]);
    git(dir, &["config", "user.name", "attic tests"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

fn write_project(dir: &Path, name: &str, body: &str) {
    let project = dir.join(name);
    std::fs::create_dir_all(&project).expect("mkdir");
    std::fs::write(project.join("main.tex"), body).expect("write");
}

fn subjects(dir: &Path, branch: &str) -> Vec<String> {
    git(dir, &["log", "--format=%s", branch])
        .lines()
        .map(str::to_string)
        .collect()
}

fn commit_count(dir: &Path, branch: &str) -> usize {
    git(dir, &["rev-list", "--count", branch])
        .trim()
        .parse()
        .expect("count")
}

/// Seed origin with an active branch holding `projects` + the intent file,
/// and an empty orphan archived branch. Returns the operator clone.
fn seed(origin: &Path, intent: &str, projects: &[(&str, &str)]) -> TempDir {
    git(origin, &["init", "--bare", "-b", "active"]);

    let seed = TempDir::new().expect("seed dir");
    git(seed.path(), &["init", "-b", "active"]);
    configure_user(seed.path());
    git(
        seed.path(),
        &["remote", "add", "origin", &origin.display().to_string()],
    );

    std::fs::write(seed.path().join("ARCHIVED_LIST"), intent).expect("intent");
    for (name, body) in projects {
        write_project(seed.path(), name, body);
    }
    git(seed.path(), &["add", "--all"]);
    git(seed.path(), &["commit", "-m", "initial commit"]);
    git(seed.path(), &["push", "-u", "origin", "active"]);

    git(seed.path(), &["checkout", "--orphan", "archived"]);
    for entry in std::fs::read_dir(seed.path()).expect("read seed") {
        let entry = entry.expect("entry");
        if entry.file_name() == ".git" {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            std::fs::remove_dir_all(&path).expect("rm dir");
        } else {
            std::fs::remove_file(&path).expect("rm file");
        }
    }
    git(seed.path(), &["add", "--all"]);
    git(
        seed.path(),
        &["commit", "--allow-empty", "-m", "empty commit"],
    );
    git(seed.path(), &["push", "-u", "origin", "archived"]);

    let work = TempDir::new().expect("work dir");
    git(
        work.path(),
        &[
            "clone",
            &origin.display().to_string(),
            &work.path().display().to_string(),
        ],
    );
    configure_user(work.path());
    work
}

#[test]
fn archives_intended_project_and_is_idempotent() {
    let origin = TempDir::new().unwrap();
    let work = seed(
        origin.path(),
        "proj1\n",
        &[("proj1", "% proj1 content\n"), ("proj2", "% proj2\n")],
    );

    let mut session = Session::new(GitCli::new(work.path()));
    let outcome = reconcile(&mut session).expect("reconcile");

    assert_eq!(outcome.archived, vec![ProjectName::from("proj1")]);
    assert!(outcome.activated.is_empty());
    assert!(outcome.pushed);
    assert_eq!(session.current(), Some(View::Active));

    // Active view: proj1 gone, proj2 and the intent file remain.
    let active = session.gateway().list_working_tree().expect("list");
    assert!(!active.contains("proj1"));
    assert!(active.contains("proj2"));
    assert!(active.contains("ARCHIVED_LIST"));

    // Archived view: proj1 present with identical content, no intent file.
    session.enter(View::Archived).expect("enter archived");
    let archived = session.gateway().list_working_tree().expect("list");
    assert!(archived.contains("proj1"));
    assert!(!archived.contains("ARCHIVED_LIST"));
    let content =
        std::fs::read_to_string(work.path().join("proj1").join("main.tex")).expect("read");
    assert_eq!(content, "% proj1 content\n");
    session.enter(View::Active).expect("back to active");

    // Two commits on archived ([ARCHIVED] on top of the empty root), one
    // deletion commit on active.
    assert_eq!(
        subjects(work.path(), "archived"),
        vec!["[ARCHIVED] proj1", "empty commit"]
    );
    assert_eq!(
        subjects(work.path(), "active"),
        vec!["[ARCHIVED] proj1", "initial commit"]
    );

    // Both branches landed on origin.
    assert_eq!(
        subjects(origin.path(), "archived")[0],
        "[ARCHIVED] proj1".to_string()
    );

    // Idempotence: unchanged intent + listings → zero new commits, active
    // stays checked out.
    let active_before = commit_count(work.path(), "active");
    let archived_before = commit_count(work.path(), "archived");
    let again = reconcile(&mut session).expect("reconcile again");
    assert!(again.is_noop());
    assert!(!again.pushed);
    assert_eq!(session.current(), Some(View::Active));
    assert_eq!(commit_count(work.path(), "active"), active_before);
    assert_eq!(commit_count(work.path(), "archived"), archived_before);
}

#[test]
fn activates_project_removed_from_intent() {
    let origin = TempDir::new().unwrap();
    let work = seed(origin.path(), "proj1\n", &[("proj1", "% v1\n"), ("proj2", "% p2\n")]);

    let mut session = Session::new(GitCli::new(work.path()));
    reconcile(&mut session).expect("first reconcile");

    // Operator empties the intent list; the edit arrives committed, the
    // way a mirror pull would deliver it.
    std::fs::write(work.path().join("ARCHIVED_LIST"), "").expect("intent");
    git(work.path(), &["add", "--all"]);
    git(work.path(), &["commit", "-m", "UPDATE FROM MIRROR"]);
    git(work.path(), &["push", "--all"]);

    let outcome = reconcile(&mut session).expect("second reconcile");
    assert!(outcome.archived.is_empty());
    assert_eq!(outcome.activated, vec![ProjectName::from("proj1")]);
    assert!(outcome.pushed);

    let active = session.gateway().list_working_tree().expect("list");
    assert!(active.contains("proj1"));
    assert!(active.contains("proj2"));

    session.enter(View::Archived).expect("enter archived");
    assert!(session
        .gateway()
        .list_working_tree()
        .expect("list")
        .is_empty());

    assert_eq!(subjects(work.path(), "archived")[0], "[ACTIVATED] proj1");
    assert_eq!(subjects(work.path(), "active")[0], "[ACTIVATED] proj1");
}

#[test]
fn archives_multiple_projects_in_one_commit_pair() {
    let origin = TempDir::new().unwrap();
    let work = seed(
        origin.path(),
        "beta\nalpha\n",
        &[("alpha", "% a\n"), ("beta", "% b\n"), ("keep", "% k\n")],
    );

    let mut session = Session::new(GitCli::new(work.path()));
    let outcome = reconcile(&mut session).expect("reconcile");

    // Sorted deterministically regardless of intent-file order.
    assert_eq!(
        outcome.archived,
        vec![ProjectName::from("alpha"), ProjectName::from("beta")]
    );
    assert_eq!(subjects(work.path(), "archived")[0], "[ARCHIVED] alpha, beta");

    let active = session.gateway().list_working_tree().expect("list");
    assert!(active.contains("keep"));
    assert!(!active.contains("alpha"));
    assert!(!active.contains("beta"));
}

#[test]
fn missing_intent_file_aborts_reconciliation() {
    let origin = TempDir::new().unwrap();
    git(origin.path(), &["init", "--bare", "-b", "active"]);

    // Active branch without an ARCHIVED_LIST at all.
    let seed_dir = TempDir::new().unwrap();
    git(seed_dir.path(), &["init", "-b", "active"]);
    configure_user(seed_dir.path());
    git(
        seed_dir.path(),
        &["remote", "add", "origin", &origin.path().display().to_string()],
    );
    write_project(seed_dir.path(), "proj1", "% p1\n");
    git(seed_dir.path(), &["add", "--all"]);
    git(seed_dir.path(), &["commit", "-m", "initial commit"]);
    git(seed_dir.path(), &["push", "-u", "origin", "active"]);
    git(seed_dir.path(), &["checkout", "--orphan", "archived"]);
    std::fs::remove_dir_all(seed_dir.path().join("proj1")).unwrap();
    git(seed_dir.path(), &["add", "--all"]);
    git(
        seed_dir.path(),
        &["commit", "--allow-empty", "-m", "empty commit"],
    );
    git(seed_dir.path(), &["push", "-u", "origin", "archived"]);

    let work = TempDir::new().unwrap();
    git(
        work.path(),
        &[
            "clone",
            &origin.path().display().to_string(),
            &work.path().display().to_string(),
        ],
    );
    configure_user(work.path());

    let mut session = Session::new(GitCli::new(work.path()));
    let err = reconcile(&mut session).unwrap_err();
    assert!(
        err.to_string().contains("intent file not found"),
        "unexpected error: {err}"
    );
}
