//! Attic configuration file.
//!
//! # Storage layout
//!
//! ```text
//! ~/.attic/
//!   config.yaml   (mode 0600, directory 0700)
//! ```
//!
//! # API pattern
//!
//! Every function touching home-relative paths has two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Locations the sync pipeline operates on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Working tree of the two-branch repository.
    pub repo_dir: PathBuf,
    /// Externally-synced mirror directory (the editing surface).
    pub mirror_dir: PathBuf,
    /// Append-only journal of mirror-tool reports.
    pub journal_path: PathBuf,
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.attic/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".attic").join("config.yaml")
}

/// `<home>/.attic/` — creates the directory (mode `0700`) if absent.
fn attic_dir_at(home: &Path) -> Result<PathBuf, CoreError> {
    let dir = home.join(".attic");
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    Ok(dir)
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load the config from `<home>/.attic/config.yaml`.
///
/// Returns `CoreError::ConfigNotFound` if absent,
/// `CoreError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(home: &Path) -> Result<Config, CoreError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Err(CoreError::ConfigNotFound { path });
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_yaml::from_str(&contents).map_err(|e| CoreError::Parse { path, source: e })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Config, CoreError> {
    load_at(&home()?)
}

// ---------------------------------------------------------------------------
// Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save the config to `<home>/.attic/config.yaml`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
/// `.tmp` is always in the same directory as the target (same filesystem).
pub fn save_at(home: &Path, config: &Config) -> Result<(), CoreError> {
    let dir = attic_dir_at(home)?;
    let path = config_path_at(home);
    let tmp = dir.join("config.yaml.tmp");

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp, yaml)?;
    set_file_permissions(&tmp)?;
    std::fs::rename(&tmp, &path)?;
    Ok(())
}

/// `save_at` convenience wrapper.
pub fn save(config: &Config) -> Result<(), CoreError> {
    save_at(&home()?, config)
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

/// Build and persist a config for the given directories.
///
/// The journal defaults to `<home>/.attic/journal.log`.
pub fn init_at(home: &Path, repo_dir: PathBuf, mirror_dir: PathBuf) -> Result<Config, CoreError> {
    let journal_path = home.join(".attic").join("journal.log");
    let config = Config {
        repo_dir,
        mirror_dir,
        journal_path,
    };
    save_at(home, &config)?;
    Ok(config)
}

/// `init_at` convenience wrapper.
pub fn init(repo_dir: PathBuf, mirror_dir: PathBuf) -> Result<Config, CoreError> {
    let home = home()?;
    init_at(&home, repo_dir, mirror_dir)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, CoreError> {
    dirs::home_dir().ok_or(CoreError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), CoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), CoreError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), CoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), CoreError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_home() -> TempDir {
        TempDir::new().expect("tempdir")
    }

    #[test]
    fn config_path_is_correct() {
        let home = make_home();
        let path = config_path_at(home.path());
        assert!(path.ends_with(".attic/config.yaml"));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let home = make_home();
        let config = Config {
            repo_dir: PathBuf::from("/srv/texdoc"),
            mirror_dir: PathBuf::from("/srv/mirror"),
            journal_path: PathBuf::from("/srv/journal.log"),
        };
        save_at(home.path(), &config).expect("save");
        let loaded = load_at(home.path()).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn atomic_save_cleans_up_tmp() {
        let home = make_home();
        let config = Config {
            repo_dir: PathBuf::from("/a"),
            mirror_dir: PathBuf::from("/b"),
            journal_path: PathBuf::from("/c"),
        };
        save_at(home.path(), &config).expect("save");
        assert!(
            !home.path().join(".attic").join("config.yaml.tmp").exists(),
            ".tmp must be gone after successful save"
        );
    }

    #[test]
    fn load_missing_config_returns_not_found() {
        let home = make_home();
        let err = load_at(home.path()).unwrap_err();
        assert!(matches!(err, CoreError::ConfigNotFound { .. }));
    }

    #[test]
    fn init_defaults_journal_under_attic_dir() {
        let home = make_home();
        let config = init_at(
            home.path(),
            PathBuf::from("/repo"),
            PathBuf::from("/mirror"),
        )
        .expect("init");
        assert!(config.journal_path.ends_with(".attic/journal.log"));
        assert!(config_path_at(home.path()).exists());
    }

    #[test]
    #[cfg(unix)]
    fn config_file_saved_with_0600() {
        use std::os::unix::fs::PermissionsExt;
        let home = make_home();
        init_at(home.path(), PathBuf::from("/r"), PathBuf::from("/m")).expect("init");
        let mode = std::fs::metadata(config_path_at(home.path()))
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn home_not_found_error_message() {
        assert!(CoreError::HomeNotFound
            .to_string()
            .contains("home directory"));
    }
}
