pub mod init;
pub mod pull;
pub mod push;
pub mod reconcile;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use attic_core::Config;

/// Load the config from the real home directory.
///
/// All commands except `init` go through this; `_at` forms stay inside
/// the library crates for tests.
pub(crate) fn load_config() -> Result<Config> {
    let home: PathBuf = dirs::home_dir().context("could not determine home directory")?;
    attic_core::config::load_at(&home).context("failed to load config — run `attic init` first")
}
