//! Attic core library — domain types, intent list, configuration, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and the branch-view enum
//! - [`intent`] — archive-intent file parsing and mirror exclusions
//! - [`config`] — `~/.attic/config.yaml` load / save / init
//! - [`error`] — [`CoreError`]

pub mod config;
pub mod error;
pub mod intent;
pub mod types;

pub use config::Config;
pub use error::CoreError;
pub use types::{ProjectName, View};
