//! # attic-git
//!
//! Version-control gateway: the narrow seam between the sync algorithms
//! and the `git` binary.
//!
//! [`Gateway`] is the collaborator contract (branch checkout, stage /
//! commit / push, working-tree listing); [`GitCli`] implements it by
//! spawning `git`; [`Session`] adds the explicit current-view state on
//! top of whichever gateway is in use.

pub mod error;
pub mod gateway;
pub mod session;

pub use error::GitError;
pub use gateway::{Gateway, GitCli};
pub use session::Session;
