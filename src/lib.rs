//! Line-level git blame for editors and tools.
//!
//! Given a file, finds its repository, runs `git blame` to attribute each
//! line to a revision and author, and resolves a revision to its commit
//! message and to a web link on the remote's hosting service.

pub mod config;
pub mod error;
pub mod format;
pub mod git;
pub mod models;
pub mod routes;
pub mod tracker;

pub use config::Config;
pub use error::{AppError, Result};
pub use git::{is_committed, LinkResolver, RepositoryLocator};
