//! API route handlers - the HTTP face of the blame lookups.
//!
//! Each submodule defines routes for a feature area:
//! - `repository`: Repository root of a file
//! - `blame`: Per-line attribution and the status text for one row
//! - `commits`: Commit tooltip data and commit web links

pub mod blame;
pub mod commits;
pub mod repository;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::format::DisplayConfig;
use crate::git::{CliGit, FsProbe, GitExec, LinkResolver, PathProbe};
use crate::models::BlameData;
use crate::tracker::BlameTracker;

pub struct AppState<E = CliGit, P = FsProbe> {
    pub resolver: LinkResolver<E, P>,
    pub tracker: BlameTracker,
    pub display: DisplayConfig,
}

pub type SharedState<E = CliGit, P = FsProbe> = Arc<AppState<E, P>>;

impl<E: GitExec, P: PathProbe> AppState<E, P> {
    pub fn new(resolver: LinkResolver<E, P>, display: DisplayConfig) -> Self {
        Self {
            resolver,
            tracker: BlameTracker::new(),
            display,
        }
    }

    /// Fetch blame for `path` and return whatever is current afterwards.
    pub async fn refresh_blame(&self, path: &Path) -> Option<Arc<BlameData>> {
        let ticket = self.tracker.begin(path);
        let data = self.resolver.get_blame_data(path).await;
        self.tracker.apply(ticket, data);
        self.tracker.current(path).flatten()
    }

    /// Latest blame for `path`, fetching only if it was never fetched.
    pub async fn blame(&self, path: &Path) -> Option<Arc<BlameData>> {
        match self.tracker.current(path) {
            Some(data) => data,
            None => self.refresh_blame(path).await,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PathQuery {
    path: String,
}

fn file_path(raw: &str) -> Result<PathBuf> {
    if raw.trim().is_empty() {
        return Err(AppError::InvalidPath("empty path".to_string()));
    }
    Ok(PathBuf::from(raw))
}

pub fn create_router<E, P>(state: SharedState<E, P>) -> Router
where
    E: GitExec + 'static,
    P: PathProbe + 'static,
{
    Router::new()
        .merge(repository::routes(state.clone()))
        .merge(blame::routes(state.clone()))
        .merge(commits::routes(state))
}
