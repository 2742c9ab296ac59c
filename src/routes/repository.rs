//! GET /api/v1/repository/root?path=<file>
//!
//! Returns the working tree root and marker directory enclosing a file.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::git::{GitExec, PathProbe};
use crate::models::RepoRootResponse;
use crate::routes::{file_path, PathQuery, SharedState};

pub fn routes<E, P>(state: SharedState<E, P>) -> Router
where
    E: GitExec + 'static,
    P: PathProbe + 'static,
{
    Router::new()
        .route("/api/v1/repository/root", get(get_repo_root::<E, P>))
        .with_state(state)
}

async fn get_repo_root<E: GitExec, P: PathProbe>(
    State(state): State<SharedState<E, P>>,
    Query(query): Query<PathQuery>,
) -> Result<Json<RepoRootResponse>> {
    let path = file_path(&query.path)?;
    let root = state.resolver.find_repo_root(&path)?;
    Ok(Json(RepoRootResponse {
        root: root.path().to_string_lossy().to_string(),
        git_dir: root.git_dir().to_string_lossy().to_string(),
    }))
}
