//! Commit endpoints.
//!
//! GET /api/v1/commit?path=<file>&rev=<revision>
//!   Email, author, subject, message and avatar for the tooltip.
//!
//! GET /api/v1/commit/link?path=<file>&rev=<revision>
//!   Web page of the commit on the remote's host; 404 "Unknown URL" if none.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::format::avatar_url;
use crate::git::{strip_boundary, GitExec, PathProbe};
use crate::models::{CommitResponse, LinkResponse};
use crate::routes::{file_path, SharedState};

pub fn routes<E, P>(state: SharedState<E, P>) -> Router
where
    E: GitExec + 'static,
    P: PathProbe + 'static,
{
    Router::new()
        .route("/api/v1/commit", get(get_commit::<E, P>))
        .route("/api/v1/commit/link", get(get_commit_link::<E, P>))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CommitQuery {
    path: String,
    rev: String,
}

async fn get_commit<E: GitExec, P: PathProbe>(
    State(state): State<SharedState<E, P>>,
    Query(query): Query<CommitQuery>,
) -> Result<Json<CommitResponse>> {
    let path = file_path(&query.path)?;
    let commit = state
        .resolver
        .get_commit(&path, &query.rev)
        .await?
        .ok_or_else(|| AppError::CommitNotFound(query.rev.clone()))?;

    let avatar = avatar_url(&commit.email, state.display.avatar_size);
    Ok(Json(CommitResponse {
        revision: strip_boundary(&query.rev).to_string(),
        commit,
        avatar,
    }))
}

async fn get_commit_link<E: GitExec, P: PathProbe>(
    State(state): State<SharedState<E, P>>,
    Query(query): Query<CommitQuery>,
) -> Result<Json<LinkResponse>> {
    let path = file_path(&query.path)?;
    let url = state
        .resolver
        .get_commit_link(&path, &query.rev)
        .await?
        .ok_or(AppError::UnknownUrl)?;

    Ok(Json(LinkResponse {
        revision: strip_boundary(&query.rev).to_string(),
        url,
    }))
}
