//! Blame endpoints.
//!
//! GET /api/v1/blame?path=<file>
//!   Re-runs blame for the file (as on open or save) and returns every line.
//!   `committed: false` with no lines means git had nothing for the file.
//!
//! DELETE /api/v1/blame?path=<file>
//!   The file was closed; drop its stored blame.
//!
//! GET /api/v1/blame/line?path=<file>&row=<zero-based row>
//!   Status bar text for one row, from the latest blame of the file.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;

use crate::error::Result;
use crate::format::status_line;
use crate::git::{GitExec, PathProbe};
use crate::models::{BlameResponse, StatusLine};
use crate::routes::{file_path, PathQuery, SharedState};

pub fn routes<E, P>(state: SharedState<E, P>) -> Router
where
    E: GitExec + 'static,
    P: PathProbe + 'static,
{
    Router::new()
        .route("/api/v1/blame", get(get_blame::<E, P>).delete(close_file::<E, P>))
        .route("/api/v1/blame/line", get(get_status_line::<E, P>))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct LineQuery {
    path: String,
    #[serde(default)]
    row: usize,
}

async fn get_blame<E: GitExec, P: PathProbe>(
    State(state): State<SharedState<E, P>>,
    Query(query): Query<PathQuery>,
) -> Result<Json<BlameResponse>> {
    let path = file_path(&query.path)?;
    let data = state.refresh_blame(&path).await;

    Ok(Json(BlameResponse {
        path: query.path,
        committed: data.is_some(),
        lines: data.map(|d| d.lines.clone()).unwrap_or_default(),
    }))
}

async fn close_file<E: GitExec, P: PathProbe>(
    State(state): State<SharedState<E, P>>,
    Query(query): Query<PathQuery>,
) -> Result<StatusCode> {
    let path = file_path(&query.path)?;
    state.tracker.forget(&path);
    Ok(StatusCode::NO_CONTENT)
}

async fn get_status_line<E: GitExec, P: PathProbe>(
    State(state): State<SharedState<E, P>>,
    Query(query): Query<LineQuery>,
) -> Result<Json<StatusLine>> {
    let path = file_path(&query.path)?;
    let data = state.blame(&path).await;
    Ok(Json(status_line(data.as_deref(), query.row, Utc::now(), &state.display)))
}
