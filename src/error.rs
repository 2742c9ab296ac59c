//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` enum for all error conditions and implements Axum's
//! `IntoResponse` to automatically convert errors to appropriate HTTP responses
//! with JSON error bodies.
//!
//! Error mappings:
//! - `RepoNotFound`, `CommitNotFound`, `UnknownUrl` → 404
//! - `InvalidPath` → 400
//! - `Process`, `Config` → 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    #[error("Unknown URL")]
    UnknownUrl,

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("git {command} failed: {stderr}")]
    Process { command: String, stderr: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl AppError {
    pub fn process(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        AppError::Process {
            command: command.into(),
            stderr: stderr.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::RepoNotFound(_) | AppError::CommitNotFound(_) | AppError::UnknownUrl => {
                StatusCode::NOT_FOUND
            }
            AppError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            AppError::Process { .. } | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
