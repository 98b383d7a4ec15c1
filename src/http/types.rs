use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody { pub message: String }

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("invalid id")]
    InvalidId,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::InvalidId => {
                (StatusCode::BAD_REQUEST, axum::Json(ErrorBody { message: self.to_string() })).into_response()
            }
            ApiError::Internal(err) => {
                tracing::error!(error = %format!("{err:#}"), "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(ErrorBody { message: "internal error".into() })).into_response()
            }
        }
    }
}

/// Body accepted by both `POST /items` and `PUT /items/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoPayload {
    pub title: String,
    #[serde(default)]
    pub done: bool,
}
