use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Message returned for any 500; the underlying cause is only logged.
pub const GENERIC_SERVER_ERROR: &str = "An error has occurred on the server.";

/// Application error taxonomy. Every failure a handler can produce is one of
/// these variants, matched once at the response boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("database error")]
    Db(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorBody {
    message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Every error is logged before the response is sent.
        match &self {
            ApiError::Db(e) => error!(error = %e, "database error"),
            ApiError::Internal(e) => error!(error = %e, "internal error"),
            other => warn!(message = %other, "request rejected"),
        }

        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Db(_) | ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_SERVER_ERROR)
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}
