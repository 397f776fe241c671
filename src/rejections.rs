use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application-level errors surfaced to clients. Remote failures are always
/// converted to one of these at the handler boundary; they never propagate
/// as uncaught faults.
#[derive(Debug)]
pub enum AppError {
    /// Malformed input to the scoring/session layer. Programming error.
    InvalidInput(String),
    /// The daily question was already attempted today. No state changed.
    AlreadyAttempted,
    /// The requested resource (user, session, rank) does not exist.
    NotFound(&'static str),
    /// An upstream provider or the store could not be reached.
    RemoteUnavailable(String),
    /// Request is missing a valid user session.
    Unauthorized,
    Internal(&'static str),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AlreadyAttempted => (
                StatusCode::CONFLICT,
                "You've already attempted today's question! Come back tomorrow!".to_owned(),
            ),
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            AppError::RemoteUnavailable(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "not signed in".to_owned()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.to_owned()),
        };

        (code, Json(ErrorBody { error: message })).into_response()
    }
}

/// Convert db/service failures into an `AppError::Internal` with a stable
/// client-facing message, logging the underlying cause.
pub trait ResultExt<T> {
    fn reject(self, message: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{message}: {e}");
            AppError::Internal(message)
        })
    }
}
