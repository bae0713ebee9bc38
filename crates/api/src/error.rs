use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use hookforge_core::error::{CoreError, RepositoryError};
use hookforge_core::gallery::SORT_KEYS;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `hookforge_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A malformed request body or query string.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut retry_after: Option<u64> = None;

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
                }
                CoreError::InvalidRating(score) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_RATING",
                    format!("Rating {score} is out of range: must be between 1 and 5"),
                ),
                CoreError::InvalidSort(sort) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_SORT",
                    format!(
                        "Unknown sort '{sort}': expected one of {}",
                        SORT_KEYS.join(", ")
                    ),
                ),
                CoreError::RateLimited { retry_after_secs } => {
                    retry_after = Some(*retry_after_secs);
                    (
                        StatusCode::TOO_MANY_REQUESTS,
                        "RATE_LIMITED",
                        format!("Too many ratings, retry after {retry_after_secs}s"),
                    )
                }
                CoreError::Repository(RepositoryError::NotFound) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "Resource not found".to_string(),
                ),
                CoreError::Repository(err) => {
                    tracing::error!(error = %err, "Repository error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = match retry_after {
            Some(secs) => json!({
                "error": message,
                "code": code,
                "retry_after": secs,
            }),
            None => json!({
                "error": message,
                "code": code,
            }),
        };

        let mut response = (status, axum::Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}
