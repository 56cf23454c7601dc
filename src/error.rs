//! Error taxonomy for the worksheet backend.
//!
//! Every failure the core can produce lands in one of these variants, each
//! mapped onto an HTTP status and the `{success:false, error}` envelope the
//! API speaks. Collaborator clients keep their low-level string errors; the
//! orchestration layer wraps them here so the boundary never sees a bare
//! string.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the worksheet lifecycle.
#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    /// Caller input failed a precondition (missing topic, missing email, bad body).
    #[error("{0}")]
    Validation(String),

    /// The identifier has no live record in the store.
    #[error("Worksheet not found")]
    WorksheetNotFound,

    /// An allocator-fresh id was already live. Invariant check, not a
    /// recoverable path.
    #[error("Worksheet id already exists: {0}")]
    Conflict(String),

    /// The generation collaborator failed; the cause is preserved.
    #[error("Failed to generate worksheet: {0}")]
    Generation(String),

    /// The email collaborator failed. Fatal to nothing but its own request.
    #[error("Failed to send welcome email: {0}")]
    Notification(String),
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::WorksheetNotFound => StatusCode::NOT_FOUND,
            Error::Conflict(_) | Error::Generation(_) | Error::Notification(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(Error::Validation("Topic is required".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::WorksheetNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(Error::Conflict("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(Error::Generation("boom".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(Error::Notification("boom".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn messages_keep_the_cause() {
        let e = Error::Generation("OpenAI HTTP 500: overloaded".into());
        assert_eq!(e.to_string(), "Failed to generate worksheet: OpenAI HTTP 500: overloaded");
    }
}
