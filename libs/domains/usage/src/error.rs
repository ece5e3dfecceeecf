use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode, ErrorResponse};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unknown resource kind: '{0}'")]
    UnknownKind(String),

    #[error("Unknown soldier: {0}")]
    UnknownSoldier(Uuid),

    #[error("insufficient stock of '{kind}': available {available}, requested {requested}")]
    InsufficientStock {
        kind: String,
        available: u64,
        requested: u64,
    },

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("compensation failed for kinds {kinds:?}: {reason}")]
    CompensationFailed { kinds: Vec<String>, reason: String },
}

pub type UsageResult<T> = Result<T, UsageError>;

/// Convert UsageError to AppError for standardized error responses
impl From<UsageError> for AppError {
    fn from(err: UsageError) -> Self {
        match err {
            UsageError::Validation(msg) => AppError::BadRequest(msg),
            UsageError::UnknownKind(kind) => {
                AppError::BadRequest(format!("Unknown resource kind: '{}'", kind))
            }
            UsageError::UnknownSoldier(id) => {
                AppError::NotFound(format!("Soldier {} not found", id))
            }
            UsageError::InsufficientStock { kind, available, requested } => {
                AppError::Conflict(format!(
                    "insufficient stock of '{}': available {}, requested {}",
                    kind, available, requested
                ))
            }
            UsageError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
            UsageError::CompensationFailed { kinds, reason } => AppError::InternalServerError(
                format!("compensation failed for kinds {:?}: {}", kinds, reason),
            ),
        }
    }
}

impl IntoResponse for UsageError {
    fn into_response(self) -> Response {
        // Domain-specific codes carry structured details; everything else
        // uses the standardized AppError response format.
        match self {
            UsageError::InsufficientStock { ref kind, available, requested } => {
                let body = ErrorResponse::new(ErrorCode::InsufficientStock, self.to_string())
                    .with_details(serde_json::json!({
                        "kind": kind,
                        "available": available,
                        "requested": requested,
                    }));
                (StatusCode::CONFLICT, Json(body)).into_response()
            }
            UsageError::UnknownKind(ref kind) => {
                let body = ErrorResponse::new(ErrorCode::UnknownResourceKind, self.to_string())
                    .with_details(serde_json::json!({ "kind": kind }));
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            UsageError::UnknownSoldier(id) => {
                let body = ErrorResponse::new(
                    ErrorCode::UnknownSoldier,
                    format!("Soldier {} not found", id),
                );
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            UsageError::CompensationFailed { ref kinds, ref reason } => {
                tracing::error!(
                    error_code = ErrorCode::CompensationFailed.code(),
                    ?kinds,
                    reason,
                    "ledger left inconsistent after failed compensation"
                );
                let body = ErrorResponse::new(ErrorCode::CompensationFailed, self.to_string())
                    .with_details(serde_json::json!({ "kinds": kinds }));
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            other => {
                let app_error: AppError = other.into();
                app_error.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_renders_conflict() {
        let err = UsageError::InsufficientStock {
            kind: "diesel".to_string(),
            available: 2,
            requested: 9,
        };
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_unknown_soldier_renders_not_found() {
        let err = UsageError::UnknownSoldier(Uuid::nil());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_compensation_failure_renders_internal_error() {
        let err = UsageError::CompensationFailed {
            kinds: vec!["weapon".to_string()],
            reason: "ledger gone".to_string(),
        };
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unavailable_renders_503() {
        let err = UsageError::Unavailable("snapshot retries exhausted".to_string());
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
