use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode, ErrorResponse};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Counter not found: {0}")]
    NotFound(Uuid),

    #[error("Unknown resource kind: '{0}'")]
    UnknownKind(String),

    #[error("Duplicate resource kind: '{0}'")]
    DuplicateKind(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("insufficient stock of '{kind}': available {available}, requested {requested}")]
    InsufficientStock {
        kind: String,
        available: u64,
        requested: u64,
    },

    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Convert LedgerError to AppError for standardized error responses
impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(id) => AppError::NotFound(format!("Counter {} not found", id)),
            LedgerError::UnknownKind(kind) => {
                AppError::BadRequest(format!("Unknown resource kind: '{}'", kind))
            }
            LedgerError::DuplicateKind(kind) => {
                AppError::Conflict(format!("Resource kind '{}' already exists", kind))
            }
            LedgerError::InvalidAmount(msg) => AppError::BadRequest(msg),
            LedgerError::Validation(msg) => AppError::BadRequest(msg),
            LedgerError::InsufficientStock { kind, available, requested } => {
                AppError::Conflict(format!(
                    "insufficient stock of '{}': available {}, requested {}",
                    kind, available, requested
                ))
            }
            LedgerError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
        }
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        // Domain-specific codes carry structured details; everything else
        // uses the standardized AppError response format.
        match self {
            LedgerError::InsufficientStock { ref kind, available, requested } => {
                let body = ErrorResponse::new(ErrorCode::InsufficientStock, self.to_string())
                    .with_details(serde_json::json!({
                        "kind": kind,
                        "available": available,
                        "requested": requested,
                    }));
                (StatusCode::CONFLICT, Json(body)).into_response()
            }
            LedgerError::UnknownKind(ref kind) => {
                let body = ErrorResponse::new(ErrorCode::UnknownResourceKind, self.to_string())
                    .with_details(serde_json::json!({ "kind": kind }));
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
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
        let err = LedgerError::InsufficientStock {
            kind: "weapon".to_string(),
            available: 6,
            requested: 8,
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_unknown_kind_renders_bad_request() {
        let response = LedgerError::UnknownKind("plasma".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_renders_404() {
        let response = LedgerError::NotFound(Uuid::nil()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unavailable_renders_503() {
        let response = LedgerError::Unavailable("lock poisoned".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
