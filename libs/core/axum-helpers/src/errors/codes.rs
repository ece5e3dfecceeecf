//! Type-safe error codes for API responses.
//!
//! This module provides a single source of truth for error codes used across
//! the application. Each error code includes:
//! - String representation for client consumption (e.g., "VALIDATION_ERROR")
//! - Integer code for logging and monitoring (e.g., 1001)
//! - Default human-readable message

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
///
/// This enum provides a type-safe way to represent error codes across the
/// application. It combines string identifiers (for clients), integer codes
/// (for monitoring), and default messages (for consistency).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Invalid UUID format in path or query parameter
    InvalidUuid,

    /// Requested resource was not found
    NotFound,

    /// Request conflicts with current resource state (e.g., duplicate resource)
    Conflict,

    /// Request payload is semantically incorrect
    UnprocessableEntity,

    /// JSON extraction from request body failed
    JsonExtraction,

    // Server errors (1000s)
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    /// JSON serialization failed
    SerdeJsonError,

    /// I/O error
    IoError,

    // Inventory/usage domain errors (3000-3999)
    /// Requested quantity exceeds available stock
    InsufficientStock,

    /// Resource kind is not registered in the ledger
    UnknownResourceKind,

    /// Soldier is not known to the personnel directory
    UnknownSoldier,

    /// Stock was debited but the usage record could not be written
    UsageNotRecorded,

    /// A partial consumption could not be rolled back
    CompensationFailed,
}

impl ErrorCode {
    /// String identifier for client consumption.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidUuid => "INVALID_UUID",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            ErrorCode::JsonExtraction => "JSON_EXTRACTION",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::SerdeJsonError => "SERDE_JSON_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::UnknownResourceKind => "UNKNOWN_RESOURCE_KIND",
            ErrorCode::UnknownSoldier => "UNKNOWN_SOLDIER",
            ErrorCode::UsageNotRecorded => "USAGE_NOT_RECORDED",
            ErrorCode::CompensationFailed => "COMPENSATION_FAILED",
        }
    }

    /// Integer code for logging and monitoring.
    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidUuid => 1002,
            ErrorCode::NotFound => 1004,
            ErrorCode::Conflict => 1008,
            ErrorCode::UnprocessableEntity => 1009,
            ErrorCode::JsonExtraction => 1010,
            ErrorCode::InternalError => 1500,
            ErrorCode::ServiceUnavailable => 1503,
            ErrorCode::SerdeJsonError => 1510,
            ErrorCode::IoError => 1511,
            ErrorCode::InsufficientStock => 3001,
            ErrorCode::UnknownResourceKind => 3002,
            ErrorCode::UnknownSoldier => 3003,
            ErrorCode::UsageNotRecorded => 3004,
            ErrorCode::CompensationFailed => 3005,
        }
    }

    /// Default human-readable message.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Request validation failed",
            ErrorCode::InvalidUuid => "Invalid UUID format",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::Conflict => "Resource already exists",
            ErrorCode::UnprocessableEntity => "Request could not be processed",
            ErrorCode::JsonExtraction => "Invalid JSON in request body",
            ErrorCode::InternalError => "An internal server error occurred",
            ErrorCode::ServiceUnavailable => "Service is temporarily unavailable",
            ErrorCode::SerdeJsonError => "Failed to serialize response",
            ErrorCode::IoError => "I/O operation failed",
            ErrorCode::InsufficientStock => "Requested quantity exceeds available stock",
            ErrorCode::UnknownResourceKind => "Resource kind is not registered in the ledger",
            ErrorCode::UnknownSoldier => "Soldier is not known to the personnel directory",
            ErrorCode::UsageNotRecorded => "Stock was debited but usage recording failed",
            ErrorCode::CompensationFailed => "Partial consumption could not be rolled back",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_identifiers_are_screaming_snake_case() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::InsufficientStock.as_str(), "INSUFFICIENT_STOCK");
        assert_eq!(ErrorCode::CompensationFailed.as_str(), "COMPENSATION_FAILED");
    }

    #[test]
    fn test_integer_codes_are_unique() {
        let codes = [
            ErrorCode::ValidationError,
            ErrorCode::InvalidUuid,
            ErrorCode::NotFound,
            ErrorCode::Conflict,
            ErrorCode::UnprocessableEntity,
            ErrorCode::JsonExtraction,
            ErrorCode::InternalError,
            ErrorCode::ServiceUnavailable,
            ErrorCode::SerdeJsonError,
            ErrorCode::IoError,
            ErrorCode::InsufficientStock,
            ErrorCode::UnknownResourceKind,
            ErrorCode::UnknownSoldier,
            ErrorCode::UsageNotRecorded,
            ErrorCode::CompensationFailed,
        ];
        let mut seen = std::collections::HashSet::new();
        for code in codes {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }
}
