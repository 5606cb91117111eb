//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in ShareIt                                │
//! │                                                                         │
//! │  Handler → Result<Json<T>, ApiError>                                   │
//! │                │                                                        │
//! │                ├── DbError::Domain(CoreError) ──┐                       │
//! │                ├── DbError (sqlx) ──────────────┤                       │
//! │                ├── ValidationError ─────────────┼──► ApiError           │
//! │                └── Json/Query/Path rejection ───┘        │              │
//! │                                                          ▼              │
//! │                                  status code + { "code", "message" }    │
//! │                                                                         │
//! │  VALIDATION_ERROR  400   bad input, wrong state, unavailable item      │
//! │  NOT_FOUND         404   missing record, or no business with it        │
//! │  DATABASE_ERROR    500   real cause logged, generic message returned   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "Cannot be updated" is a 400, not a 409.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use shareit_core::{CoreError, ValidationError};
use shareit_db::DbError;

/// Error body returned by every failing endpoint.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Booking not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation or booking rule failed (400)
    ValidationError,

    /// Database operation failed (500)
    DatabaseError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status();

        if status.is_client_error() {
            tracing::debug!(code = ?self.code, message = %self.message, "Request rejected");
        }

        (status, Json(self)).into_response()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Domain(core) => core.into(),
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                tracing::error!("Database pool exhausted");
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts booking rule failures to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = if err.is_not_found() {
            ErrorCode::NotFound
        } else {
            ErrorCode::ValidationError
        };

        match err {
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            other => ApiError::new(code, other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_status() {
        let cases = [
            (CoreError::BookingNotFound(1), StatusCode::NOT_FOUND),
            (CoreError::OwnItem { item_id: 1 }, StatusCode::NOT_FOUND),
            (
                CoreError::SelfApproval {
                    booking_id: 1,
                    user_id: 2,
                },
                StatusCode::NOT_FOUND,
            ),
            (CoreError::NotUpdatable { booking_id: 1 }, StatusCode::BAD_REQUEST),
            (CoreError::ItemUnavailable { item_id: 1 }, StatusCode::BAD_REQUEST),
            (CoreError::AlreadyBooked { item_id: 1 }, StatusCode::BAD_REQUEST),
            (
                CoreError::Validation(ValidationError::StartInPast),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).code.status(), status);
        }
    }

    #[test]
    fn test_database_error_hides_details() {
        let err = ApiError::from(DbError::QueryFailed("no such table: bookings".to_string()));

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("bookings"));
    }

    #[test]
    fn test_domain_error_unwrapped() {
        let err = ApiError::from(DbError::Domain(CoreError::NotUpdatable { booking_id: 9 }));

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Booking 9 cannot be updated");
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_value(ApiError::validation("Unknown state: Banana")).unwrap();

        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "Unknown state: Banana");
    }
}
