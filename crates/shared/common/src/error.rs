//! Unified error handling for HTTP and gRPC.
//!
//! Provides a single error type that can be converted to:
//! - Axum HTTP responses (for the gateway)
//! - Tonic gRPC status codes (for the user-service)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use tonic::Status;

/// Application error types with support for both HTTP and gRPC.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("{0}")]
    NotFound(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("{context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: sea_orm::DbErr,
    },

    // gRPC specific
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Service unavailable")]
    ServiceUnavailable(String),

    #[error("gRPC error: {0}")]
    Grpc(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl AppError {
    /// Get error code for logs and clients
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            #[cfg(feature = "database")]
            AppError::Storage { .. } => "DATABASE_ERROR",
            AppError::Timeout(_) => "TIMEOUT",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::Grpc(_) => "GRPC_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),

            // Hide details for internal errors
            #[cfg(feature = "database")]
            AppError::Storage { context, .. } => context.clone(),
            AppError::Internal(_) => "An internal error occurred".to_string(),
            AppError::ServiceUnavailable(_) => "The user service is unavailable".to_string(),
            AppError::Grpc(_) => "A service communication error occurred".to_string(),

            // Use default message for others
            _ => self.to_string(),
        }
    }

    /// Whether the message sent to clients hides the underlying cause
    pub fn is_internal(&self) -> bool {
        match self {
            #[cfg(feature = "database")]
            AppError::Storage { .. } => true,
            AppError::Internal(_) | AppError::ServiceUnavailable(_) | AppError::Grpc(_) => true,
            _ => false,
        }
    }

    /// Render as an HTTP response with an explicit status.
    ///
    /// The body keeps the `{code, message}` shape whatever status is chosen.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        let body = ErrorBody {
            code: status.as_u16(),
            message: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        self.into_response_with(status)
    }
}

// =============================================================================
// gRPC Status (Tonic)
// =============================================================================

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        if err.is_internal() {
            tracing::error!(code = err.code(), "Request failed: {:?}", err);
        }

        let code = match &err {
            AppError::NotFound(_) => tonic::Code::NotFound,
            AppError::Validation(_) | AppError::BadRequest(_) => tonic::Code::InvalidArgument,
            AppError::Timeout(_) => tonic::Code::DeadlineExceeded,
            AppError::ServiceUnavailable(_) => tonic::Code::Unavailable,
            _ => tonic::Code::Internal,
        };

        Status::new(code, err.user_message())
    }
}

impl From<Status> for AppError {
    fn from(status: Status) -> Self {
        let message = status.message().to_string();
        match status.code() {
            tonic::Code::NotFound => AppError::NotFound(message),
            tonic::Code::InvalidArgument => AppError::Validation(message),
            tonic::Code::DeadlineExceeded | tonic::Code::Cancelled => AppError::Timeout(message),
            tonic::Code::Unavailable => AppError::ServiceUnavailable(message),
            tonic::Code::Internal => AppError::Internal(message),
            _ => AppError::Grpc(message),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            not_found @ DomainError::NotFound(_) => AppError::NotFound(not_found.to_string()),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(entity))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(entity: &str) -> Self {
        AppError::from(DomainError::not_found(entity))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    #[cfg(feature = "database")]
    pub fn storage(context: impl Into<String>, source: sea_orm::DbErr) -> Self {
        AppError::Storage {
            context: context.into(),
            source,
        }
    }

    /// Whether this is a not-found outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_grpc_codes() {
        let invalid: Status = AppError::validation("invalid name format").into();
        assert_eq!(invalid.code(), tonic::Code::InvalidArgument);
        assert_eq!(invalid.message(), "invalid name format");

        let missing: Status = AppError::not_found("user").into();
        assert_eq!(missing.code(), tonic::Code::NotFound);
        assert_eq!(missing.message(), "user not found");

        let internal: Status = AppError::internal("connection reset").into();
        assert_eq!(internal.code(), tonic::Code::Internal);
        assert_eq!(internal.message(), "An internal error occurred");
    }

    #[test]
    fn grpc_status_round_trips_to_app_error() {
        let err = AppError::from(Status::not_found("user not found"));
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "user not found");

        let err = AppError::from(Status::invalid_argument("invalid email format"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = AppError::from(Status::deadline_exceeded("timeout expired"));
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);

        let err = AppError::from(Status::unavailable("tcp connect error"));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let err = AppError::from(Status::unknown("boom"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn explicit_status_overrides_taxonomy_but_keeps_message() {
        let response = AppError::validation("invalid name format")
            .into_response_with(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::bad_request("expected value").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn only_server_side_failures_hide_their_cause() {
        assert!(AppError::internal("connection reset").is_internal());
        assert!(AppError::Grpc("h2 protocol error".to_string()).is_internal());
        assert!(!AppError::validation("invalid name format").is_internal());
        assert!(!AppError::not_found("user").is_internal());
        assert!(!AppError::Timeout("deadline".to_string()).is_internal());

        assert_eq!(
            AppError::internal("connection reset").user_message(),
            "An internal error occurred"
        );
    }

    #[test]
    fn domain_errors_convert_to_matching_kind() {
        let err = AppError::from(DomainError::validation("invalid email format"));
        assert!(matches!(err, AppError::Validation(ref m) if m == "invalid email format"));

        let err = AppError::from(DomainError::not_found("user"));
        assert!(matches!(err, AppError::NotFound(ref m) if m == "user not found"));
    }

    #[cfg(feature = "database")]
    #[test]
    fn storage_errors_keep_context_and_hide_cause() {
        let err = AppError::storage(
            "failed to create user",
            sea_orm::DbErr::Custom("connection refused".into()),
        );
        let rendered = err.to_string();
        assert!(rendered.starts_with("failed to create user: "));
        assert!(rendered.contains("connection refused"));
        assert_eq!(err.user_message(), "failed to create user");
        assert!(err.is_internal());

        let status: Status = err.into();
        assert_eq!(status.code(), tonic::Code::Internal);
    }
}
