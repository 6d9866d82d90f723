//! Typed error handling for the yamdb API
//!
//! Every handler returns [`ApiResult`]. The error hierarchy is small on purpose:
//! a request either succeeds or fails with exactly one [`ApiError`], which maps
//! to one HTTP status and one JSON body.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: input rejected at the serialization boundary (400)
//! - [`ApiError::NotFound`]: a path or lookup key resolves to nothing (404)
//! - [`ApiError::Unauthorized`] / [`ApiError::Forbidden`]: auth failures
//! - [`StorageError`]: repository failures; unique violations become 400
//!
//! # Example
//!
//! ```rust,ignore
//! let title = store.titles.get(title_id).await?.ok_or_else(|| ApiError::not_found("title", title_id))?;
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Human-readable messages for the domain rules, in the service locale
pub mod messages {
    pub const DUPLICATE_REVIEW: &str = "На одно произведение можно оставить только один отзыв.";
    pub const RESERVED_USERNAME: &str = "Использовать имя \"me\" запрещено";
    pub const USERNAME_TAKEN: &str = "Пользователь с таким username уже существует";
    pub const EMAIL_TAKEN: &str = "Пользователь с таким email уже существует";
    pub const INVALID_CONFIRMATION_CODE: &str = "Неверный код подтверждения";
}

/// Result alias used by handlers and validators
pub type ApiResult<T> = Result<T, ApiError>;

/// The main error type of the API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected by a validation rule
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    /// Missing or invalid credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to perform the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Storage backend failure
    #[error(transparent)]
    Storage(StorageError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Shorthand for a not-found error keyed by anything displayable
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        ApiError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Validation(ValidationError::Fields(errors)) => Some(serde_json::json!({
                "kind": "fields",
                "fields": errors,
            })),
            ApiError::Validation(e) => Some(serde_json::json!({ "kind": e.kind() })),
            ApiError::NotFound { entity, key } => Some(serde_json::json!({
                "entity": entity,
                "key": key,
            })),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors raised at the serialization boundary
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{}", messages::DUPLICATE_REVIEW)]
    DuplicateReview,

    #[error("{}", messages::RESERVED_USERNAME)]
    ReservedUsername,

    #[error("{}", messages::USERNAME_TAKEN)]
    UsernameTaken,

    #[error("{}", messages::EMAIL_TAKEN)]
    EmailTaken,

    /// A slug reference (category or genre) resolves to nothing
    #[error("Объект с slug={slug} не существует.")]
    UnknownSlug { field: &'static str, slug: String },

    #[error("{}", messages::INVALID_CONFIRMATION_CODE)]
    InvalidConfirmationCode,

    /// Unique constraint enforced by the repository
    #[error("Запись с таким {field} уже существует.")]
    Unique {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Field-level failures (presence, type, length, pattern)
    #[error("Validation errors: {}", format_fields(.0))]
    Fields(Vec<FieldValidationError>),

    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn format_fields(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// Stable machine-readable kind, exposed in the response details
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::DuplicateReview => "duplicate_review",
            ValidationError::ReservedUsername => "reserved_username",
            ValidationError::UsernameTaken => "username_taken",
            ValidationError::EmailTaken => "email_taken",
            ValidationError::UnknownSlug { .. } => "unknown_slug",
            ValidationError::InvalidConfirmationCode => "invalid_confirmation_code",
            ValidationError::Unique { .. } => "unique",
            ValidationError::Fields(_) => "fields",
            ValidationError::InvalidJson { .. } => "invalid_json",
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    FieldValidationError::new(field.clone(), message)
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::Fields(fields)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.into())
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by repository implementations
#[derive(Debug, Error)]
pub enum StorageError {
    /// A unique key of the record collides with an existing one
    #[error("{entity} with {field} '{value}' already exists")]
    UniqueViolation {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Update target does not exist
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Lock poisoned or backend unreachable
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UniqueViolation {
                entity: "user",
                field: "username",
                ..
            } => ApiError::Validation(ValidationError::UsernameTaken),
            StorageError::UniqueViolation {
                entity: "user",
                field: "email",
                ..
            } => ApiError::Validation(ValidationError::EmailTaken),
            StorageError::UniqueViolation {
                entity,
                field,
                value,
            } => ApiError::Validation(ValidationError::Unique {
                entity,
                field,
                value,
            }),
            StorageError::NotFound { entity, id } => ApiError::not_found(entity, id),
            other => ApiError::Storage(other),
        }
    }
}
