//! Application error type shared by the service, repository and HTTP layers.
//!
//! Each variant carries a human-readable message plus structured `details`
//! that end up in the JSON error envelope returned to clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors produced by the shortening core.
///
/// Cache failures and counter failures never appear here: both are logged
/// where they happen and degrade silently.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input, rejected before any store mutation.
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// A caller-supplied code is already taken.
    #[error("{message}")]
    DuplicateCode { message: String, details: Value },

    /// The existence check itself failed, so creation was aborted.
    #[error("{message}")]
    CheckFailed { message: String, details: Value },

    /// The generator could not find a free code within the attempt budget.
    #[error("{message}")]
    CodeSpaceExhausted { message: String, details: Value },

    /// Any other durable store failure.
    #[error("{message}")]
    Store { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_code(code: &str) -> Self {
        Self::DuplicateCode {
            message: "code already exists in the database".to_string(),
            details: json!({ "code": code }),
        }
    }

    /// Wraps a failed existence check with the name of the operation that ran it.
    pub fn check_failed(operation: &str, source: AppError) -> Self {
        Self::CheckFailed {
            message: format!("unable to check if the {operation} already exists in the database"),
            details: json!({ "operation": operation, "reason": source.to_string() }),
        }
    }

    pub fn code_space_exhausted(attempts: usize) -> Self {
        Self::CodeSpaceExhausted {
            message: "Failed to generate unique code".to_string(),
            details: json!({ "attempts": attempts }),
        }
    }

    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }

    /// Machine-readable error code used in the JSON envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::DuplicateCode { .. } => "code_already_exists",
            AppError::CheckFailed { .. } => "check_failed",
            AppError::CodeSpaceExhausted { .. } => "code_space_exhausted",
            AppError::Store { .. } => "store_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::DuplicateCode { .. } => StatusCode::CONFLICT,
            AppError::CheckFailed { .. }
            | AppError::CodeSpaceExhausted { .. }
            | AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::DuplicateCode { message, details }
            | AppError::CheckFailed { message, details }
            | AppError::CodeSpaceExhausted { message, details }
            | AppError::Store { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.kind(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::DuplicateCode {
                message: "code already exists in the database".to_string(),
                details: json!({ "constraint": db.constraint(), "reason": db.message() }),
            };
        }

        AppError::store("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect::<serde_json::Map<String, Value>>();

        AppError::bad_request("Validation failed", Value::Object(details))
    }
}
