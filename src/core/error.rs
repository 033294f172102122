//! Typed error handling for the payment service
//!
//! Every operation returns a [`PaymentError`] whose category tells the caller
//! how to react, rather than an opaque `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`NotFoundError`]: the identifier an operation targeted does not exist
//! - [`ValidationError`]: caller input was rejected (which field and why)
//! - [`StorageError`]: the record store failed (connection loss, constraint violation)
//! - [`ConfigError`]: configuration could not be loaded or is inconsistent
//!
//! # Example
//!
//! ```rust,ignore
//! use payments::prelude::*;
//!
//! match service.get(id).await {
//!     Ok(payment) => println!("Found: {:?}", payment),
//!     Err(PaymentError::NotFound(err)) => println!("{} failed: {} is gone", err.operation, err.id),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for the payment service
#[derive(Debug)]
pub enum PaymentError {
    /// The targeted payment does not exist
    NotFound(NotFoundError),

    /// Caller input was rejected
    Validation(ValidationError),

    /// Record store failure
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),
}

impl fmt::Display for PaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentError::NotFound(e) => write!(f, "{}", e),
            PaymentError::Validation(e) => write!(f, "{}", e),
            PaymentError::Storage(e) => write!(f, "{}", e),
            PaymentError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PaymentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaymentError::NotFound(e) => Some(e),
            PaymentError::Validation(e) => Some(e),
            PaymentError::Storage(e) => Some(e),
            PaymentError::Config(e) => Some(e),
        }
    }
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
    /// When the error was produced
    pub timestamp: DateTime<Utc>,
}

impl PaymentError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::NotFound(_) => StatusCode::NOT_FOUND,
            PaymentError::Validation(_) => StatusCode::BAD_REQUEST,
            PaymentError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PaymentError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PaymentError::NotFound(_) => "PAYMENT_NOT_FOUND",
            PaymentError::Validation(_) => "VALIDATION_ERROR",
            PaymentError::Storage(_) => "STORAGE_ERROR",
            PaymentError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
            timestamp: Utc::now(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            PaymentError::NotFound(NotFoundError { operation, id }) => Some(serde_json::json!({
                "operation": operation,
                "id": id.to_string()
            })),
            PaymentError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            PaymentError::Validation(ValidationError::FieldError { field, .. }) => {
                Some(serde_json::json!({ "field": field }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Not Found
// =============================================================================

/// Targeted lifecycle operation that can fail with not-found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Get,
    Update,
    UpdateStatus,
    UpdateNote,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Get => "get",
            Operation::Update => "update",
            Operation::UpdateStatus => "update status",
            Operation::UpdateNote => "update note",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// The payment an operation targeted does not exist
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Payment not found for id: {id}")]
pub struct NotFoundError {
    pub operation: Operation,
    pub id: Uuid,
}

impl NotFoundError {
    pub fn new(operation: Operation, id: Uuid) -> Self {
        Self { operation, id }
    }
}

impl From<NotFoundError> for PaymentError {
    fn from(err: NotFoundError) -> Self {
        PaymentError::NotFound(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Requested sort field is not a sortable payment field
    #[error("Unknown sort field '{field}'")]
    UnknownSortField { field: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    /// Flatten `validator` output into field errors, ordered by field name
    ///
    /// Field names are reported in their wire (camelCase) form.
    pub fn from_validator(errors: &validator::ValidationErrors) -> Vec<Self> {
        let mut out: Vec<Self> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = snake_to_camel(&field);
                errs.iter().map(move |e| FieldValidationError {
                    field: field.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        out.sort_by(|a, b| a.field.cmp(&b.field));
        out
    }
}

/// Convert snake_case to camelCase
fn snake_to_camel(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut upper_next = false;
    for ch in s.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            result.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }
    result
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<ValidationError> for PaymentError {
    fn from(err: ValidationError) -> Self {
        PaymentError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Query execution error
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// Stored data could not be mapped back to a payment
    #[error("Data integrity error: {message}")]
    IntegrityError { message: String },

    /// Backend not available
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

impl From<StorageError> for PaymentError {
    fn from(err: StorageError) -> Self {
        PaymentError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

impl From<ConfigError> for PaymentError {
    fn from(err: ConfigError) -> Self {
        PaymentError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

// =============================================================================
// Tests
// =============================================================================
