//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Bloomy                                 │
//! │                                                                         │
//! │  Screen                       Rust Backend                              │
//! │  ──────                       ────────────                              │
//! │                                                                         │
//! │  pay(form)                                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Form invalid? ──── FieldErrors ─────────────────┐               │  │
//! │  │         │                                        │               │  │
//! │  │         ▼                                        ▼               │  │
//! │  │  Rule broken? ───── CoreError ──────────────► ApiError ────────►│  │
//! │  │         │                                        ▲               │  │
//! │  │         ▼                                        │               │  │
//! │  │  Storage failed? ── DbError ─────────────────────┘               │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "VALIDATION_ERROR",                                          │
//! │    "message": "Please correct the highlighted fields",                  │
//! │    "fields": [{ "field": "cvv", "message": "Enter CVV." }] }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bloomy_core::{CoreError, FieldErrors, ValidationError};
use bloomy_db::DbError;
use serde::Serialize;

use crate::payment::PaymentError;
use crate::state::ConfigError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Inline messages for form fields, when a form was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product, address or other resource not found.
    /// The screen shows its "not found" view with a single "Go back" action.
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Storage operation failed
    DatabaseError,

    /// A checkout step was skipped or the cart is empty
    CheckoutIncomplete,

    /// Cart operation failed
    CartError,

    /// Payment processing error
    PaymentError,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: None,
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// A rejected form. The message is the first field's message.
    pub fn form(fields: FieldErrors) -> Self {
        let message = fields
            .iter()
            .next()
            .map(|f| f.message.clone())
            .unwrap_or_else(|| "Invalid input".to_string());
        ApiError {
            code: ErrorCode::ValidationError,
            message,
            fields: Some(fields),
        }
    }

    /// A single rejected field, shaped like a form error.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.add(field, message);
        ApiError::form(fields)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Serialization { key, message } => {
                tracing::error!(key = %key, "Stored blob is corrupt: {}", message);
                ApiError::new(ErrorCode::DatabaseError, "Stored data could not be read")
            }
            DbError::QueryFailed(e) | DbError::Internal(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database operation failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::AddressNotFound(id) => ApiError::not_found("Address", &id),
            CoreError::EmptyCart => ApiError::new(ErrorCode::CheckoutIncomplete, "Your cart is empty"),
            CoreError::CheckoutIncomplete { missing } => ApiError::new(
                ErrorCode::CheckoutIncomplete,
                format!("Please select a {}", missing),
            ),
            CoreError::PaymentDeclined { reason } => {
                ApiError::new(ErrorCode::PaymentError, format!("Payment declined: {}", reason))
            }
            CoreError::Validation(e) => ApiError::from(e),
            CoreError::Form(fields) => ApiError::form(fields),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let message = err.to_string();
        let mut fields = FieldErrors::new();
        fields.add(err.field(), message.clone());
        ApiError {
            code: ErrorCode::ValidationError,
            message,
            fields: Some(fields),
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(fields: FieldErrors) -> Self {
        ApiError::form(fields)
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        ApiError::new(ErrorCode::PaymentError, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
