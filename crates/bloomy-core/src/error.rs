//! # Error Types
//!
//! Domain-specific error types for bloomy-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bloomy-core errors (this file)                                        │
//! │  ├── CoreError        - Checkout / catalog rule violations             │
//! │  ├── ValidationError  - A single field failed validation               │
//! │  └── FieldErrors      - All failing fields of one form                 │
//! │                                                                         │
//! │  bloomy-db errors (separate crate)                                     │
//! │  └── DbError          - Storage failures                               │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the screens see (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → FieldErrors → CoreError → ApiError → Screen   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store mutators never return errors: an unknown id is a silent no-op.
//! Errors only come from the checks that run before a mutator is called.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    ///
    /// ## When This Occurs
    /// - Opening the detail view for a stale or mistyped product id
    /// - Adding a product to the cart that the catalog no longer has
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Address id is not in the address book.
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A checkout step was skipped.
    ///
    /// ## When This Occurs
    /// - Paying before a delivery date was chosen
    /// - Paying before a delivery address was chosen
    #[error("Checkout is incomplete: {missing} not selected")]
    CheckoutIncomplete { missing: String },

    /// The payment gateway declined the charge.
    #[error("Payment declined: {reason}")]
    PaymentDeclined { reason: String },

    /// Single-field validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Multi-field form validation error.
    #[error("Validation failed: {0}")]
    Form(#[from] FieldErrors),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before a store mutator runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed expiry, unparseable price label).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields that must match do not.
    #[error("{field} does not match")]
    Mismatch { field: String },

    /// Date lies before the earliest allowed day.
    #[error("{field} cannot be in the past")]
    InPast { field: String },
}

impl ValidationError {
    /// Name of the field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Mismatch { field }
            | ValidationError::InPast { field } => field,
        }
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// A single inline message rendered beneath a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All failing fields of one form, in the order the form lists them.
///
/// Screens render `message` inline under the matching input and block the
/// submit that would have touched the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors(Vec::new())
    }

    /// Records a message for `field`. A field keeps its first message.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if self.get(&field).is_none() {
            self.0.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    /// Returns the message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::CheckoutIncomplete {
            missing: "delivery date".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Checkout is incomplete: delivery date not selected"
        );
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "title".to_string(),
        };
        assert_eq!(err.to_string(), "title is required");
        assert_eq!(err.field(), "title");

        let err = ValidationError::TooShort {
            field: "cvv".to_string(),
            min: 3,
        };
        assert_eq!(err.to_string(), "cvv must be at least 3 characters");
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.add("cvv", "Enter CVV.");
        errors.add("cvv", "Enter a valid CVV.");
        errors.add("expiry", "Enter the expiration date correctly");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("cvv"), Some("Enter CVV."));
        assert_eq!(
            errors.to_string(),
            "cvv: Enter CVV.; expiry: Enter the expiration date correctly"
        );
    }

    #[test]
    fn test_field_errors_into_result() {
        assert_eq!(FieldErrors::new().into_result(7), Ok(7));

        let mut errors = FieldErrors::new();
        errors.add("name", "Please fill in all fields");
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "address".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let core_err: CoreError = FieldErrors::new().into();
        assert!(matches!(core_err, CoreError::Form(_)));
    }
}
