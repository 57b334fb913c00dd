//! # Validation Module
//!
//! Form validation for Bloomy.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Screen                                                        │
//! │  ├── Collects raw form fields                                          │
//! │  └── Renders inline messages from FieldErrors                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command (storefront)                                         │
//! │  └── THIS MODULE: every form is checked before a mutator runs          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: AppState mutators                                            │
//! │  └── Trust their input, never fail                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single values fail with a [`ValidationError`]. Whole forms collect every
//! failing field into [`FieldErrors`], keyed by the form's field names, with
//! the exact message the screen shows.
//!
//! ## Usage
//! ```rust
//! use bloomy_core::validation::{validate_card, validate_quantity, PaymentForm};
//!
//! validate_quantity(5).unwrap();
//!
//! let form = PaymentForm {
//!     card_number: "4169 7388 1234 5678".to_string(),
//!     card_name: "Aysel Mammadova".to_string(),
//!     expiry: "03/27".to_string(),
//!     cvv: "123".to_string(),
//! };
//! assert_eq!(validate_card(&form).unwrap().last4, "5678");
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FieldErrors, ValidationError};
use crate::{MAX_ITEM_QUANTITY, MIN_EXPIRY_YEAR};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for whole-form validation.
pub type FormResult<T> = Result<T, FieldErrors>;

// =============================================================================
// Messages
// =============================================================================

pub const MSG_CARD_NUMBER: &str = "Enter the card number correctly.";
pub const MSG_CARD_NAME: &str = "Enter the cardholder name.";
pub const MSG_EXPIRY: &str = "Enter the expiration date correctly";
pub const MSG_CVV_REQUIRED: &str = "Enter CVV.";
pub const MSG_CVV_INVALID: &str = "Enter a valid CVV.";
pub const MSG_SIGN_UP_REQUIRED: &str = "Please fill in all fields";
pub const MSG_GMAIL_ONLY: &str = "Email must be a @gmail address";
pub const MSG_FORM_REQUIRED: &str = "Please fill out all fields.";
pub const MSG_PASSWORD_MISMATCH: &str = "New passwords do not match.";
pub const MSG_ADDRESS_REQUIRED: &str = "Please fill in all fields.";
pub const MSG_CONTACT_REQUIRED: &str = "Please enter a message.";

// =============================================================================
// Payment
// =============================================================================

/// The card form on the payment sheet, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    pub card_number: String,
    pub card_name: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvv: String,
}

/// A card that passed validation. Only the last four digits are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub last4: String,
    pub holder: String,
    pub expiry_month: u32,
    pub expiry_year: u32,
}

/// Validates the payment sheet.
///
/// ## Rules
/// - Card number: non-digits stripped, exactly 16 digits remain
/// - Cardholder: non-blank after trimming
/// - Expiry: `MM/YY`, month 1..=12, year ≥ 26, no `-` anywhere
/// - CVV: present, no `-`, at least 3 characters
///
/// ## Example
/// ```rust
/// use bloomy_core::validation::{validate_card, PaymentForm};
///
/// let form = PaymentForm {
///     card_number: "123".to_string(),
///     card_name: " ".to_string(),
///     expiry: "13/27".to_string(),
///     cvv: String::new(),
/// };
/// let errors = validate_card(&form).unwrap_err();
/// assert_eq!(errors.len(), 4);
/// assert_eq!(errors.get("cvv"), Some("Enter CVV."));
/// ```
pub fn validate_card(form: &PaymentForm) -> FormResult<CardDetails> {
    let mut errors = FieldErrors::new();

    let digits: String = form
        .card_number
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.len() != 16 {
        errors.add("cardNumber", MSG_CARD_NUMBER);
    }

    let holder = form.card_name.trim();
    if holder.is_empty() {
        errors.add("cardName", MSG_CARD_NAME);
    }

    let expiry = parse_expiry(&form.expiry);
    if expiry.is_err() {
        errors.add("expiry", MSG_EXPIRY);
    }

    if form.cvv.is_empty() {
        errors.add("cvv", MSG_CVV_REQUIRED);
    } else if form.cvv.contains('-') || form.cvv.chars().count() < 3 {
        errors.add("cvv", MSG_CVV_INVALID);
    }

    match expiry {
        Ok((expiry_month, expiry_year)) if errors.is_empty() => Ok(CardDetails {
            last4: digits[digits.len() - 4..].to_string(),
            holder: holder.to_string(),
            expiry_month,
            expiry_year,
        }),
        _ => Err(errors),
    }
}

/// Parses `MM/YY` into `(month, year)`.
///
/// ```rust
/// use bloomy_core::validation::parse_expiry;
///
/// assert_eq!(parse_expiry("03/27").unwrap(), (3, 27));
/// assert!(parse_expiry("13/27").is_err()); // month out of range
/// assert!(parse_expiry("03/20").is_err()); // expired year
/// assert!(parse_expiry("03-27").is_err()); // wrong separator
/// ```
pub fn parse_expiry(expiry: &str) -> ValidationResult<(u32, u32)> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "expiry".to_string(),
        reason: reason.to_string(),
    };

    if expiry.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "expiry".to_string(),
        });
    }
    if expiry.contains('-') {
        return Err(invalid("contains '-'"));
    }

    let (month, year) = expiry.split_once('/').ok_or_else(|| invalid("expected MM/YY"))?;
    let month: u32 = month.trim().parse().map_err(|_| invalid("month is not a number"))?;
    let year: u32 = year.trim().parse().map_err(|_| invalid("year is not a number"))?;

    if !(1..=12).contains(&month) {
        return Err(ValidationError::OutOfRange {
            field: "expiry".to_string(),
            min: 1,
            max: 12,
        });
    }
    if year < MIN_EXPIRY_YEAR {
        return Err(invalid("card has expired"));
    }

    Ok((month, year))
}

// =============================================================================
// Account Forms
// =============================================================================

/// Validates the sign-up form.
///
/// All three fields are required; the email must be a Gmail address.
pub fn validate_sign_up(full_name: &str, email: &str, password: &str) -> FormResult<()> {
    let mut errors = FieldErrors::new();

    for (field, value) in [("fullName", full_name), ("email", email), ("password", password)] {
        if value.trim().is_empty() {
            errors.add(field, MSG_SIGN_UP_REQUIRED);
        }
    }
    if !email.trim().is_empty() && !email.to_lowercase().contains("@gmail") {
        errors.add("email", MSG_GMAIL_ONLY);
    }

    errors.into_result(())
}

/// Validates the edit-profile form.
pub fn validate_profile(full_name: &str, email: &str) -> FormResult<()> {
    let mut errors = FieldErrors::new();
    if full_name.trim().is_empty() {
        errors.add("fullName", MSG_FORM_REQUIRED);
    }
    if email.trim().is_empty() {
        errors.add("email", MSG_FORM_REQUIRED);
    }
    errors.into_result(())
}

/// Validates the change-password form.
///
/// Whether `current` matches the stored password is checked against storage
/// by the caller.
pub fn validate_password_change(current: &str, new: &str, confirm: &str) -> FormResult<()> {
    let mut errors = FieldErrors::new();

    for (field, value) in [
        ("currentPassword", current),
        ("newPassword", new),
        ("confirmPassword", confirm),
    ] {
        if value.is_empty() {
            errors.add(field, MSG_FORM_REQUIRED);
        }
    }
    if errors.is_empty() && new != confirm {
        errors.add("confirmPassword", MSG_PASSWORD_MISMATCH);
    }

    errors.into_result(())
}

/// Validates the contact form and returns the trimmed message.
pub fn validate_contact_message(message: &str) -> FormResult<String> {
    let message = message.trim();
    let mut errors = FieldErrors::new();
    if message.is_empty() {
        errors.add("message", MSG_CONTACT_REQUIRED);
    }
    errors.into_result(message.to_string())
}

// =============================================================================
// Address Form
// =============================================================================

/// Validates the add/edit address form.
pub fn validate_address_input(title: &str, address: &str) -> FormResult<()> {
    let mut errors = FieldErrors::new();
    if title.trim().is_empty() {
        errors.add("title", MSG_ADDRESS_REQUIRED);
    }
    if address.trim().is_empty() {
        errors.add("address", MSG_ADDRESS_REQUIRED);
    }
    errors.into_result(())
}

// =============================================================================
// Single Values
// =============================================================================

/// Validates a quantity before it reaches the cart.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a search query.
///
/// Empty is fine (shows the whole category). Returns the trimmed query.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Delivery dates start today; the calendar greys out everything earlier.
pub fn validate_delivery_date(date: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if date < today {
        return Err(ValidationError::InPast {
            field: "date".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
