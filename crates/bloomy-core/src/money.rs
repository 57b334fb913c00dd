//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing float prices:                                                  │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    Every price, subtotal, fee and total is an i64 count of cents        │
//! │    (qəpik for AZN). Only the edge turns it into text.                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Labels
//! Older catalog snapshots carried formatted strings (`"$45"`, `"60 AZN"`)
//! instead of numbers. [`Money::parse_label`] reads either form once, at the
//! boundary, so nothing downstream ever parses display text.
//!
//! ## Usage
//! ```rust
//! use bloomy_core::money::{Currency, Money};
//!
//! let price = Money::from_major(45);
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.cents(), 9000);
//!
//! assert_eq!(Money::parse_label("60 AZN").unwrap(), Money::from_major(60));
//! assert_eq!(Currency::Azn.format(line, true), "90 AZN");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic never has to think about underflow
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **No currency inside**: the storefront sells in one currency, held by
///   configuration and applied at display time
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ```rust
    /// use bloomy_core::money::Money;
    /// assert_eq!(Money::from_major(45).cents(), 4500);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(100))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Rounds to whole units, halves upward.
    ///
    /// The checkout screens show totals as rounded whole numbers
    /// (`"95 AZN"`), with 0.5 rounding up.
    ///
    /// ```rust
    /// use bloomy_core::money::Money;
    /// assert_eq!(Money::from_cents(4550).round_major(), 46);
    /// assert_eq!(Money::from_cents(4549).round_major(), 45);
    /// ```
    #[inline]
    pub const fn round_major(&self) -> i64 {
        self.0.saturating_add(50).div_euclid(100)
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ```rust
    /// use bloomy_core::money::Money;
    ///
    /// let unit_price = Money::from_major(38);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 11400);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Parses a catalog price label.
    ///
    /// ## Accepted Shapes
    /// ```text
    /// "$45"      → 45.00   (leading symbol stripped)
    /// "60 AZN"   → 60.00   (trailing unit text stripped)
    /// "12.5"     → 12.50
    /// "₼ 7.25"   → 7.25
    /// ```
    ///
    /// ## Rejected
    /// Empty labels, labels without digits, negative amounts, more than two
    /// decimals, or a second number anywhere in the label.
    pub fn parse_label(label: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let label = label.trim();
        let start = label
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| invalid("no amount found"))?;
        let (prefix, rest) = label.split_at(start);

        if prefix.contains('-') {
            return Err(invalid("amount must not be negative"));
        }
        if prefix.ends_with('.') {
            return Err(invalid("amount must start with a digit"));
        }

        let end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, suffix) = rest.split_at(end);

        if suffix.chars().any(|c| c.is_ascii_digit()) {
            return Err(invalid("more than one amount"));
        }

        let (whole, frac) = match number.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (number, ""),
        };

        if frac.len() > 2 || frac.contains('.') {
            return Err(invalid("at most two decimal places"));
        }

        let whole: i64 = whole.parse().map_err(|_| invalid("not a number"))?;
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("not a number"))? * 10,
            _ => frac.parse().map_err(|_| invalid("not a number"))?,
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(frac_cents))
            .map(Money)
            .ok_or_else(|| invalid("amount too large"))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering without a currency marker.
///
/// Use [`Currency::format`] for anything a customer sees.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Currency
// =============================================================================

/// The currency the storefront sells in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Azerbaijani manat, shown as a suffix: `"95 AZN"`.
    #[default]
    Azn,
    /// US dollar, shown as a prefix: `"$95.00"`.
    Usd,
}

impl Currency {
    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Azn => "AZN",
            Currency::Usd => "USD",
        }
    }

    /// Formats an amount for display.
    ///
    /// `rounded` shows whole units only, the way the cart and checkout
    /// screens print totals.
    ///
    /// ```rust
    /// use bloomy_core::money::{Currency, Money};
    ///
    /// let total = Money::from_cents(9550);
    /// assert_eq!(Currency::Azn.format(total, true), "96 AZN");
    /// assert_eq!(Currency::Azn.format(total, false), "95.50 AZN");
    /// assert_eq!(Currency::Usd.format(total, false), "$95.50");
    /// ```
    pub fn format(&self, amount: Money, rounded: bool) -> String {
        let number = if rounded {
            amount.round_major().to_string()
        } else {
            amount.to_string()
        };

        match self {
            Currency::Azn => format!("{} AZN", number),
            Currency::Usd => match number.strip_prefix('-') {
                Some(abs) => format!("-${}", abs),
                None => format!("${}", number),
            },
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AZN" => Ok(Currency::Azn),
            "USD" => Ok(Currency::Usd),
            other => Err(ValidationError::InvalidFormat {
                field: "currency".to_string(),
                reason: format!("unsupported currency '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
