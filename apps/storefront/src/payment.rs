//! # Payment Gateway
//!
//! The seam between a validated card and whatever takes the money.
//!
//! ```text
//!   validate_card(form) ──► CardDetails ──► PaymentGateway::charge(card, total)
//!                                                  │
//!                              ┌───────────────────┴───────────────────┐
//!                              ▼                                       ▼
//!                  SimulatedPaymentGateway                    a real processor
//!                  always approves, PAY-<uuid>                (same contract)
//! ```
//!
//! Validation and order creation do not change when a real gateway is
//! plugged in; only the implementation behind the trait does.

use async_trait::async_trait;
use bloomy_core::validation::CardDetails;
use bloomy_core::Money;
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Why a charge did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("Payment declined: {0}")]
    Declined(String),

    #[error("Payment amount must be positive")]
    InvalidAmount,

    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// Proof of a successful charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    /// Gateway reference, `PAY-<uuid>` for the simulated gateway.
    pub reference: String,
    pub amount: Money,
    pub card_last4: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charges `amount` to `card`.
    async fn charge(&self, card: &CardDetails, amount: Money) -> Result<PaymentReceipt, PaymentError>;
}

/// Approves every positive charge without contacting anyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedPaymentGateway;

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn charge(&self, card: &CardDetails, amount: Money) -> Result<PaymentReceipt, PaymentError> {
        if !amount.is_positive() {
            return Err(PaymentError::InvalidAmount);
        }

        let receipt = PaymentReceipt {
            reference: format!("PAY-{}", Uuid::new_v4()),
            amount,
            card_last4: card.last4.clone(),
        };

        info!(
            reference = %receipt.reference,
            amount = %amount,
            last4 = %card.last4,
            "Simulated payment approved"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> CardDetails {
        CardDetails {
            last4: "3456".to_string(),
            holder: "Aysel Mammadova".to_string(),
            expiry_month: 3,
            expiry_year: 27,
        }
    }

    #[tokio::test]
    async fn test_simulated_gateway_approves() {
        let receipt = SimulatedPaymentGateway
            .charge(&card(), Money::from_major(95))
            .await
            .unwrap();

        assert!(receipt.reference.starts_with("PAY-"));
        assert_eq!(receipt.amount, Money::from_major(95));
        assert_eq!(receipt.card_last4, "3456");
    }

    #[tokio::test]
    async fn test_simulated_gateway_rejects_zero() {
        let err = SimulatedPaymentGateway
            .charge(&card(), Money::zero())
            .await
            .unwrap_err();
        assert_eq!(err, PaymentError::InvalidAmount);
    }
}
