//! # Classhub Payments
//!
//! Creates payment intents with the card processor.
//!
//! The API only ever needs one thing from the processor: a client secret
//! the browser can use to confirm a card payment. [`PaymentGateway`] is
//! that seam, [`StripeGateway`] is the production implementation and
//! tests substitute their own.

pub mod stripe;

use async_trait::async_trait;
use classhub_core::AppError;
use tracing::error;

pub use stripe::StripeGateway;

/// A payment intent as returned by the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Invalid payment amount")]
    InvalidAmount,

    #[error("Payment provider is not configured")]
    NotConfigured,

    #[error("Payment provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Payment provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::InvalidAmount => AppError::bad_request(err),
            _ => {
                error!(error = %err, "Payment provider error");
                AppError::bad_gateway(err)
            }
        }
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a card payment intent for `amount_minor` units of `currency`
    /// (cents for `usd`).
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError>;
}

/// Converts a decimal price to minor currency units, rounding to the
/// nearest cent.
///
/// Returns `None` for negative, NaN or infinite prices.
pub fn to_minor_units(price: f64) -> Option<i64> {
    if !price.is_finite() || price < 0.0 {
        return None;
    }
    let cents = (price * 100.0).round();
    if cents > i64::MAX as f64 {
        return None;
    }
    Some(cents as i64)
}
