//! Payment provider configuration.
//!
//! - `STRIPE_SECRET_KEY`: secret API key (required for checkout to work);
//!   `STRIPE_KEY` is accepted as a fallback
//! - `STRIPE_API_BASE`: API origin, overridable for test doubles
//!   (default `https://api.stripe.com`)
//! - `PAYMENT_CURRENCY`: ISO currency code for payment intents (default `usd`)

use std::env;

#[derive(Clone)]
pub struct PaymentConfig {
    pub secret_key: String,
    pub api_base: String,
    pub currency: String,
}

impl PaymentConfig {
    pub fn from_env() -> Self {
        Self {
            secret_key: env::var("STRIPE_SECRET_KEY")
                .or_else(|_| env::var("STRIPE_KEY"))
                .unwrap_or_default(),
            api_base: env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            currency: env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "usd".to_string()),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.secret_key.is_empty()
    }
}

// The secret key must never end up in logs.
impl std::fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("secret_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("currency", &self.currency)
            .finish()
    }
}
