use std::sync::Arc;

use classhub_config::{CorsConfig, JwtConfig, PaymentConfig};
use classhub_db::{PgPool, PgStore, Store};
use classhub_payments::{PaymentGateway, StripeGateway};

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub payments: Arc<dyn PaymentGateway>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub payment_config: PaymentConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        payments: Arc<dyn PaymentGateway>,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        payment_config: PaymentConfig,
    ) -> Self {
        Self {
            store,
            payments,
            jwt_config,
            cors_config,
            payment_config,
        }
    }
}

/// Builds the production state: PostgreSQL store, Stripe gateway and
/// configuration read from the environment.
pub fn init_app_state(pool: PgPool) -> AppState {
    let payment_config = PaymentConfig::from_env();

    AppState::new(
        Arc::new(PgStore::new(pool)),
        Arc::new(StripeGateway::new(&payment_config)),
        JwtConfig::from_env(),
        CorsConfig::from_env(),
        payment_config,
    )
}
