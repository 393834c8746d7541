use axum::{Router, routing::post};

use crate::modules::payments::controller::{create_payment, create_payment_intent, get_payments};
use crate::state::AppState;

/// Routes mounted behind `require_auth`.
pub fn init_payments_router() -> Router<AppState> {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/payments", post(create_payment).get(get_payments))
}
