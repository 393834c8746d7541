use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::carts::controller::{add_to_cart, get_cart, remove_from_cart};
use crate::state::AppState;

/// Routes mounted behind `require_auth`.
///
/// `GET` takes an email and `DELETE` an item id in the same segment, so
/// both share one route.
pub fn init_carts_router() -> Router<AppState> {
    Router::new()
        .route("/carts", post(add_to_cart))
        .route("/carts/{key}", get(get_cart).delete(remove_from_cart))
}
