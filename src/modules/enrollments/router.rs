use axum::{Router, routing::get};

use crate::modules::enrollments::controller::{get_enrollment, get_enrollments};
use crate::state::AppState;

/// Routes mounted behind `require_auth`.
pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/enrolled", get(get_enrollments))
        .route("/enrolled/{id}", get(get_enrollment))
}
