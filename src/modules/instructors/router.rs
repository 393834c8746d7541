use axum::{Router, routing::get};

use crate::modules::instructors::controller::{get_instructor, get_instructors};
use crate::state::AppState;

pub fn init_instructors_router() -> Router<AppState> {
    Router::new()
        .route("/instructors", get(get_instructors))
        .route("/instructors/{id}", get(get_instructor))
}
