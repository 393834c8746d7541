use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::classes::controller::{
    create_class, delete_my_class, get_all_classes, get_class, get_classes,
    get_instructor_classes, get_my_class, get_my_classes, get_popular_classes, moderate_class,
    update_my_class,
};
use crate::state::AppState;

pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/classes", get(get_classes))
        .route("/classes/{id}", get(get_class))
        .route("/popular-classes", get(get_popular_classes))
        .route("/instructor-classes/{email}", get(get_instructor_classes))
}

/// Routes mounted behind `require_instructor`.
pub fn init_instructor_classes_router() -> Router<AppState> {
    Router::new()
        .route("/classes", post(create_class))
        .route("/myclasses", get(get_my_classes))
        .route(
            "/myclasses/{id}",
            get(get_my_class)
                .patch(update_my_class)
                .delete(delete_my_class),
        )
}

/// Routes mounted behind `require_admin`.
pub fn init_moderation_router() -> Router<AppState> {
    Router::new()
        .route("/allclasses", get(get_all_classes))
        .route("/allclasses/{id}", post(moderate_class))
}
