use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::modules::users::controller::{
    create_user, delete_user, get_user_role, get_users, update_user_role,
};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/role/{email}", get(get_user_role))
}

/// Routes mounted behind `require_admin`.
pub fn init_users_admin_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(get_users))
        .route("/users/{id}", patch(update_user_role).delete(delete_user))
}
