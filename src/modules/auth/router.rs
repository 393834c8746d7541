use axum::{Router, routing::post};

use crate::modules::auth::controller::issue_token;
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new().route("/jwt", post(issue_token))
}
