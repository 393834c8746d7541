//! Role-based authorization middleware.
//!
//! The token only proves who the caller is. Their role is looked up from
//! the store on every request, so a role change takes effect immediately
//! without reissuing tokens.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use classhub_core::AppError;
use classhub_db::UserStore;
use classhub_models::UserRole;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub const FORBIDDEN_MESSAGE: &str = "forbidden access";

/// Authenticates the request (401 on failure), then requires the stored
/// user to hold `required` (403 otherwise).
pub async fn require_role(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    required: UserRole,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    let user = state.store.find_user_by_email(auth_user.email()).await?;
    if user.and_then(|u| u.role) != Some(required) {
        warn!(
            user.email = %auth_user.email(),
            required_role = %required,
            "Role check failed"
        );
        return Err(AppError::forbidden(FORBIDDEN_MESSAGE));
    }

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}

/// Admin-only routes.
///
/// ```rust,ignore
/// Router::new()
///     .route("/users", get(get_users))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(
    state: State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(state, req, next, UserRole::Admin).await
}

/// Instructor-only routes.
pub async fn require_instructor(
    state: State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(state, req, next, UserRole::Instructor).await
}
