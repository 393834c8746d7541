use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::debug;

use classhub_auth::{Claims, verify_token};
use classhub_core::AppError;

use crate::state::AppState;

pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized access";

/// The verified identity behind a request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// Rejects with 403 unless `email` is the caller's own.
    pub fn ensure_self(&self, email: &str) -> Result<(), AppError> {
        if self.email() != email {
            return Err(AppError::forbidden("forbidden access"));
        }
        Ok(())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already verified by an earlier layer.
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    debug!(reason = %rejection, "Rejected authorization header");
                    AppError::unauthorized(UNAUTHORIZED_MESSAGE)
                })?;

        let claims = verify_token(bearer.token(), &state.jwt_config).map_err(|e| {
            debug!(reason = %e.error, "Rejected token");
            AppError::unauthorized(UNAUTHORIZED_MESSAGE)
        })?;

        Ok(AuthUser(claims))
    }
}

/// Requires a valid bearer token and makes [`AuthUser`] available to
/// handlers through request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}
