use axum::{Json, extract::State};
use tracing::instrument;

use classhub_core::AppError;
use classhub_models::{TokenRequest, TokenResponse};

use crate::docs::ErrorResponse;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Issue a session token for an email address
#[utoipa::path(
    post,
    path = "/jwt",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 422, description = "Invalid email", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn issue_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = AuthService::issue_token(&dto.email, dto.extra, &state.jwt_config)?;
    Ok(Json(TokenResponse { token }))
}
