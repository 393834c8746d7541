use axum::{Json, extract::State};
use tracing::instrument;
use uuid::Uuid;

use classhub_core::AppError;
use classhub_models::Enrollment;

use crate::docs::ErrorResponse;
use crate::extract::ValidPath;
use crate::middleware::auth::AuthUser;
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;

/// Get the caller's enrollment in a class
#[utoipa::path(
    get,
    path = "/enrolled/{id}",
    params(("id" = Uuid, Path, description = "Class id")),
    responses(
        (status = 200, description = "Enrollment", body = Enrollment),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Caller is not enrolled in this class", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_enrollment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidPath(class_id): ValidPath<Uuid>,
) -> Result<Json<Enrollment>, AppError> {
    let enrollment =
        EnrollmentService::get(state.store.as_ref(), auth_user.email(), class_id).await?;
    Ok(Json(enrollment))
}

/// List the caller's enrollments
#[utoipa::path(
    get,
    path = "/enrolled",
    responses(
        (status = 200, description = "Enrollments", body = Vec<Enrollment>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip_all, fields(user.email = %auth_user.email()))]
pub async fn get_enrollments(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    let enrollments = EnrollmentService::list(state.store.as_ref(), auth_user.email()).await?;
    Ok(Json(enrollments))
}
