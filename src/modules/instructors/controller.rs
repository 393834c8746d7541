use axum::{Json, extract::State};
use tracing::instrument;
use uuid::Uuid;

use classhub_core::AppError;
use classhub_models::User;

use crate::docs::ErrorResponse;
use crate::extract::ValidPath;
use crate::modules::instructors::service::InstructorService;
use crate::state::AppState;

/// List instructors
#[utoipa::path(
    get,
    path = "/instructors",
    responses(
        (status = 200, description = "Users holding the instructor role", body = Vec<User>)
    ),
    tag = "Instructors"
)]
#[instrument(skip(state))]
pub async fn get_instructors(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let instructors = InstructorService::list(state.store.as_ref()).await?;
    Ok(Json(instructors))
}

/// Get an instructor by id
#[utoipa::path(
    get,
    path = "/instructors/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Instructor", body = User),
        (status = 404, description = "No instructor with this id", body = ErrorResponse)
    ),
    tag = "Instructors"
)]
#[instrument(skip(state))]
pub async fn get_instructor(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<User>, AppError> {
    let instructor = InstructorService::get(state.store.as_ref(), id).await?;
    Ok(Json(instructor))
}
