use axum::{Json, extract::State};
use tracing::instrument;
use uuid::Uuid;

use classhub_core::AppError;
use classhub_models::{
    CreateUserDto, DeleteResult, InsertResponse, RoleResponse, UpdateResult, UpdateRoleDto, User,
    UserFilterParams,
};

use crate::docs::ErrorResponse;
use crate::extract::{ValidPath, ValidQuery};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a user
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserDto,
    responses(
        (status = 200, description = "User registered, or `{\"exists\": true}` if the email is already known", body = InsertResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<Json<InsertResponse>, AppError> {
    let response = UserService::register(state.store.as_ref(), dto.into()).await?;
    Ok(Json(response))
}

/// Get the role of a user
#[utoipa::path(
    get,
    path = "/users/role/{email}",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "Role, or null when unset", body = RoleResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user_role(
    State(state): State<AppState>,
    ValidPath(email): ValidPath<String>,
) -> Result<Json<RoleResponse>, AppError> {
    let response = UserService::get_role(state.store.as_ref(), &email).await?;
    Ok(Json(response))
}

/// List users (admin only)
#[utoipa::path(
    get,
    path = "/users",
    params(UserFilterParams),
    responses(
        (status = 200, description = "Users", body = Vec<User>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    ValidQuery(filter): ValidQuery<UserFilterParams>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = UserService::list_users(state.store.as_ref(), filter.role).await?;
    Ok(Json(users))
}

/// Set or clear the role of a user (admin only)
#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Update acknowledgment", body = UpdateResult),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, dto))]
pub async fn update_user_role(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateRoleDto>,
) -> Result<Json<UpdateResult>, AppError> {
    let result = UserService::update_role(state.store.as_ref(), id, dto.role).await?;
    Ok(Json(result))
}

/// Delete a user (admin only)
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Delete acknowledgment", body = DeleteResult),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<DeleteResult>, AppError> {
    let result = UserService::delete_user(state.store.as_ref(), id).await?;
    Ok(Json(result))
}
