use axum::{Json, extract::State};
use tracing::instrument;
use uuid::Uuid;

use classhub_core::AppError;
use classhub_models::{
    Class, ClassFilterParams, CreateClassDto, DeleteResult, InsertResult, ModerateClassDto,
    NewClass, PublicClassParams, UpdateClassDto, UpdateResult,
};

use crate::docs::ErrorResponse;
use crate::extract::{ValidPath, ValidQuery};
use crate::middleware::auth::AuthUser;
use crate::modules::classes::service::ClassService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List active classes
#[utoipa::path(
    get,
    path = "/classes",
    params(PublicClassParams),
    responses(
        (status = 200, description = "Active classes", body = Vec<Class>)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_classes(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<PublicClassParams>,
) -> Result<Json<Vec<Class>>, AppError> {
    let classes = ClassService::list_active(state.store.as_ref(), params.difficulty).await?;
    Ok(Json(classes))
}

/// Get a class by id
#[utoipa::path(
    get,
    path = "/classes/{id}",
    params(("id" = Uuid, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class", body = Class),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_class(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<Class>, AppError> {
    let class = ClassService::get_class(state.store.as_ref(), id).await?;
    Ok(Json(class))
}

/// List classes by enrollment count, most popular first
#[utoipa::path(
    get,
    path = "/popular-classes",
    responses(
        (status = 200, description = "Classes sorted by enrolled, descending", body = Vec<Class>)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_popular_classes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Class>>, AppError> {
    let classes = ClassService::popular(state.store.as_ref()).await?;
    Ok(Json(classes))
}

/// List the active classes of one instructor
#[utoipa::path(
    get,
    path = "/instructor-classes/{email}",
    params(("email" = String, Path, description = "Instructor email")),
    responses(
        (status = 200, description = "Active classes taught by the instructor", body = Vec<Class>)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_instructor_classes(
    State(state): State<AppState>,
    ValidPath(email): ValidPath<String>,
) -> Result<Json<Vec<Class>>, AppError> {
    let classes = ClassService::list_by_instructor(state.store.as_ref(), &email).await?;
    Ok(Json(classes))
}

/// Submit a new class for review (instructor only)
#[utoipa::path(
    post,
    path = "/classes",
    request_body = CreateClassDto,
    responses(
        (status = 200, description = "Class created in pending status", body = InsertResult),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an instructor", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Instructor"
)]
#[instrument(skip_all, fields(user.email = %auth_user.email()))]
pub async fn create_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<Json<InsertResult>, AppError> {
    let class = NewClass::from_dto(dto, auth_user.email());
    let result = ClassService::create(state.store.as_ref(), class).await?;
    Ok(Json(result))
}

/// List the caller's own classes (instructor only)
#[utoipa::path(
    get,
    path = "/myclasses",
    responses(
        (status = 200, description = "Classes owned by the caller, any status", body = Vec<Class>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an instructor", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Instructor"
)]
#[instrument(skip_all, fields(user.email = %auth_user.email()))]
pub async fn get_my_classes(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Class>>, AppError> {
    let classes = ClassService::list_owned(state.store.as_ref(), auth_user.email()).await?;
    Ok(Json(classes))
}

/// Get one of the caller's classes (instructor only)
#[utoipa::path(
    get,
    path = "/myclasses/{id}",
    params(("id" = Uuid, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class", body = Class),
        (status = 403, description = "Not an instructor, or not the owner", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Instructor"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_my_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<Class>, AppError> {
    let class = ClassService::get_owned(state.store.as_ref(), id, auth_user.email()).await?;
    Ok(Json(class))
}

/// Update one of the caller's classes (instructor only)
#[utoipa::path(
    patch,
    path = "/myclasses/{id}",
    params(("id" = Uuid, Path, description = "Class id")),
    request_body = UpdateClassDto,
    responses(
        (status = 200, description = "Update acknowledgment", body = UpdateResult),
        (status = 403, description = "Not an instructor, or not the owner", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Instructor"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_my_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateClassDto>,
) -> Result<Json<UpdateResult>, AppError> {
    let result =
        ClassService::update_owned(state.store.as_ref(), id, auth_user.email(), &dto).await?;
    Ok(Json(result))
}

/// Delete one of the caller's classes (instructor only)
#[utoipa::path(
    delete,
    path = "/myclasses/{id}",
    params(("id" = Uuid, Path, description = "Class id")),
    responses(
        (status = 200, description = "Delete acknowledgment", body = DeleteResult),
        (status = 403, description = "Not an instructor, or not the owner", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Instructor"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_my_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<DeleteResult>, AppError> {
    let result = ClassService::delete_owned(state.store.as_ref(), id, auth_user.email()).await?;
    Ok(Json(result))
}

/// List all classes (admin only)
#[utoipa::path(
    get,
    path = "/allclasses",
    params(ClassFilterParams),
    responses(
        (status = 200, description = "Classes", body = Vec<Class>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_all_classes(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<ClassFilterParams>,
) -> Result<Json<Vec<Class>>, AppError> {
    let classes = ClassService::list_all(state.store.as_ref(), params.status).await?;
    Ok(Json(classes))
}

/// Approve or deny a class (admin only)
///
/// An unknown id creates a placeholder class holding only the moderation
/// fields; its id is reported as `upsertedId`.
#[utoipa::path(
    post,
    path = "/allclasses/{id}",
    params(("id" = Uuid, Path, description = "Class id")),
    request_body = ModerateClassDto,
    responses(
        (status = 200, description = "Update acknowledgment", body = UpdateResult),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, dto))]
pub async fn moderate_class(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<ModerateClassDto>,
) -> Result<Json<UpdateResult>, AppError> {
    let result =
        ClassService::moderate(state.store.as_ref(), id, dto.status, dto.feedback).await?;
    Ok(Json(result))
}
