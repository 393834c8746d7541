use axum::{Json, extract::State};
use tracing::instrument;
use uuid::Uuid;

use classhub_core::AppError;
use classhub_models::{AddToCartDto, CartItem, DeleteResult, InsertResponse, NewCartItem};

use crate::docs::ErrorResponse;
use crate::extract::ValidPath;
use crate::middleware::auth::AuthUser;
use crate::modules::carts::service::CartService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Add a class to the caller's cart
#[utoipa::path(
    post,
    path = "/carts",
    request_body = AddToCartDto,
    responses(
        (status = 200, description = "Cart item added, or `{\"exists\": true}` if already in the cart", body = InsertResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Body email differs from the caller", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Carts"
)]
#[instrument(skip_all, fields(user.email = %auth_user.email()))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<AddToCartDto>,
) -> Result<Json<InsertResponse>, AppError> {
    if let Some(email) = dto.email.as_deref() {
        auth_user.ensure_self(email)?;
    }

    let item = NewCartItem::from_dto(dto, auth_user.email());
    let response = CartService::add(state.store.as_ref(), item).await?;
    Ok(Json(response))
}

/// Remove an item from the caller's cart
#[utoipa::path(
    delete,
    path = "/carts/{id}",
    params(("id" = Uuid, Path, description = "Cart item id")),
    responses(
        (status = 200, description = "Delete acknowledgment", body = DeleteResult),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Carts"
)]
#[instrument(skip(state, auth_user))]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<DeleteResult>, AppError> {
    let result = CartService::remove(state.store.as_ref(), id, auth_user.email()).await?;
    Ok(Json(result))
}

/// List the caller's cart
#[utoipa::path(
    get,
    path = "/carts/{email}",
    params(("email" = String, Path, description = "Caller email")),
    responses(
        (status = 200, description = "Cart items", body = Vec<CartItem>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Email differs from the caller", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Carts"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidPath(email): ValidPath<String>,
) -> Result<Json<Vec<CartItem>>, AppError> {
    auth_user.ensure_self(&email)?;
    let items = CartService::list(state.store.as_ref(), &email).await?;
    Ok(Json(items))
}
