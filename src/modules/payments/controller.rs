use axum::{Json, extract::State};
use tracing::instrument;

use classhub_core::AppError;
use classhub_models::{
    InsertResult, PaymentIntentRequest, PaymentIntentResponse, PaymentRecord, PurchaseDto,
};

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::modules::payments::service::PaymentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a card payment intent
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret for confirming the payment", body = PaymentIntentResponse),
        (status = 400, description = "Invalid price", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 502, description = "Payment provider failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
#[instrument(skip_all, fields(user.email = %auth_user.email()))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, AppError> {
    let client_secret = PaymentService::create_intent(
        state.payments.as_ref(),
        dto.price,
        &state.payment_config.currency,
    )
    .await?;
    Ok(Json(PaymentIntentResponse { client_secret }))
}

/// Complete a purchase
///
/// Takes a seat, clears the cart entry and records the enrollment and the
/// payment, all or nothing.
#[utoipa::path(
    post,
    path = "/payments",
    request_body = PurchaseDto,
    responses(
        (status = 200, description = "Payment insert acknowledgment", body = InsertResult),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Body email differs from the caller", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse),
        (status = 409, description = "No seats left, or already enrolled", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
#[instrument(skip_all, fields(user.email = %auth_user.email()))]
pub async fn create_payment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<PurchaseDto>,
) -> Result<Json<InsertResult>, AppError> {
    if let Some(email) = dto.email.as_deref() {
        auth_user.ensure_self(email)?;
    }

    let result = PaymentService::purchase(state.store.as_ref(), auth_user.email(), dto).await?;
    Ok(Json(result))
}

/// List the caller's payments, newest first
#[utoipa::path(
    get,
    path = "/payments",
    responses(
        (status = 200, description = "Payment history", body = Vec<PaymentRecord>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
#[instrument(skip_all, fields(user.email = %auth_user.email()))]
pub async fn get_payments(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<PaymentRecord>>, AppError> {
    let payments = PaymentService::history(state.store.as_ref(), auth_user.email()).await?;
    Ok(Json(payments))
}
