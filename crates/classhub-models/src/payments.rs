use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub class_id: Uuid,
    pub cart_id: Option<Uuid>,
    pub price: f64,
    pub transaction_id: Option<String>,
    pub date: chrono::DateTime<chrono::Utc>,
    /// Snapshot of the purchase request
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
}

/// Body of `POST /payments`.
///
/// `seats` and `enrolled` are what the client last saw; they are kept in
/// the snapshot but the stored counters are what gets updated. Without a
/// `price` the payment is recorded at the stored class price.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDto {
    pub class_id: Uuid,
    pub cart_id: Option<Uuid>,
    pub email: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    pub transaction_id: Option<String>,
    pub class_name: Option<String>,
    pub instructor_name: Option<String>,
    pub image: Option<String>,
    pub seats: Option<i32>,
    pub enrolled: Option<i32>,
}

/// Everything the store needs to execute a purchase as one unit of work.
#[derive(Debug, Clone)]
pub struct Purchase {
    pub email: String,
    pub class_id: Uuid,
    pub cart_id: Option<Uuid>,
    /// Falls back to the class price when `None`
    pub price: Option<f64>,
    pub transaction_id: Option<String>,
    pub details: serde_json::Value,
}

/// Ids of the records a successful purchase created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub payment_id: Uuid,
    pub enrollment_id: Uuid,
}

/// Body of `POST /create-payment-intent`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PaymentIntentRequest {
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}
