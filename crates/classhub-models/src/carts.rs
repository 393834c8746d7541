use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A class a user has selected but not yet paid for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub class_id: Uuid,
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub instructor_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Body of `POST /carts`. When `email` is sent it must be the caller's.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartDto {
    pub class_id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    pub instructor_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub email: String,
    pub class_id: Uuid,
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub instructor_name: Option<String>,
}

impl NewCartItem {
    pub fn from_dto(dto: AddToCartDto, email: &str) -> Self {
        Self {
            email: email.to_string(),
            class_id: dto.class_id,
            name: dto.name,
            image: dto.image,
            price: dto.price,
            instructor_name: dto.instructor_name,
        }
    }
}
