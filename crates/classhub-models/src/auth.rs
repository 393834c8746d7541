use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Identity submitted to `POST /jwt`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    /// Other fields are signed into the token as extra claims
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
