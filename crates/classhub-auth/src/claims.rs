use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Claim names set by the server; submitted values for them are dropped.
pub const RESERVED_CLAIMS: [&str; 3] = ["email", "exp", "iat"];

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// The user's email, the identity key of every user record
    pub email: String,
    /// Expiration timestamp (Unix seconds)
    pub exp: usize,
    /// Issued-at timestamp (Unix seconds)
    pub iat: usize,
    /// Other claims submitted when the token was requested
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Map<String, Value>,
}
