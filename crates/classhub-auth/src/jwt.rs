//! Token creation and verification.
//!
//! Tokens are signed with the shared secret from [`JwtConfig`] and expire
//! `token_expiry` seconds after they are issued. Verification rejects
//! tampered, malformed and expired tokens alike with a 401 [`AppError`].

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::{Map, Value};

use classhub_config::JwtConfig;
use classhub_core::AppError;

use crate::claims::{Claims, RESERVED_CLAIMS};

/// Creates a session token for `email`, valid from now.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_token(email: &str, jwt_config: &JwtConfig) -> Result<String, AppError> {
    create_token_at(email, Utc::now().timestamp(), jwt_config)
}

/// Creates a session token that also carries `extra` claims. Values for
/// `email`, `exp` and `iat` in `extra` are ignored.
pub fn create_token_with_claims(
    email: &str,
    extra: Map<String, Value>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    encode_claims(email, extra, Utc::now().timestamp(), jwt_config)
}

/// Creates a session token as if it had been issued at `issued_at`
/// (Unix seconds).
pub fn create_token_at(
    email: &str,
    issued_at: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    encode_claims(email, Map::new(), issued_at, jwt_config)
}

fn encode_claims(
    email: &str,
    mut extra: Map<String, Value>,
    issued_at: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let iat = issued_at.max(0);
    let exp = (iat + jwt_config.token_expiry).max(0);

    for name in RESERVED_CLAIMS {
        extra.remove(name);
    }

    let claims = Claims {
        email: email.to_string(),
        exp: exp as usize,
        iat: iat as usize,
        extra,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies a session token and returns its claims.
///
/// # Errors
///
/// Returns an unauthorized error if the signature is invalid, the token is
/// malformed, or the expiry has elapsed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}
