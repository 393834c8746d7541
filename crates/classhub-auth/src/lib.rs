//! # Classhub Auth
//!
//! Session tokens for the Classhub API.
//!
//! Tokens are HS256 JWTs carrying the user's email, any other claims the
//! client submitted, and a 24 hour expiry (configurable through
//! [`classhub_config::JwtConfig`]). They are stateless: nothing is
//! persisted when a token is issued. Roles are never read from a token,
//! so role changes take effect on the next request.
//!
//! # Example
//!
//! ```ignore
//! use classhub_auth::{create_token, verify_token};
//! use classhub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_token("student@example.com", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.email, "student@example.com");
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, RESERVED_CLAIMS};
pub use jwt::{create_token, create_token_at, create_token_with_claims, verify_token};
