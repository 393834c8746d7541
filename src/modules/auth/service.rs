use classhub_auth::create_token_with_claims;
use classhub_config::JwtConfig;
use classhub_core::AppError;
use serde_json::{Map, Value};
use tracing::{info, instrument};

pub struct AuthService;

impl AuthService {
    /// Issues a session token for `email`, signing `extra` along with it.
    ///
    /// The email is not looked up: tokens only carry identity, and every
    /// privileged route re-checks the stored role itself.
    #[instrument(skip(extra, jwt_config), fields(extra_claims = extra.len()))]
    pub fn issue_token(
        email: &str,
        extra: Map<String, Value>,
        jwt_config: &JwtConfig,
    ) -> Result<String, AppError> {
        let token = create_token_with_claims(email, extra, jwt_config)?;
        info!("Session token issued");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classhub_auth::verify_token;

    #[test]
    fn test_issued_token_carries_email() {
        let config = JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            token_expiry: 3_600,
        };
        let token = AuthService::issue_token("student@example.com", Map::new(), &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.email, "student@example.com");
    }
}
