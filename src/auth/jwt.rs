//! JWT issue and validation.

use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session tokens expire 72 hours after login.
pub const SESSION_TTL_HOURS: i64 = 72;
/// Email confirmation links stay valid for a day.
pub const CONFIRMATION_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    Session,
    EmailConfirm,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id, or email for confirmation tokens
    pub exp: i64,
    pub iat: i64,
    pub purpose: TokenPurpose,
}

#[derive(Clone)]
pub struct JwtSecret {
    secret: String,
    session_ttl: Duration,
}

impl JwtSecret {
    pub fn new(secret: String) -> Self {
        Self::with_ttl(secret, Duration::hours(SESSION_TTL_HOURS))
    }

    pub fn with_ttl(secret: String, session_ttl: Duration) -> Self {
        Self {
            secret,
            session_ttl,
        }
    }

    /// Session token for a user id.
    pub fn issue(&self, user_id: i64) -> AppResult<String> {
        self.sign(user_id.to_string(), TokenPurpose::Session, self.session_ttl)
    }

    /// Returns the user id carried by a valid, unexpired session token.
    pub fn validate(&self, token: &str) -> AppResult<i64> {
        let sub = self.verify(token, TokenPurpose::Session)?;
        sub.parse::<i64>()
            .map_err(|_| AppError::Jwt("invalid subject".to_string()))
    }

    /// Token embedded in the signup confirmation link.
    pub fn issue_confirmation(&self, email: &str) -> AppResult<String> {
        self.sign(
            email.to_string(),
            TokenPurpose::EmailConfirm,
            Duration::hours(CONFIRMATION_TTL_HOURS),
        )
    }

    /// Returns the email carried by a valid confirmation token.
    pub fn validate_confirmation(&self, token: &str) -> AppResult<String> {
        self.verify(token, TokenPurpose::EmailConfirm)
    }

    fn sign(&self, sub: String, purpose: TokenPurpose, ttl: Duration) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            purpose,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(signing_error)
    }

    fn verify(&self, token: &str, purpose: TokenPurpose) -> AppResult<String> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AppError::Jwt(e.to_string()))?;
        if data.claims.purpose != purpose {
            return Err(AppError::Jwt("token not valid for this use".to_string()));
        }
        Ok(data.claims.sub)
    }
}

/// Failing to sign is a server fault, unlike failing to verify.
fn signing_error(e: jsonwebtoken::errors::Error) -> AppError {
    AppError::Internal(anyhow::anyhow!("sign token: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};
    use jsonwebtoken::errors::ErrorKind;

    const SECRET: &str = "test-jwt-secret-min-32-chars!!!!";

    #[test]
    fn issued_token_validates_to_subject() {
        let jwt = JwtSecret::new(SECRET.to_string());
        let token = jwt.issue(42).unwrap();
        assert_eq!(jwt.validate(&token).unwrap(), 42);
    }

    #[test]
    fn session_expiry_is_72_hours() {
        let jwt = JwtSecret::new(SECRET.to_string());
        let token = jwt.issue(1).unwrap();
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 72 * 3600);
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = JwtSecret::with_ttl(SECRET.to_string(), Duration::seconds(-5));
        let token = jwt.issue(42).unwrap();
        assert!(matches!(jwt.validate(&token), Err(AppError::Jwt(_))));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = JwtSecret::new("another-secret-also-32-chars-long".to_string());
        let jwt = JwtSecret::new(SECRET.to_string());
        let token = issuer.issue(42).unwrap();
        assert!(jwt.validate(&token).is_err());
        assert!(jwt.validate("not.a.token").is_err());
    }

    #[test]
    fn purposes_do_not_cross() {
        let jwt = JwtSecret::new(SECRET.to_string());
        let confirm = jwt.issue_confirmation("a@b.com").unwrap();
        assert!(jwt.validate(&confirm).is_err());
        assert_eq!(jwt.validate_confirmation(&confirm).unwrap(), "a@b.com");

        let session = jwt.issue(3).unwrap();
        assert!(jwt.validate_confirmation(&session).is_err());
    }

    #[test]
    fn signing_failure_is_internal() {
        let err = signing_error(ErrorKind::InvalidKeyFormat.into());
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
