//! Bearer-token extractor for authenticated routes.

use axum::http::header::AUTHORIZATION;
use tracing::debug;

use crate::error::AppError;
use crate::handlers::http::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extractor: authenticated user ID from a session JWT (Bearer token).
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub i64);

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix(BEARER_PREFIX));
        let token = auth.ok_or_else(|| {
            AppError::Auth("Missing or invalid Authorization header".to_string())
        })?;
        let user_id = state.jwt_secret().validate(token).map_err(|e| {
            debug!(error = %e, "rejected bearer token");
            AppError::Auth("Invalid token".to_string())
        })?;
        Ok(AuthUser(user_id))
    }
}
