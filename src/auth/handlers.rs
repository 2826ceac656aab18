//! Auth HTTP handlers: login.

use axum::{extract::State, Json};
use tracing::{debug, info};

use crate::auth::AuthAppService;
use crate::error::AppError;
use crate::handlers::http::{AppJson, AppState};
use crate::models::{Credentials, TokenResponse};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<Credentials>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = match state.users().get_by_email(&body.email).await {
        Ok(user) => user,
        Err(e) => {
            debug!(error = %e, "login lookup failed");
            AuthAppService::verify_dummy(&body.password);
            return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
        }
    };

    if !AuthAppService::verify_password(&body.password, &user.password_hash) {
        debug!(user_id = user.id, "login password mismatch");
        return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let token = state.jwt_secret().issue(user.id)?;
    info!(user_id = user.id, "user logged in");

    Ok(Json(TokenResponse { token }))
}
