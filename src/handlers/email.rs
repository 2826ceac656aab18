//! Email confirmation link target.

use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::AppError;
use crate::handlers::http::AppState;

#[derive(Debug, Deserialize)]
pub struct ConfirmParams {
    #[serde(default)]
    pub token: String,
}

/// GET /confirm-email?token=
pub async fn confirm_email(
    State(state): State<AppState>,
    Query(params): Query<ConfirmParams>,
) -> Result<&'static str, AppError> {
    let email = state
        .jwt_secret()
        .validate_confirmation(&params.token)
        .map_err(|e| {
            debug!(error = %e, "rejected confirmation token");
            AppError::Validation("Invalid or expired token".to_string())
        })?;
    state.users().confirm_email(&email).await?;
    info!(email = %email, "email confirmed");
    Ok("Email confirmed successfully!")
}
