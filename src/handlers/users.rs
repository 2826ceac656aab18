//! User CRUD handlers: signup, read, update, delete, list, and the caller's own profile.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::auth::AuthAppService;
use crate::error::AppError;
use crate::handlers::http::{AppJson, AppPath, AppState};
use crate::mail::confirmation_email;
use crate::middleware::AuthUser;
use crate::models::{Credentials, NewUser, User};
use crate::validation::check_credentials;

/// POST /users — signup.
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(body): AppJson<Credentials>,
) -> Result<(StatusCode, Json<User>), AppError> {
    check_credentials(&body.email, &body.password)?;

    let password_hash = AuthAppService::hash_password(&body.password)?;
    let user = state
        .users()
        .create(NewUser {
            email: body.email,
            password_hash,
        })
        .await?;
    info!(user_id = user.id, "user created");

    send_confirmation(&state, &user.email).await;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Mail failures are logged; the account already exists.
async fn send_confirmation(state: &AppState, email: &str) {
    let token = match state.jwt_secret().issue_confirmation(email) {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "could not issue confirmation token");
            return;
        }
    };
    let message = confirmation_email(email, &state.public_base_url, &token);
    if let Err(e) = state.mailer().send(message).await {
        warn!(error = %e, "could not send confirmation email");
    }
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.users().list().await?))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users().get_by_id(id).await?))
}

/// PUT /users/:id — replaces email and password. The password is always re-hashed.
pub async fn update_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    body: Result<AppJson<Credentials>, AppError>,
) -> Result<Json<User>, AppError> {
    let existing = state.users().get_by_id(id).await?;
    let AppJson(body) = body?;
    check_credentials(&body.email, &body.password)?;

    let password_hash = AuthAppService::hash_password(&body.password)?;
    let email_confirmed = existing.email_confirmed && existing.email == body.email;
    let user = state
        .users()
        .update(&User {
            id: existing.id,
            email: body.email,
            password_hash,
            email_confirmed,
        })
        .await?;
    info!(user_id = user.id, "user updated");

    Ok(Json(user))
}

/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    state.users().delete(id).await?;
    info!(user_id = id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /me — the user behind the bearer token.
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users().get_by_id(user_id).await?))
}
