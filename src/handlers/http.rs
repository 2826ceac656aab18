//! Shared HTTP plumbing: application state, JSON extractor, health.

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::auth::JwtSecret;
use crate::db::{FilmRepository, UserRepository};
use crate::error::AppError;
use crate::mail::Mailer;

/// Shared application state, built once by the composition root.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub films: Arc<dyn FilmRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub jwt_secret: JwtSecret,
    /// Base of links sent by email, without trailing slash.
    pub public_base_url: String,
}

impl AppState {
    pub fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }
    pub fn films(&self) -> &dyn FilmRepository {
        self.films.as_ref()
    }
    pub fn mailer(&self) -> &dyn Mailer {
        self.mailer.as_ref()
    }
    pub fn jwt_secret(&self) -> &JwtSecret {
        &self.jwt_secret
    }
}

/// `Json` whose rejection is an `AppError`, so malformed bodies answer 400 in the API's error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Path` whose rejection is an `AppError`, so an unparsable id answers 400 in the API's error shape.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "ticketoff" })),
    )
}
