//! Ticketing platform backend: user accounts, authentication, and film listings.
//!
//! Users sign up with an email and password, log in for a 72-hour JWT, and
//! browse a read-only film catalog. Storage sits behind repository traits with
//! Postgres and in-memory implementations.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod mail;
pub mod middleware;
pub mod models;
pub mod validation;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;

use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Build the API router (users, login, email confirmation, films, health) with CORS and
/// request tracing. Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route(
            "/users",
            post(handlers::create_user).get(handlers::list_users),
        )
        .route(
            "/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route("/login", post(auth::login))
        .route("/me", get(handlers::me))
        .route("/confirm-email", get(handlers::confirm_email))
        .route("/films", get(handlers::list_films))
        .route("/films/:id", get(handlers::get_film))
        .route("/health", get(handlers::health))
        .layer(middleware::cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
