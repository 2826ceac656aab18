//! Request extractors and layers shared across routes.

pub mod auth;

pub use auth::AuthUser;

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Any origin; the methods and headers the API uses.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
