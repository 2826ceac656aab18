//! HTTP request handlers.

pub mod email;
pub mod films;
pub mod http;
pub mod users;

pub use email::confirm_email;
pub use films::{get_film, list_films};
pub use http::{health, AppJson, AppPath, AppState};
pub use users::{create_user, delete_user, get_user, list_users, me, update_user};
