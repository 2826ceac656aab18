//! Domain models and request/response payloads.

pub mod film;
pub mod user;

pub use film::{Film, FilmListParams, FilmQuery, FilmSort};
pub use user::{Credentials, NewUser, TokenResponse, User};
