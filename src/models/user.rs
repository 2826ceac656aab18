//! User account and the credential payloads that create or replace it.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Persisted user. The password hash never leaves the process in a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email_confirmed: bool,
}

/// User about to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

/// `{email, password}` body for signup, update, and login. Missing fields decode as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
