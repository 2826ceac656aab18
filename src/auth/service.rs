//! Password hashing and verification.

use crate::error::{AppError, AppResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;
use tracing::warn;

/// Hash checked when no account matches, so an unknown email costs the same Argon2 work
/// as a wrong password.
static DUMMY_HASH: Lazy<String> = Lazy::new(|| {
    AuthAppService::hash_password("ticketoff-no-such-account").unwrap_or_default()
});

pub struct AuthAppService;

impl AuthAppService {
    /// Salted Argon2 hash in PHC string form.
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("hash: {}", e)))?
            .to_string();
        Ok(hash)
    }

    /// False on mismatch and on a stored hash that does not parse.
    pub fn verify_password(password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "stored password hash is unparsable");
                return false;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Burns one verification against a throwaway hash. Always false.
    pub fn verify_dummy(password: &str) -> bool {
        Self::verify_password(password, &DUMMY_HASH);
        false
    }
}
