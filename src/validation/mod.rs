//! Input checks for signup and profile updates.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateLength;

use crate::error::{AppError, AppResult};

pub const MIN_PASSWORD_LEN: u64 = 8;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("email pattern compiles")
});

/// `local@domain.tld`, case-insensitive, checked on the string exactly as supplied.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// At least 8 characters; no complexity rules.
pub fn validate_password(password: &str) -> bool {
    password.validate_length(Some(MIN_PASSWORD_LEN), None, None)
}

/// Ordered credential checks shared by signup and update. Runs before any store call.
pub fn check_credentials(email: &str, password: &str) -> AppResult<()> {
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }
    if !is_valid_email(email) {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }
    if !validate_password(password) {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(is_valid_email("user_1%x@sub-domain.io"));
    }

    #[test]
    fn email_check_is_case_insensitive() {
        assert!(is_valid_email("Alice@Example.COM"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("invalid"));
        assert!(!is_valid_email("@nodomain.com"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@domain.c"));
        assert!(!is_valid_email("user@domain.c0m"));
        assert!(!is_valid_email(" a@b.com"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn password_length_boundary() {
        assert!(!validate_password("1234567"));
        assert!(validate_password("12345678"));
        assert!(validate_password("a much longer passphrase"));
    }

    #[test]
    fn password_length_counts_characters() {
        // 8 chars, 17 bytes
        assert!(validate_password("ééééééé€"));
        assert!(!validate_password("éééé"));
    }

    #[test]
    fn credential_checks_run_in_order() {
        let msg = |r: AppResult<()>| match r {
            Err(AppError::Validation(m)) => m,
            other => panic!("expected validation error, got {:?}", other),
        };
        assert_eq!(
            msg(check_credentials("", "password1")),
            "Email and password are required"
        );
        assert_eq!(
            msg(check_credentials("a@b.com", "")),
            "Email and password are required"
        );
        assert_eq!(msg(check_credentials("nope", "short")), "Invalid email format");
        assert_eq!(
            msg(check_credentials("a@b.com", "short")),
            "Password must be at least 8 characters"
        );
        assert!(check_credentials("a@b.com", "password1").is_ok());
    }
}
