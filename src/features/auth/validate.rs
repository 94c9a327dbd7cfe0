//! Client-side form checks run before any request is sent.

use crate::api::ApiError;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Basic email format check.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

pub(super) fn require(value: &str, message: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::InvalidInput(message.to_string()))
    } else {
        Ok(())
    }
}

pub(super) fn require_email(email: &str) -> Result<(), ApiError> {
    if valid_email(email.trim()) {
        Ok(())
    } else {
        Err(ApiError::InvalidInput(
            "Please enter a valid email address.".to_string(),
        ))
    }
}

pub(super) fn require_password(password: &SecretString) -> Result<(), ApiError> {
    if password.expose_secret().chars().count() >= MIN_PASSWORD_LENGTH {
        Ok(())
    } else {
        Err(ApiError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters."
        )))
    }
}
