use crate::error::{AppError, AppResult};
use bcrypt::{hash, verify};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash a password using bcrypt
pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    validate_password(password)?;
    hash(password, cost).map_err(|e| AppError::Message(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored hash. A malformed hash counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    verify(password, password_hash).unwrap_or(false)
}

pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}
