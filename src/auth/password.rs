use crate::error::AppError;
use bcrypt::{hash, verify};

/// Hashes a plaintext password with bcrypt.
///
/// bcrypt generates a fresh random salt per call, so hashing the same
/// plaintext twice yields different digests. The plaintext is never stored or
/// logged.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, 12) // bcrypt default cost is 12
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verifies a plaintext password against a stored bcrypt digest.
///
/// A mismatch is not an error path: it is `Ok(false)`. Errors only occur for
/// malformed digests.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}
