use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tokio::task;
use tracing::warn;

use crate::shared::AppError;

/// Hashes a password into a PHC string with a random 16-byte salt
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt_bytes: [u8; 16] = rand::random();
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| {
        warn!(error = %e, "Failed to encode password salt");
        AppError::Internal
    })?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            warn!(error = %e, "Failed to hash password");
            AppError::Internal
        })
}

/// Checks a password against a stored PHC string. Unparseable hashes never match.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!(error = %e, "Stored password hash is not a valid PHC string");
            false
        }
    }
}

/// Runs `hash_password` on the blocking pool so argon2 does not stall a runtime worker
pub async fn hash_password_off_runtime(password: String) -> Result<String, AppError> {
    task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            warn!(error = %e, "Password hashing task failed");
            AppError::Internal
        })?
}

/// Runs `verify_password` on the blocking pool
pub async fn verify_password_off_runtime(
    password: String,
    password_hash: String,
) -> Result<bool, AppError> {
    task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| {
            warn!(error = %e, "Password verification task failed");
            AppError::Internal
        })
}
