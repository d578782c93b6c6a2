use bcrypt::{hash, verify};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("password worker failed: {0}")]
    Worker(String),
}

/// Hash a password with bcrypt. Runs on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| PasswordError::Worker(e.to_string()))?
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check a password against a stored bcrypt hash.
///
/// A stored hash bcrypt cannot parse counts as a mismatch.
pub async fn verify_password(password: String, password_hash: String) -> Result<bool, PasswordError> {
    let outcome = tokio::task::spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(|e| PasswordError::Worker(e.to_string()))?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!("Stored password hash could not be checked: {}", e);
            Ok(false)
        }
    }
}
