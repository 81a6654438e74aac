//! Password hashing and verification using bcrypt

use crate::utils::error::{ApiError, Result};
use tracing::warn;

/// Work factor for stored password hashes
pub const BCRYPT_COST: u32 = 12;

/// bcrypt hasher. Hashing runs on the blocking thread pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: BCRYPT_COST }
    }
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with a different work factor. Tests use the bcrypt minimum to stay fast.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh salt
    pub async fn hash(&self, password: &str) -> Result<String> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| ApiError::internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| ApiError::crypto(format!("Failed to hash password: {}", e)))
    }

    /// Verify a password against its hash. A mismatch is `Ok(false)`; a malformed hash is an error.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| ApiError::internal(format!("Verification task failed: {}", e)))?
            .map_err(|e| ApiError::crypto(format!("Password verification failed: {}", e)))
    }

    /// Verify, treating any hashing failure as a mismatch
    pub async fn matches(&self, password: &str, hash: &str) -> bool {
        match self.verify(password, hash).await {
            Ok(matched) => matched,
            Err(e) => {
                warn!("Treating password verification failure as mismatch: {}", e);
                false
            }
        }
    }

    /// Spend one hash worth of work so an unknown email costs as much as a wrong password
    pub async fn equalize_timing(&self, password: &str) {
        if let Err(e) = self.hash(password).await {
            warn!("Timing equalization hash failed: {}", e);
        }
    }
}
