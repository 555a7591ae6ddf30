//! Password hashing.
//!
//! bcrypt is CPU-bound, so both hashing and verification run on the blocking
//! thread pool instead of stalling the async workers.
//!
//! A login for an unknown account still pays for one verification, against
//! a placeholder hash made once per hasher at the configured cost.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::backend::error::BackendError;

const PLACEHOLDER_PASSWORD: &str = "shuvomedia-placeholder-password";

#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    placeholder: Arc<OnceCell<String>>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            placeholder: Arc::new(OnceCell::new()),
        }
    }

    pub async fn hash(&self, password: &str) -> Result<String, BackendError> {
        let password = password.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| BackendError::internal(format!("hashing task failed: {}", e)))?
            .map_err(|e| BackendError::internal(format!("password hashing failed: {}", e)))
    }

    /// `Ok(false)` on a mismatch; `Err` only if the stored hash is unreadable.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, BackendError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| BackendError::internal(format!("verification task failed: {}", e)))?
            .map_err(|e| BackendError::internal(format!("password verification failed: {}", e)))
    }

    /// Verify `password` against the placeholder hash and report a mismatch.
    /// Takes as long as `verify` does for a real account.
    pub async fn verify_missing(&self, password: &str) -> Result<bool, BackendError> {
        let placeholder = self
            .placeholder
            .get_or_try_init(|| self.hash(PLACEHOLDER_PASSWORD))
            .await?;
        self.verify(password, placeholder).await?;
        Ok(false)
    }
}
