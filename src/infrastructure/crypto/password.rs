//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::shared::{AppError, AppResult};

/// bcrypt with a configurable cost factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    /// `cost` is clamped to the range bcrypt accepts (4..=31).
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }

    pub fn hash(&self, password: &str) -> AppResult<String> {
        hash(password, self.cost).map_err(AppError::internal)
    }
}

/// Constant-time comparison of `password` against a stored bcrypt hash.
/// A malformed hash counts as a mismatch.
pub fn verify_password(hash: &str, password: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}
