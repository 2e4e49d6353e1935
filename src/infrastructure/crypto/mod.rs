//! Credential hashing and token issuing

pub mod jwt;
pub mod password;

pub use jwt::{JwtConfig, JwtError, JwtManager, TokenClaims, TokenIdentity};
pub use password::{verify_password, PasswordHasher};
