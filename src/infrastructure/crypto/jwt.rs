//! JWT credential issuer
//!
//! HS256 tokens carrying the user id (`sub`) and username. Expiry is
//! reported separately from every other validation failure so clients can
//! tell "log in again" from "this token was never valid".

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;
use crate::shared::AppError;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token lifetime in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl From<&SecurityConfig> for JwtConfig {
    fn from(cfg: &SecurityConfig) -> Self {
        Self {
            secret: cfg.jwt_secret.clone(),
            expiration_hours: cfg.jwt_expiration_hours,
            issuer: cfg.jwt_issuer.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub iss: String,
}

/// The identity a valid token vouches for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("invalid subject claim: {0}")]
    Subject(String),

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AppError::token_expired(),
            e @ (JwtError::Invalid(_) | JwtError::Subject(_)) => AppError::invalid_token().caused_by(e),
            e @ JwtError::Signing(_) => AppError::internal(e),
        }
    }
}

#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding,
            decoding,
        }
    }

    /// Token lifetime in seconds.
    pub fn expires_in(&self) -> i64 {
        self.config.expiration_hours * 3600
    }

    pub fn issue_token(&self, user_id: i64, username: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: (now + Duration::hours(self.config.expiration_hours)).timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(JwtError::Signing)
    }

    /// Checks signature, algorithm, issuer, expiry and not-before.
    pub fn parse_token(&self, token: &str) -> Result<TokenIdentity, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.validate_nbf = true;

        let data = decode::<TokenClaims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                JwtErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e),
            }
        })?;

        let user_id = data
            .claims
            .sub
            .parse()
            .map_err(|_| JwtError::Subject(data.claims.sub.clone()))?;

        Ok(TokenIdentity {
            user_id,
            username: data.claims.username,
        })
    }

    /// Reissues a still-valid token with the same identity and a fresh expiry.
    pub fn refresh_token(&self, token: &str) -> Result<String, JwtError> {
        let identity = self.parse_token(token)?;
        self.issue_token(identity.user_id, &identity.username)
    }
}
