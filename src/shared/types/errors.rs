//! Application error taxonomy
//!
//! Every failure crossing the repository → service → transport boundary is an
//! [`AppError`]: a closed [`ErrorKind`], a caller-safe message, an optional
//! lower-level cause kept for logs, and an optional structured payload.

use std::error::Error as StdError;
use std::fmt;

use sea_orm::{DbErr, SqlErr};
use serde_json::Value;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Closed set of error kinds with stable numeric codes.
///
/// `1xxx` codes are caller faults, `5xxx` codes are server faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Success,
    InvalidParam,
    Unauthorized,
    Forbidden,
    NotFound,
    AlreadyExists,
    InvalidToken,
    TokenExpired,
    InvalidRequest,
    InternalError,
    DatabaseError,
    CacheError,
    ServiceError,
}

impl ErrorKind {
    pub const fn code(self) -> u32 {
        match self {
            ErrorKind::Success => 0,
            ErrorKind::InvalidParam => 1001,
            ErrorKind::Unauthorized => 1002,
            ErrorKind::Forbidden => 1003,
            ErrorKind::NotFound => 1004,
            ErrorKind::AlreadyExists => 1005,
            ErrorKind::InvalidToken => 1006,
            ErrorKind::TokenExpired => 1007,
            ErrorKind::InvalidRequest => 1008,
            ErrorKind::InternalError => 5000,
            ErrorKind::DatabaseError => 5001,
            ErrorKind::CacheError => 5002,
            ErrorKind::ServiceError => 5003,
        }
    }

    pub const fn default_message(self) -> &'static str {
        match self {
            ErrorKind::Success => "success",
            ErrorKind::InvalidParam => "invalid parameter",
            ErrorKind::Unauthorized => "unauthorized, please log in",
            ErrorKind::Forbidden => "access forbidden",
            ErrorKind::NotFound => "resource not found",
            ErrorKind::AlreadyExists => "resource already exists",
            ErrorKind::InvalidToken => "invalid token",
            ErrorKind::TokenExpired => "token expired",
            ErrorKind::InvalidRequest => "malformed request",
            ErrorKind::InternalError => "internal server error",
            ErrorKind::DatabaseError => "database operation failed",
            ErrorKind::CacheError => "cache operation failed",
            ErrorKind::ServiceError => "service call failed",
        }
    }

    /// Whether the kind describes a caller fault (`1xxx`).
    pub const fn is_client_error(self) -> bool {
        let code = self.code();
        code >= 1000 && code < 2000
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_message())
    }
}

/// Uniform error value.
///
/// The `source` is never rendered to callers; only `kind`, `message` and
/// `data` cross the transport boundary.
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    source: Option<BoxError>,
    data: Option<Value>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Builds an error; an empty message falls back to the kind's default.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            kind.default_message().to_string()
        } else {
            message
        };
        Self {
            kind,
            message,
            source: None,
            data: None,
        }
    }

    pub fn with_source<E>(kind: ErrorKind, message: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::new(kind, message).caused_by(source)
    }

    /// Wraps an arbitrary error under `kind` using the kind's default message.
    pub fn wrap<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::with_source(kind, "", source)
    }

    pub fn caused_by<E>(mut self, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        self.source = Some(source.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    // ── Shorthand constructors ─────────────────────────────────

    pub fn invalid_param(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParam, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// `"<resource> not found"`
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorKind::NotFound, format!("{resource} not found"))
    }

    /// `"<resource> already exists"`
    pub fn already_exists(resource: &str) -> Self {
        Self::new(ErrorKind::AlreadyExists, format!("{resource} already exists"))
    }

    pub fn invalid_token() -> Self {
        Self::new(ErrorKind::InvalidToken, "")
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorKind::TokenExpired, "")
    }

    pub fn internal<E>(source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::wrap(ErrorKind::InternalError, source)
    }

    pub fn database<E>(source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::wrap(ErrorKind::DatabaseError, source)
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> u32 {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    pub fn is_not_found(&self) -> bool {
        self.is(ErrorKind::NotFound)
    }

    /// Recovers an `AppError` from an arbitrary error; anything else becomes
    /// an `InternalError` carrying the original as its cause.
    pub fn from_any(err: BoxError) -> Self {
        match err.downcast::<AppError>() {
            Ok(app) => *app,
            Err(other) => Self::internal(other),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code: {}, message: {}", self.kind.code(), self.message)?;
        if let Some(source) = &self.source {
            write!(f, ", error: {source}")?;
        }
        Ok(())
    }
}

impl StdError for AppError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        if let DbErr::RecordNotFound(_) = err {
            return AppError::not_found("record").caused_by(err);
        }
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::already_exists("record").caused_by(err)
            }
            _ => AppError::database(err),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
