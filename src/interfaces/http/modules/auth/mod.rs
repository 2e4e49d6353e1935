//! Authentication module — register, login, token refresh, profile

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
