//! Identity: registration, login and user management

pub mod service;

pub use service::{AuthResult, UserService};
