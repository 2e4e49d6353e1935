//! # Power Supply Service
//!
//! REST backend for user accounts and a power-supply catalog.
//!
//! ## Architecture
//!
//! - **domain**: Entities, request types and repository traits
//! - **application**: Use-case services (identity, catalog)
//! - **infrastructure**: SeaORM persistence, query filters, JWT and bcrypt
//! - **interfaces**: Axum REST API with Swagger documentation
//! - **shared**: Error taxonomy, pagination and shutdown handling

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiContext};
