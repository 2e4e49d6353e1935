pub mod entities;
pub mod migrator;
pub mod query;
pub mod repositories;

use std::time::Duration;

use log::LevelFilter;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseSettings;

/// Pool configuration resolved from [`DatabaseSettings`].
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from(&DatabaseSettings::default())
    }
}

impl From<&DatabaseSettings> for DatabaseConfig {
    fn from(s: &DatabaseSettings) -> Self {
        Self {
            url: s.url.clone(),
            max_connections: s.max_connections,
            min_connections: s.min_connections.min(s.max_connections),
            connect_timeout: Duration::from_secs(s.connect_timeout),
            idle_timeout: Duration::from_secs(s.idle_timeout),
            max_lifetime: Duration::from_secs(s.max_lifetime),
            sqlx_logging: s.sqlx_logging,
        }
    }
}

impl DatabaseConfig {
    /// Single-connection in-memory SQLite; every pooled connection would
    /// otherwise see its own empty database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            ..Self::default()
        }
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url.clone());
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(LevelFilter::Debug);
        opt
    }
}

/// Initialize the connection pool
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!(
        max_connections = config.max_connections,
        "Connecting to database: {}", config.url
    );
    let db = Database::connect(config.connect_options()).await?;
    info!("Database connected successfully");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_connections_never_exceed_max() {
        let settings = DatabaseSettings {
            max_connections: 4,
            min_connections: 10,
            ..DatabaseSettings::default()
        };
        let cfg = DatabaseConfig::from(&settings);
        assert_eq!(cfg.min_connections, 4);
        assert_eq!(cfg.idle_timeout, Duration::from_secs(600));
    }

    #[tokio::test]
    async fn in_memory_pool_connects() {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        db.ping().await.unwrap();
    }
}
