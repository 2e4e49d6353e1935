//! Power Supply Service
//!
//! Reads configuration from a TOML file
//! (~/.config/power-supply-service/config.toml, or `PSU_CONFIG`).

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use power_supply::config::{AppConfig, LoggingConfig, CONFIG_ENV};
use power_supply::infrastructure::database::migrator::Migrator;
use power_supply::shared::shutdown::ShutdownCoordinator;
use power_supply::{create_api_router, default_config_path, init_database, ApiContext, DatabaseConfig};

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var(CONFIG_ENV)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg.logging);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            cfg.apply_env_overrides();
            init_tracing(&cfg.logging);
            error!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    info!("Starting Power Supply Service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = match metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
    {
        Ok(handle) => {
            info!("📊 Prometheus metrics recorder installed");
            Some(handle)
        }
        Err(e) => {
            warn!("Prometheus recorder unavailable, metrics disabled: {}", e);
            None
        }
    };

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig::from(&app_cfg.database);
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Services & router ──────────────────────────────────────
    let ctx = ApiContext::new(db.clone(), &app_cfg, prometheus_handle);
    info!(
        "JWT configured with {}h token expiration",
        app_cfg.security.jwt_expiration_hours
    );
    let api_router = create_api_router(ctx);

    // Initialize shutdown coordinator
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();

    // Start listening for shutdown signals (SIGTERM, SIGINT)
    shutdown.start_signal_listener();

    // Start REST API server with graceful shutdown
    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
        api_shutdown.wait().await;
        info!("🛑 REST API server received shutdown signal");
    });

    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    match tokio::spawn(async move { api_server.await }).await {
        Ok(Ok(())) => info!("REST API server stopped"),
        Ok(Err(e)) => error!("REST API server error: {}", e),
        Err(e) => error!("REST API server task panicked: {}", e),
    }

    // ── Final cleanup, bounded by the shutdown timeout ─────────
    shutdown_signal.trigger();
    let db_for_cleanup = db;
    shutdown
        .shutdown_with_cleanup(|| async move {
            info!("🧹 Performing final cleanup...");
            if let Err(e) = db_for_cleanup.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("✅ Database connection closed");
            }
        })
        .await;

    info!("👋 Power Supply Service shutdown complete");
    Ok(())
}
