//!
//! Aquameter service entry point.
//! Reads configuration from TOML file (~/.config/aquameter/config.toml).

use std::sync::Arc;
use std::time::Instant;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use aquameter::application::water::{
    ImageOps, LastReadingUpdater, MeterLockRegistry, ReadingCreator, ReadingDeleter,
    ReadingUpdater, WaterMeterOwnerChanger, WaterMeterReplacer,
};
use aquameter::domain::{CommunityLookup, FileStorage, RepositoryProvider};
use aquameter::infrastructure::database::migrator::Migrator;
use aquameter::infrastructure::LocalFileStorage;
use aquameter::shared::ShutdownCoordinator;
use aquameter::{
    create_api_router, default_config_path, init_database, AppConfig, AppState, DatabaseConfig,
    SeaOrmCommunityLookup, SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("AQUAMETER_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Aquameter water-utility service...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

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

    // ── Repositories and collaborators ─────────────────────────
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let lookup: Arc<dyn CommunityLookup> = Arc::new(SeaOrmCommunityLookup::new(db.clone()));
    let storage: Arc<dyn FileStorage> = Arc::new(LocalFileStorage::new(
        app_cfg.storage.root.clone(),
        app_cfg.storage.base_url.clone(),
        app_cfg.storage.allowed_mime_types.clone(),
        app_cfg.storage.max_file_size_bytes,
    ));

    // ── Use-case services ──────────────────────────────────────
    let locks = Arc::new(MeterLockRegistry::new());
    let images = ImageOps::new(repos.clone(), storage.clone());
    let last_reading = Arc::new(LastReadingUpdater::new(repos.clone(), lookup));
    let creator = Arc::new(ReadingCreator::new(
        repos.clone(),
        last_reading.clone(),
        images.clone(),
        locks.clone(),
    ));
    let updater = Arc::new(ReadingUpdater::new(
        repos.clone(),
        last_reading.clone(),
        images.clone(),
        locks.clone(),
    ));
    let deleter = Arc::new(ReadingDeleter::new(
        repos.clone(),
        last_reading.clone(),
        images.clone(),
        locks.clone(),
    ));
    let replacer = Arc::new(WaterMeterReplacer::new(
        repos.clone(),
        creator.clone(),
        images.clone(),
    ));
    let owner_changer = Arc::new(WaterMeterOwnerChanger::new(repos.clone()));

    // ── Shutdown coordination ──────────────────────────────────
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();
    shutdown.start_signal_listener();

    // ── REST API server ────────────────────────────────────────
    let state = AppState {
        db: db.clone(),
        repos,
        creator,
        updater,
        deleter,
        replacer,
        owner_changer,
        images,
        started_at: Arc::new(Instant::now()),
    };
    let router = create_api_router(state);

    let addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs", addr);

    let serve_shutdown = shutdown_signal.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            serve_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        })
        .await?;

    // ── Final cleanup ──────────────────────────────────────────
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("👋 Aquameter shutdown complete");
    Ok(())
}
