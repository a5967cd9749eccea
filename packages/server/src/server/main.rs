// Main entry point for API server

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tryon_core::domains::auth::JwtService;
use tryon_core::kernel::{
    start_scheduler, BaseCredentialStore, LocalPhotoStorage, PostgresCredentialStore, ServerDeps,
    SleepDelay,
};
use tryon_core::{server::build_app, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tryon_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Virtual Try-On API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database {}...", config.database_name);
    let connect_options = PgConnectOptions::from_str(&config.database_url)
        .context("DATABASE_URL is not a valid Postgres URL")?
        .database(&config.database_name);
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(connect_options)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload dir {}", config.upload_dir.display()))?;

    let jwt_service = JwtService::from_config(&config).context("Invalid JWT configuration")?;
    let store: Arc<dyn BaseCredentialStore> = Arc::new(PostgresCredentialStore::new(pool));

    let server_deps = Arc::new(ServerDeps::new(
        store.clone(),
        Arc::new(LocalPhotoStorage::new(config.upload_dir.clone())),
        Arc::new(SleepDelay(Duration::from_millis(config.avatar_delay_ms))),
        Arc::new(jwt_service),
        Arc::new(config.clone()),
    ));

    // Keep the scheduler alive for the lifetime of the server
    let _scheduler = start_scheduler(store)
        .await
        .context("Failed to start scheduled tasks")?;

    let app = build_app(server_deps);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
