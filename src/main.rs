//! Tourdesk Backend Service
//!
//! Main entry point for the travel-agency backend.
//! This service provides:
//! - Public storefront API (catalog reads, lead and review capture)
//! - Authenticated back-office API (CRUD, approvals, users, dashboard)

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tourdesk_backend::config::StorageBackend;
use tourdesk_backend::database::{
    create_pool, run_migrations, DocumentStore, MemoryDocumentStore, PgDocumentStore,
};
use tourdesk_backend::{api, AppConfig, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!(e)
    })?;

    init_tracing(&config);

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║           Tourdesk Backend Service Starting              ║");
    info!("╚══════════════════════════════════════════════════════════╝");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);
    info!("HTTP port: {}", config.http_port);

    // =========================================================================
    // STORAGE SETUP
    // =========================================================================
    let store: Arc<dyn DocumentStore> = match config.storage {
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(&config.database)
                .await
                .context("Failed to create database pool")?;

            info!("Database connection pool created successfully");
            info!("Max connections: {}", config.database.max_connections);

            info!("Running database migrations...");
            run_migrations(&pool, None)
                .await
                .context("Database migration failed")?;
            info!("Database migrations completed successfully");

            Arc::new(PgDocumentStore::new(pool))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on shutdown");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    // =========================================================================
    // CORE SERVICES INITIALIZATION
    // =========================================================================
    info!("Initializing core services...");

    let state = Arc::new(AppState::new(config.clone(), store).context("Failed to initialize services")?);
    info!("✓ Application state initialized");
    info!("✓ Audit trail writing to {:?}", state.audit.log_file());

    match (
        &config.auth.bootstrap_admin_email,
        &config.auth.bootstrap_admin_password,
    ) {
        (Some(email), Some(password)) => {
            state
                .users
                .bootstrap_super_admin(email, password)
                .await
                .context("Failed to bootstrap super admin")?;
        }
        (Some(_), None) | (None, Some(_)) => {
            warn!("BOOTSTRAP_ADMIN_EMAIL and BOOTSTRAP_ADMIN_PASSWORD must both be set; skipping bootstrap");
        }
        (None, None) => {}
    }

    // =========================================================================
    // START SERVER
    // =========================================================================
    let app = api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server on {}", addr))?;

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║           Tourdesk Backend Service Ready!                ║");
    info!("╠══════════════════════════════════════════════════════════╣");
    info!("║  HTTP API:     {}                                ║", addr);
    info!("║  Environment:  {}                                ║", config.environment);
    info!("╚══════════════════════════════════════════════════════════╝");
    info!("Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Tourdesk backend service shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "tourdesk_backend={},tower_http=info,sqlx=warn",
            config.log_level
        )
        .into()
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
