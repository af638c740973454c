use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use company_services::config::{self, StorageBackend};
use company_services::database::{DatabaseManager, MemoryCompanyRepository, PgCompanyRepository, SharedRepository};
use company_services::{app, AppState};

#[derive(Debug, Parser)]
#[command(name = "company-services", version, about = "Company services HTTP API")]
struct Args {
    /// Port to listen on (overrides COMPANY_SERVICES_PORT / PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Storage backend (overrides STORAGE_BACKEND)
    #[arg(long, value_enum)]
    storage: Option<StorageBackend>,

    /// Create the tables on startup if they are missing
    #[arg(long)]
    init_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and friends
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = config::config().clone();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(storage) = args.storage {
        config.database.storage = storage;
    }
    if args.init_schema {
        config.database.init_schema = true;
    }
    tracing::info!("Starting Company Services in {:?} mode", config.environment);

    let calendar = config.calendar.business_calendar()?;

    let repository: SharedRepository = match config.database.storage {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage");
            Arc::new(MemoryCompanyRepository::new())
        }
        StorageBackend::Postgres => {
            let pool = match DatabaseManager::init(&config.database).await {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!("Failed to open database: {}", e);
                    std::process::exit(1);
                }
            };
            if config.database.init_schema {
                DatabaseManager::ensure_schema()
                    .await
                    .context("failed to create database schema")?;
            }
            Arc::new(PgCompanyRepository::new(pool))
        }
    };

    let state = AppState::new(repository, calendar);
    let router = app(state, &config);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Company Services listening on http://{}{}", bind_addr, config.server.base_path);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
    tracing::info!("Shutdown signal received");
}
