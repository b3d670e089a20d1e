//! Vendor Portal - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! # In-memory stores
//! cargo run --bin vendor-portal-api
//!
//! # PostgreSQL
//! API_STORAGE=postgres API_DATABASE_URL=postgres://... cargo run --bin vendor-portal-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret, at least 16 characters
//! * `API_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `API_LOG_FORMAT` - pretty or json (default: pretty)
//! * `API_STORAGE` - memory or postgres (default: memory)
//! * `API_MAX_BODY_BYTES` - request body ceiling (default: 10 MiB)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_warranty::{
    ClaimStorePort, InMemoryClaimStore, InMemoryServiceRequestStore, ServiceRequestPort,
};
use infra_db::adapters::{PostgresClaimStore, PostgresServiceRequestStore};
use infra_db::{create_pool, run_migrations, DatabaseConfig};
use interface_api::config::{ApiConfig, LogFormat, Storage};
use interface_api::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; only useful for local development
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("loading configuration")?;

    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage,
        "Starting Vendor Portal API Server"
    );

    let (claim_store, request_store) = open_stores(&config).await?;
    let app = create_router(AppState::new(claim_store, request_store, config.clone()));

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Installs the tracing subscriber; `RUST_LOG` overrides the configured level
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

async fn open_stores(
    config: &ApiConfig,
) -> anyhow::Result<(Arc<dyn ClaimStorePort>, Arc<dyn ServiceRequestPort>)> {
    match config.storage {
        Storage::Memory => {
            tracing::warn!("Using in-memory stores; data is lost on restart");
            Ok((
                Arc::new(InMemoryClaimStore::new()),
                Arc::new(InMemoryServiceRequestStore::new()),
            ))
        }
        Storage::Postgres => {
            let pool = create_pool(DatabaseConfig::new(&config.database_url))
                .await
                .context("connecting to database")?;
            run_migrations(&pool).await.context("preparing schema")?;
            Ok((
                Arc::new(PostgresClaimStore::new(pool.clone())),
                Arc::new(PostgresServiceRequestStore::new(pool)),
            ))
        }
    }
}

/// Waits for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
