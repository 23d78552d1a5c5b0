//! Todo list API server.
//!
//! # Environment Variables
//!
//! - `APP_NAME`: Application name (default: `Redayit`)
//! - `NODE_ENV`: Environment tag (default: `dev`)
//! - `STORAGE_MODE`: `mongodb` (default) | `in_memory`
//! - `DB_HOST`: MongoDB host (default: `mongodb`)
//! - `DB_PORT`: MongoDB port (default: `27017`)
//! - `DB_USER`: MongoDB user (required when `STORAGE_MODE=mongodb`)
//! - `DB_PASSWORD`: MongoDB password (required when `STORAGE_MODE=mongodb`)
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `3000`)
//! - `CORS_ORIGIN`: Allowed origin (default: `http://localhost:3001`)
//! - `RUST_LOG`: Logging level (e.g., `debug`, `info`, `todo_api=debug`)
//!
//! A `.env` file in the working directory is loaded first.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_api::api::{AppState, router};
use todo_api::config::{Deployment, ServerConfig};
use todo_api::infrastructure::{RepositoryConfig, RepositoryFactory};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let deployment = Deployment::from_env();

    let server_config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    let repository_config = match RepositoryConfig::from_env(deployment.clone()) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    tracing::info!(
        storage_mode = ?repository_config.storage_mode,
        database = %deployment.database_name(),
        collection = %deployment.collection_name(),
        "Repository configuration loaded"
    );

    let cors_origin = match HeaderValue::from_str(&server_config.cors_origin) {
        Ok(origin) => origin,
        Err(error) => {
            tracing::error!(%error, "Invalid CORS origin: {}", server_config.cors_origin);
            std::process::exit(1);
        }
    };

    let repositories = match RepositoryFactory::new(repository_config).create().await {
        Ok(repositories) => repositories,
        Err(error) => {
            tracing::error!("Failed to initialize repositories: {}", error);
            std::process::exit(1);
        }
    };

    let application_state = AppState::from_repositories(repositories, deployment.clone());
    let todo_repository = application_state.todo_repository.clone();
    let application = router(application_state, cors_origin);

    let address: SocketAddr = match server_config.bind_address().parse() {
        Ok(address) => address,
        Err(error) => {
            tracing::error!(%error, "Invalid server address: {}", server_config.bind_address());
            std::process::exit(1);
        }
    };

    let listener = match TcpListener::bind(address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "Failed to bind to address {}", address);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Server running on http://localhost:{} for environment: {}",
        server_config.port,
        deployment.environment
    );

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "Server error");
    }

    todo_repository.shutdown().await;
    tracing::info!("Server shutdown complete");
}

/// Handles graceful shutdown signals (SIGINT, SIGTERM).
///
/// On Unix systems it listens for both SIGINT (Ctrl+C) and SIGTERM. On other
/// systems, only Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
