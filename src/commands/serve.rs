//! Serve command - Starts the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::oneshot;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Config, StorageDriver};
use crate::errors::{AppError, AppResult};
use crate::infra::{AssetStore, Database, InMemoryAssetStore, InMemoryUserStore, UserStore};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!(version = %config.app.version, "starting server");

    if config.jwt.uses_dev_secret() {
        tracing::warn!("JWT secret not configured, using the development secret");
    }

    let state = build_state(&config).await?;
    let app = create_router(state, config.app.request_timeout);

    if let Some(host) = args.host {
        config.app.host = host;
    }
    if let Some(port) = args.port {
        config.app.port = port;
    }
    let addr = config.app.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("failed to bind to {}: {}", addr, e)))?;

    tracing::info!("server running on http://{}", addr);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async {
            let _ = stop_rx.await;
        })
        .await
    });

    shutdown_signal().await;
    let _ = stop_tx.send(());

    let grace = config.app.shutdown_timeout;
    match tokio::time::timeout(grace, server).await {
        Ok(Ok(Ok(()))) => {
            tracing::info!("server shut down gracefully");
            Ok(())
        }
        Ok(Ok(Err(e))) => Err(AppError::internal(format!("server error: {}", e))),
        Ok(Err(e)) => Err(AppError::internal(format!("server task failed: {}", e))),
        Err(_) => Err(AppError::internal(format!(
            "server forced to shut down after {}ms",
            grace.as_millis()
        ))),
    }
}

/// Construct the stores for the configured driver.
async fn build_state(config: &Config) -> AppResult<AppState> {
    match config.database.driver {
        StorageDriver::Memory => {
            tracing::info!(driver = %config.database.driver, "using in-memory storage");
            Ok(AppState::new(
                Arc::new(InMemoryAssetStore::new()),
                Arc::new(InMemoryUserStore::new()),
            ))
        }
        StorageDriver::Postgres => {
            let run_migrations = !config.database.dsn.is_empty();
            if !run_migrations {
                tracing::warn!("database DSN is not set, skipping migrations");
            }

            let database = Arc::new(Database::connect(&config.database).await?);
            if run_migrations {
                database.run_migrations().await?;
                tracing::info!("migrations completed successfully");
            }
            tracing::info!(driver = %config.database.driver, "using relational storage");

            let connection = database.get_connection();
            Ok(AppState::new(
                Arc::new(AssetStore::new(connection.clone())),
                Arc::new(UserStore::new(connection)),
            )
            .with_database(database))
        }
    }
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, initiating graceful shutdown");
        }
    }
}
