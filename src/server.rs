//! HTTP server initialization and runtime setup.
//!
//! Handles the database connection, service wiring and the Axum server lifecycle.

use crate::application::services::ShortUrlService;
use crate::config::Config;
use crate::infrastructure::persistence::SqliteShortUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool and `urls` schema
/// - Short URL service
/// - Axum HTTP server with graceful shutdown
///
/// The pool is opened once here and closed after the server stops.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or schema creation fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = Arc::new(
        SqliteShortUrlRepository::connect(&config.database_url, &config.sqlite_settings())
            .await
            .context("Failed to open database")?,
    );
    tracing::info!("Connected to database");

    let service = Arc::new(ShortUrlService::with_generation_attempts(
        repository.clone(),
        config.code_generation_attempts,
    ));

    let links = config.link_settings();
    if links.warning_page_is_relative() {
        tracing::warn!(
            warning_page = %links.warning_page_url,
            "WARNING_PAGE_URL is a relative path; a proxy must route it to the warning page frontend"
        );
    }

    let state = AppState::new(service, links);

    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repository.close().await;
    tracing::info!("Database connections closed");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
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
