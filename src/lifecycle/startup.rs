//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: initial config load and watcher setup are fatal
//! - Subsystems initialize in order, not concurrently
//! - The listener binds last (traffic only when ready)

use std::io;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, ConfigStore, ConfigWatcher, LoadError, Reloader, ServerSettings};
use crate::http::HttpServer;
use crate::lifecycle::limits::{raise_fd_limit, TARGET_OPEN_FILES};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load initial config: {0}")]
    Config(#[from] LoadError),

    #[error("failed to start config watcher: {0}")]
    Watch(#[from] notify::Error),

    #[error("failed to bind {address}: {source}")]
    Bind { address: String, source: io::Error },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Bring every subsystem up and serve until a shutdown signal.
pub async fn run(settings: ServerSettings) -> Result<(), StartupError> {
    match raise_fd_limit(TARGET_OPEN_FILES) {
        Ok(Some(limit)) => tracing::debug!(limit, "Open file limit"),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Failed to raise open file limit"),
    }

    let initial = load_config(&settings.config_path)?;
    tracing::info!(
        path = %settings.config_path.display(),
        hosts = initial.len(),
        "Configuration loaded"
    );
    metrics::record_hosts(initial.len());

    let store = ConfigStore::new(initial);
    let reloader = Reloader::new(settings.config_path.clone(), store);

    let _watcher = if settings.watch {
        Some(ConfigWatcher::spawn(reloader.clone())?)
    } else {
        None
    };

    if let Some(addr) = settings.metrics_address {
        metrics::init_metrics(addr);
    }

    let shutdown = Shutdown::new();
    signals::spawn_reload_on_hangup(reloader.clone(), shutdown.subscribe());

    let address = settings.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    let server = HttpServer::new(&settings, reloader);
    let server_shutdown = shutdown.subscribe();

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_shutdown().await;
        trigger.trigger();
    });

    server.run(listener, server_shutdown).await.map_err(StartupError::Serve)?;

    shutdown.trigger();
    tracing::info!("Shutdown complete");
    Ok(())
}
