//! OS signal handling.
//!
//! - SIGINT / SIGTERM → graceful shutdown
//! - SIGHUP → config reload (unix only), never shutdown

use tokio::sync::broadcast;

use crate::config::{ReloadTrigger, Reloader};

/// Resolve once Ctrl+C or SIGTERM arrives.
pub async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => tracing::info!("Received SIGINT, shutting down"),
                    _ = sigterm.recv() => tracing::info!("Received SIGTERM, shutting down"),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Received SIGINT, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Received Ctrl+C, shutting down");
    }
}

/// Reload the config on every SIGHUP until shutdown.
#[cfg(unix)]
pub fn spawn_reload_on_hangup(reloader: Reloader, mut shutdown: broadcast::Receiver<()>) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sighup = match signal(SignalKind::hangup()) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGHUP handler; signal reload disabled");
            return;
        }
    };

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                received = sighup.recv() => {
                    if received.is_none() {
                        break;
                    }
                    tracing::info!(path = %reloader.source().display(), "Received SIGHUP, reloading configuration");
                    let attempt = reloader.clone();
                    match tokio::task::spawn_blocking(move || attempt.reload(ReloadTrigger::Signal)).await {
                        Ok(Ok(_)) => {}
                        Ok(Err(e)) => tracing::error!(error = %e, "Failed to reload config. Keeping current configuration."),
                        Err(e) => tracing::error!(error = %e, "Config reload task failed"),
                    }
                }
            }
        }
    });
}

#[cfg(not(unix))]
pub fn spawn_reload_on_hangup(_reloader: Reloader, _shutdown: broadcast::Receiver<()>) {}
