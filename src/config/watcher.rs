//! Configuration file watcher for hot reload.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::reload::{ReloadTrigger, Reloader};

/// Watches the configuration file and reloads it on every write.
///
/// The parent directory is watched rather than the file itself so that
/// editors replacing the file by rename keep triggering reloads. Dropping the
/// watcher stops both the notification source and the reload task.
///
/// Only setup failure is fatal. Errors delivered by the backend afterwards
/// are logged and watching continues.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    task: JoinHandle<()>,
}

impl ConfigWatcher {
    /// Start watching. Must be called inside a Tokio runtime.
    ///
    /// Fails if the notification backend cannot be created or the directory
    /// cannot be watched.
    pub fn spawn(reloader: Reloader) -> Result<Self, notify::Error> {
        let path = reloader.source().to_path_buf();
        let watch_dir = watch_dir(&path);
        let file_name = path
            .file_name()
            .map(|name| name.to_os_string())
            .ok_or_else(|| notify::Error::generic("config path has no file name"))?;

        let (tx, rx) = mpsc::unbounded_channel::<()>();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if is_reload_event(&event, &file_name) => {
                    tracing::debug!(kind = ?event.kind, paths = ?event.paths, "Config file change detected");
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            },
            Config::default(),
        )?;

        watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;
        tracing::info!(path = %path.display(), "Config watcher started");

        let task = tokio::spawn(reload_loop(reloader, rx));

        Ok(Self {
            _watcher: watcher,
            task,
        })
    }
}

impl Drop for ConfigWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// One load+publish cycle per notification; failures keep the current config.
async fn reload_loop(reloader: Reloader, mut rx: mpsc::UnboundedReceiver<()>) {
    while rx.recv().await.is_some() {
        let attempt = reloader.clone();
        match tokio::task::spawn_blocking(move || attempt.reload(ReloadTrigger::Watch)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Failed to reload config. Keeping current configuration.");
            }
            Err(e) => tracing::error!(error = %e, "Config reload task failed"),
        }
    }
    tracing::debug!("Config watcher stopped");
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn is_reload_event(event: &Event, file_name: &OsString) -> bool {
    let write_like = matches!(
        event.kind,
        EventKind::Create(_)
            | EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Name(_))
            | EventKind::Modify(ModifyKind::Any)
    );

    write_like
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}
