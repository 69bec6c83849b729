//! The single reload mechanism behind every trigger.
//!
//! Watch events, the admin endpoint and SIGHUP all call [`Reloader::reload`];
//! they only differ in how they surface the outcome.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::loader::{load_config, LoadError};
use crate::config::schema::HostConfig;
use crate::config::store::ConfigStore;
use crate::observability::metrics;

/// What requested a reload, for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadTrigger {
    Watch,
    Endpoint,
    Signal,
}

impl ReloadTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReloadTrigger::Watch => "watch",
            ReloadTrigger::Endpoint => "endpoint",
            ReloadTrigger::Signal => "signal",
        }
    }
}

impl std::fmt::Display for ReloadTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loads the configuration source and publishes it to the store.
#[derive(Debug, Clone)]
pub struct Reloader {
    source: Arc<PathBuf>,
    store: ConfigStore,
}

impl Reloader {
    pub fn new(source: impl Into<PathBuf>, store: ConfigStore) -> Self {
        Self {
            source: Arc::new(source.into()),
            store,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Load, validate and publish. On failure the store keeps its current
    /// snapshot untouched.
    ///
    /// Blocking: performs file I/O.
    pub fn reload(&self, trigger: ReloadTrigger) -> Result<Arc<HostConfig>, LoadError> {
        match load_config(&self.source) {
            Ok(config) => {
                let snapshot = self.store.set(config);
                metrics::record_reload(trigger, true);
                metrics::record_hosts(snapshot.len());
                tracing::info!(
                    trigger = %trigger,
                    path = %self.source.display(),
                    hosts = snapshot.len(),
                    "Config reloaded"
                );
                Ok(snapshot)
            }
            Err(e) => {
                metrics::record_reload(trigger, false);
                Err(e)
            }
        }
    }
}
