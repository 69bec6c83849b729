//! Live configuration snapshot shared by request handlers and reload triggers.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::schema::HostConfig;

/// Holds exactly one live [`HostConfig`] and swaps it atomically.
///
/// Readers get an `Arc` to a complete snapshot and keep it alive for as long
/// as they need; a concurrent `set` never mutates it. Cloning the store is
/// cheap and every clone observes the same value.
#[derive(Clone)]
pub struct ConfigStore {
    // ArcSwap is not Clone, so the swap cell itself is shared behind an Arc
    inner: Arc<ArcSwap<HostConfig>>,
}

impl ConfigStore {
    pub fn new(initial: HostConfig) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(initial)),
        }
    }

    /// Current snapshot.
    pub fn get(&self) -> Arc<HostConfig> {
        self.inner.load_full()
    }

    /// Replace the snapshot; every `get` that starts after this returns
    /// observes `config` or a later value. Returns the published snapshot.
    pub fn set(&self, config: HostConfig) -> Arc<HostConfig> {
        let snapshot = Arc::new(config);
        self.inner.store(Arc::clone(&snapshot));
        snapshot
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("current", &*self.inner.load())
            .finish()
    }
}
