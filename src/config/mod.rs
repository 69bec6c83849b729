//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (YAML/TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → HostConfig (validated, immutable)
//!     → store.rs (atomic snapshot shared by every request)
//!
//! On reload (file watch, GET /reload, SIGHUP):
//!     reload.rs → loader.rs loads new config
//!     → validation.rs validates
//!     → atomic swap of Arc<HostConfig>
//!     → failure leaves the previous snapshot in place
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - Loading never publishes; publishing is the reloader's job
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod reload;
pub mod schema;
pub mod store;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, LoadError};
pub use reload::{ReloadTrigger, Reloader};
pub use schema::{HostConfig, ServerSettings};
pub use store::ConfigStore;
pub use watcher::ConfigWatcher;
