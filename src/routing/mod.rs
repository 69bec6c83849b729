//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path)
//!     → host.rs (extract routing key)
//!     → resolver.rs (snapshot lookup, default fallback, strict checks)
//!     → Return: Serve { directory } or NotFound
//! ```
//!
//! # Design Decisions
//! - Unknown hosts are served from the default directory, not rejected
//! - Deterministic: same snapshot and disk state always resolve the same way
//! - Resolution never holds the config snapshot across disk I/O

pub mod host;
pub mod resolver;

pub use host::request_host;
pub use resolver::{DirectorySource, Resolution, Resolver};
