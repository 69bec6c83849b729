//! Network-facing helpers.
//!
//! # Data Flow
//! ```text
//! Peer address + forwarding headers
//!     → trusted_proxies.rs (is the peer a trusted proxy?)
//!     → client IP used by the access log
//! ```

pub mod trusted_proxies;

pub use trusted_proxies::{IpBlock, ProxyParseError, TrustedProxies};
