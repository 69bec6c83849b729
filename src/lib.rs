//! Multi-tenant static file server library.
//!
//! Requests are routed to a directory chosen by their Host header; the
//! host mapping lives in a YAML/TOML file that can be reloaded at runtime
//! without dropping in-flight requests.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::{ConfigStore, HostConfig, Reloader, ServerSettings};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Resolution, Resolver};
