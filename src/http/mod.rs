//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout)
//!     → middleware/access_log.rs (client IP, status, latency)
//!     → static_files.rs (resolve host → directory, strict checks)
//!     → ServeDir streams the file or reports 404
//! ```

pub mod middleware;
pub mod server;
pub mod static_files;

pub use server::{AppState, HttpServer};
pub use static_files::NOT_FOUND_BODY;
