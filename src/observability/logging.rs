//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` always wins over the built-in filter
//! - `--debug` only raises verbosity; it never changes request handling

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "static_server=info,tower_http=warn";
const DEBUG_FILTER: &str = "static_server=debug,tower_http=debug";

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        DEBUG_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init(debug: bool) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(debug).into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
