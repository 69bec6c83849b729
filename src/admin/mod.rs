pub mod handlers;

use axum::{routing::get, Router};

use self::handlers::reload_config;
use crate::http::server::AppState;

pub use self::handlers::RELOAD_OK_BODY;

/// Administrative routes, merged into the main router when enabled.
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/reload", get(reload_config))
}
