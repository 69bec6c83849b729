use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::config::ReloadTrigger;
use crate::http::server::AppState;

pub const RELOAD_OK_BODY: &str = "Config reloaded successfully";

/// `GET /reload`: synchronous reload surfaced as the HTTP status.
pub async fn reload_config(State(state): State<AppState>) -> Response {
    let reloader = state.reloader.clone();
    match tokio::task::spawn_blocking(move || reloader.reload(ReloadTrigger::Endpoint)).await {
        Ok(Ok(_)) => (StatusCode::OK, RELOAD_OK_BODY).into_response(),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Reload request failed. Keeping current configuration.");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error reloading config: {e}"),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Reload task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error reloading config").into_response()
        }
    }
}
