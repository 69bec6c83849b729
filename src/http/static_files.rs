//! Static file handler.
//!
//! Resolves the request against the live host mapping and delegates the
//! actual file streaming to `tower_http::services::ServeDir`.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::http::server::AppState;
use crate::routing::{request_host, Resolution};

/// Body returned when strict mode finds nothing to serve.
pub const NOT_FOUND_BODY: &str = "File not found";

/// Fallback handler: every non-admin request lands here.
pub async fn serve_static(State(state): State<AppState>, request: Request) -> Response {
    let host = request_host(&request).unwrap_or_default().to_string();
    let path = request.uri().path().to_string();

    let resolver = state.resolver.clone();
    let resolution = if resolver.is_strict() {
        let (host, path) = (host.clone(), path.clone());
        match tokio::task::spawn_blocking(move || resolver.resolve(&host, &path)).await {
            Ok(resolution) => resolution,
            Err(e) => {
                tracing::error!(error = %e, "Resolution task failed");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    } else {
        resolver.resolve(&host, &path)
    };

    match resolution {
        Resolution::NotFound { directory } => {
            tracing::debug!(
                host = %host,
                path = %path,
                directory = %directory.display(),
                "Strict check found nothing to serve"
            );
            (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
        }
        Resolution::Serve {
            directory, source, ..
        } => {
            tracing::debug!(
                host = %host,
                path = %path,
                directory = %directory.display(),
                source = source.as_str(),
                "Serving request"
            );
            match ServeDir::new(&directory).oneshot(request).await {
                Ok(response) => response.into_response(),
                Err(never) => match never {},
            }
        }
    }
}
