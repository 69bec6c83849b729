//! Access log middleware.
//!
//! One structured event per request with status, client IP, method, host,
//! URI and duration. Client IP honors the trusted proxy list.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::request_host;

pub async fn access_log(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();

    let client_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(peer)| state.trusted_proxies.client_ip(*peer, request.headers()));
    let host = request_host(&request).unwrap_or_default().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    metrics::record_request(method.as_str(), status, start);

    tracing::info!(
        status,
        client_ip = ?client_ip,
        method = %method,
        host = %host,
        uri = %uri,
        elapsed = ?start.elapsed(),
        "request"
    );

    response
}
