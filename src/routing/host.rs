//! Host extraction.
//!
//! # Design Decisions
//! - Host matching is exact and case-sensitive, as received
//! - The port suffix is part of the key (`example.com:8080` ≠ `example.com`)
//! - HTTP/2 requests without a Host header fall back to the URI authority

use axum::http::{header, Request};

/// Routing key of a request, if it carries one.
pub fn request_host<B>(req: &Request<B>) -> Option<&str> {
    req.headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| req.uri().authority().map(|a| a.as_str()))
}
