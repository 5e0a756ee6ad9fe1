//! Inbound request capture.
//!
//! # Responsibilities
//! - Extract the proxied target (path + query) from the request URI
//! - Hold the fully buffered body so the request can be forwarded
//! - Expose the x-request-id assigned by the middleware for logging

use axum::http::{request::Parts, HeaderMap, HeaderName, Method};
use bytes::Bytes;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// An inbound request with its body read into memory.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: Method,
    /// Path plus query string, exactly as received.
    pub target: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ProxyRequest {
    pub fn new(method: Method, target: impl Into<String>, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            target: target.into(),
            headers,
            body,
        }
    }

    /// Build from request parts and an already-buffered body.
    ///
    /// Absolute-form URIs contribute only their path and query.
    pub fn from_parts(parts: Parts, body: Bytes) -> Self {
        let target = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
            .to_string();

        Self {
            method: parts.method,
            target,
            headers: parts.headers,
            body,
        }
    }

    /// The request ID, or "unknown" when none was assigned.
    pub fn request_id(&self) -> &str {
        self.headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}
