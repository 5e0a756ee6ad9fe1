//! Client-facing response construction.
//!
//! # Responsibilities
//! - Rebuild responses from cached or freshly fetched snapshots
//! - Strip hop-by-hop headers on every path
//! - Tag responses with X-Cache, X-Cache-Age and Via
//! - Map origin transport failures to 502 Bad Gateway
//! - Build the proxy's own error responses (413, 400)

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Response, StatusCode},
};
use std::error::Error;
use std::time::Instant;

use crate::cache::{CacheEntry, ResponseSnapshot};
use crate::http::headers;

pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");
pub const X_CACHE_AGE: HeaderName = HeaderName::from_static("x-cache-age");

const HIT: &str = "HIT";
const MISS: &str = "MISS";
const VIA: &str = "1.1 CachingProxy";

fn from_snapshot(snapshot: &ResponseSnapshot) -> Response<Body> {
    let mut response = Response::new(Body::from(snapshot.body.clone()));
    *response.status_mut() = snapshot.status;
    headers::copy_end_to_end(&snapshot.headers, response.headers_mut());
    response
}

/// Serve a cache hit. `X-Cache-Age` is whole seconds since insertion.
pub fn from_cache(entry: &CacheEntry, now: Instant) -> Response<Body> {
    let mut response = from_snapshot(entry.snapshot());
    let headers = response.headers_mut();
    headers.insert(X_CACHE, HeaderValue::from_static(HIT));
    headers.insert(X_CACHE_AGE, HeaderValue::from(entry.age_at(now).as_secs()));
    response
}

/// Relay a response fetched live from the origin.
pub fn from_origin(snapshot: &ResponseSnapshot) -> Response<Body> {
    let mut response = from_snapshot(snapshot);
    let headers = response.headers_mut();
    headers.insert(X_CACHE, HeaderValue::from_static(MISS));
    headers.insert(header::VIA, HeaderValue::from_static(VIA));
    response
}

/// 502 with a plain-text description of the failure and its causes.
pub fn bad_gateway(error: &(dyn Error + 'static)) -> Response<Body> {
    let message = format!("Bad Gateway: {}", error_chain(error));
    proxy_error(StatusCode::BAD_GATEWAY, message)
}

/// A plain-text error generated by the proxy itself, never cached.
pub fn proxy_error(status: StatusCode, message: impl Into<String>) -> Response<Body> {
    let mut response = Response::new(Body::from(message.into()));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    headers.insert(X_CACHE, HeaderValue::from_static(MISS));
    response
}

/// Render an error and its sources as "outer: inner: root".
pub fn error_chain(error: &(dyn Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
