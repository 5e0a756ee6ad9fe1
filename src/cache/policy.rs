//! Which origin responses may be stored.

use axum::http::{Method, StatusCode};

pub struct CachePolicy;

impl CachePolicy {
    /// Only GET responses with a 2xx or 3xx status are cached.
    pub fn is_cacheable(method: &Method, status: StatusCode) -> bool {
        *method == Method::GET && (200..400).contains(&status.as_u16())
    }
}
