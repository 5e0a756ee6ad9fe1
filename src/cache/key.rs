//! Cache key derivation.

use axum::http::Method;
use std::fmt;

/// Identifies a cached response by request method and target.
///
/// The key is the literal string `"<METHOD> <TARGET>"` where the target is the
/// path plus query string exactly as received. No normalization is applied:
/// `/a` and `/a/` are distinct, as are `?x=1&y=2` and `?y=2&x=1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive a key from a method and request target.
    pub fn new(method: &Method, target: &str) -> Self {
        Self(format!("{} {}", method, target))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
