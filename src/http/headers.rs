//! Hop-by-hop header filtering.
//!
//! Hop-by-hop headers describe a single transport leg and are never relayed
//! across the proxy, in either direction. `Host` is included because the
//! outbound leg derives it from the origin URI.

use axum::http::HeaderMap;

const HOP_BY_HOP: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
    "host",
];

/// Whether a header must not be relayed. Case-insensitive; an empty name is skipped.
pub fn should_skip(name: &str) -> bool {
    name.is_empty() || HOP_BY_HOP.iter().any(|h| h.eq_ignore_ascii_case(name))
}

/// Append every end-to-end header of `src` to `dst`, keeping value order.
pub fn copy_end_to_end(src: &HeaderMap, dst: &mut HeaderMap) {
    for (name, value) in src.iter() {
        if !should_skip(name.as_str()) {
            dst.append(name.clone(), value.clone());
        }
    }
}

/// A copy of `src` with hop-by-hop headers removed.
pub fn end_to_end(src: &HeaderMap) -> HeaderMap {
    let mut dst = HeaderMap::with_capacity(src.len());
    copy_end_to_end(src, &mut dst);
    dst
}
