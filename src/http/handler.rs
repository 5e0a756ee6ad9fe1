//! Per-request cache/forward decision.
//!
//! # Data Flow
//! ```text
//! ProxyRequest
//!     → CacheKey "<METHOD> <TARGET>"
//!     → CacheStore lookup
//!         Hit            → response::from_cache (X-Cache: HIT, X-Cache-Age)
//!         Miss / Expired → OriginClient::forward
//!             Ok  → CachePolicy? → CacheStore::put
//!                 → response::from_origin (X-Cache: MISS, Via)
//!             Err → response::bad_gateway (502, cache untouched)
//! ```

use axum::{body::Body, http::Response};
use std::sync::Arc;
use std::time::Instant;

use crate::cache::{CacheKey, CacheLookup, CachePolicy, CacheStore};
use crate::http::headers;
use crate::http::request::ProxyRequest;
use crate::http::response;
use crate::observability::metrics;
use crate::origin::{OriginClient, OriginRequest};

/// Serves requests from the cache or the origin.
///
/// Cheap to clone; clones share the same cache and origin client.
#[derive(Clone)]
pub struct ProxyHandler {
    cache: CacheStore,
    origin: Arc<dyn OriginClient>,
}

impl ProxyHandler {
    pub fn new(cache: CacheStore, origin: Arc<dyn OriginClient>) -> Self {
        Self { cache, origin }
    }

    /// Handle one request. Never fails: origin errors become a 502.
    pub async fn handle(&self, request: ProxyRequest) -> Response<Body> {
        let start = Instant::now();
        let method = request.method.clone();
        let key = CacheKey::new(&method, &request.target);

        let lookup = self.cache.lookup(&key);
        metrics::record_cache_lookup(lookup.outcome());

        match lookup {
            CacheLookup::Hit(entry) => {
                let now = Instant::now();
                tracing::info!(
                    request_id = %request.request_id(),
                    key = %key,
                    age_secs = entry.age_at(now).as_secs(),
                    "Cache HIT"
                );
                let response = response::from_cache(&entry, now);
                metrics::record_request(method.as_str(), response.status().as_u16(), "hit", start);
                return response;
            }
            CacheLookup::Expired => {
                tracing::info!(request_id = %request.request_id(), key = %key, "Cache EXPIRED, forwarding to origin");
            }
            CacheLookup::Miss => {
                tracing::info!(request_id = %request.request_id(), key = %key, "Cache MISS, forwarding to origin");
            }
        }

        let request_id = request.request_id().to_string();
        let outbound = OriginRequest {
            method: request.method,
            target: request.target,
            headers: headers::end_to_end(&request.headers),
            body: request.body,
        };

        match self.origin.forward(outbound).await {
            Ok(snapshot) => {
                let response = response::from_origin(&snapshot);
                if CachePolicy::is_cacheable(&method, snapshot.status) {
                    tracing::info!(request_id = %request_id, key = %key, status = %snapshot.status, "Response cached");
                    self.cache.put(key, snapshot);
                }
                metrics::record_request(method.as_str(), response.status().as_u16(), "miss", start);
                response
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    key = %key,
                    error = %response::error_chain(&e),
                    "Origin request failed"
                );
                metrics::record_origin_error();
                let response = response::bad_gateway(&e);
                metrics::record_request(method.as_str(), response.status().as_u16(), "miss", start);
                response
            }
        }
    }
}
