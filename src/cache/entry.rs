//! Response snapshots and cache entries.

use axum::http::{HeaderMap, StatusCode};
use bytes::Bytes;
use std::time::{Duration, Instant};

/// A fully materialized HTTP response, independent of the connection that
/// produced it.
#[derive(Debug, Clone)]
pub struct ResponseSnapshot {
    /// Response status.
    pub status: StatusCode,
    /// Response headers; multi-valued headers keep origin order.
    pub headers: HeaderMap,
    /// Complete response body.
    pub body: Bytes,
}

impl ResponseSnapshot {
    /// Create a new snapshot.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }
}

/// A snapshot stored in the cache together with its insertion time.
///
/// Entries are immutable; a refresh replaces the whole entry.
#[derive(Debug)]
pub struct CacheEntry {
    snapshot: ResponseSnapshot,
    created_at: Instant,
}

impl CacheEntry {
    pub(crate) fn new(snapshot: ResponseSnapshot, created_at: Instant) -> Self {
        Self {
            snapshot,
            created_at,
        }
    }

    /// The cached response.
    pub fn snapshot(&self) -> &ResponseSnapshot {
        &self.snapshot
    }

    /// When the entry was inserted.
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Age of the entry at `now`. Never negative.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    /// Age of the entry right now.
    pub fn age(&self) -> Duration {
        self.age_at(Instant::now())
    }

    /// Whether the entry has outlived `ttl` at `now`.
    pub fn is_expired_at(&self, now: Instant, ttl: Duration) -> bool {
        self.age_at(now) >= ttl
    }
}
