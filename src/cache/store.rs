//! Concurrent in-memory response store.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cache::entry::{CacheEntry, ResponseSnapshot};
use crate::cache::key::CacheKey;
use crate::observability::metrics;

/// Default time-to-live for cached responses (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Result of looking up a key.
#[derive(Debug, Clone)]
pub enum CacheLookup {
    /// A fresh entry was found.
    Hit(Arc<CacheEntry>),
    /// No entry exists for the key.
    Miss,
    /// An entry existed but had expired; it has been evicted.
    Expired,
}

impl CacheLookup {
    /// Collapse the lookup into the fresh entry, if any.
    pub fn into_entry(self) -> Option<Arc<CacheEntry>> {
        match self {
            CacheLookup::Hit(entry) => Some(entry),
            CacheLookup::Miss | CacheLookup::Expired => None,
        }
    }

    /// Label used for logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            CacheLookup::Hit(_) => "hit",
            CacheLookup::Miss => "miss",
            CacheLookup::Expired => "expired",
        }
    }
}

/// A sharded map from cache key to immutable entry.
///
/// Cloning is cheap and yields a handle to the same store. Each proxy
/// instance owns its own store.
///
/// Expiration is lazy: an expired entry is only removed by the lookup that
/// observes it, or by [`CacheStore::clear`]. Keys that are never read again
/// keep their memory until then.
#[derive(Debug, Clone)]
pub struct CacheStore {
    entries: Arc<DashMap<CacheKey, Arc<CacheEntry>>>,
    ttl: Duration,
}

impl CacheStore {
    /// Create an empty store whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fetch a fresh entry, evicting it if it has expired.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<CacheEntry>> {
        self.lookup(key).into_entry()
    }

    /// Look up a key, distinguishing a plain miss from an expired eviction.
    pub fn lookup(&self, key: &CacheKey) -> CacheLookup {
        self.lookup_at(key, Instant::now())
    }

    /// Look up a key as of `now`.
    pub fn lookup_at(&self, key: &CacheKey, now: Instant) -> CacheLookup {
        // The shard guard must be released before `remove_if` takes the write lock.
        let entry = match self.entries.get(key) {
            Some(found) => Arc::clone(found.value()),
            None => return CacheLookup::Miss,
        };

        if !entry.is_expired_at(now, self.ttl) {
            return CacheLookup::Hit(entry);
        }

        self.evict_if_expired(key, now);
        CacheLookup::Expired
    }

    /// Remove the entry for `key` only if the one currently stored is expired
    /// at `now`. A concurrent put may have replaced the entry that was read.
    fn evict_if_expired(&self, key: &CacheKey, now: Instant) -> bool {
        let ttl = self.ttl;
        let removed = self
            .entries
            .remove_if(key, |_, current| current.is_expired_at(now, ttl))
            .is_some();
        if removed {
            metrics::record_cache_removed(1);
        }
        removed
    }

    /// Insert or replace the entry for `key`, stamped with the current time.
    pub fn put(&self, key: CacheKey, snapshot: ResponseSnapshot) {
        self.put_at(key, snapshot, Instant::now());
    }

    /// Insert or replace the entry for `key`, stamped with `created_at`.
    pub fn put_at(&self, key: CacheKey, snapshot: ResponseSnapshot, created_at: Instant) {
        let entry = Arc::new(CacheEntry::new(snapshot, created_at));
        if self.entries.insert(key, entry).is_none() {
            metrics::record_cache_inserted();
        }
    }

    /// Remove every entry, returning how many were removed.
    pub fn clear(&self) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, _| {
            removed += 1;
            false
        });
        metrics::record_cache_removed(removed);
        removed
    }

    /// Number of entries currently held, including expired ones not yet evicted.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
