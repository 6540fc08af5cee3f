//! TTL cache in front of the price provider.
//!
//! Cache-aside: callers check the cache, and on a miss fetch from the
//! provider and populate the cache themselves. Entries hold serialized
//! JSON so the cache never depends on the shapes it stores.
//!
//! The cache is an explicitly constructed component passed by handle into
//! the services that need it — cloning a [`MarketDataCache`] clones the
//! handle, not the data. A [`MarketDataCache::disabled`] cache behaves as a
//! pass-through (every `get` misses, `set` does nothing), which dependents
//! must treat exactly like a cold cache, not like a failure.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::models::quote::{SeriesInterval, SeriesRange};

/// TTL for cached real-time quotes.
pub const REALTIME_QUOTE_TTL: Duration = Duration::from_secs(5 * 60);

/// TTL for cached historical series — 6× the quote TTL, since a
/// historical series only changes at day granularity.
pub const HISTORICAL_SERIES_TTL: Duration = Duration::from_secs(30 * 60);

/// Cache key for a symbol's current quote.
#[must_use]
pub fn realtime_key(symbol: &str) -> String {
    format!("realtime:{}", symbol.to_uppercase())
}

/// Cache key for a symbol's historical series at a given interval/range.
#[must_use]
pub fn historical_key(symbol: &str, interval: SeriesInterval, range: SeriesRange) -> String {
    format!("historical:{}:{interval}:{range}", symbol.to_uppercase())
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

#[derive(Debug)]
struct CacheInner {
    map: HashMap<String, CacheEntry>,
    enabled: bool,
}

impl CacheInner {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).and_then(|entry| {
            if Instant::now() <= entry.expires_at {
                Some(entry.value.clone())
            } else {
                None
            }
        })
    }
}

/// Thread-safe TTL cache for serialized market data.
///
/// Concurrent readers and writers are safe; a write race on the same key
/// is last-writer-wins. Expiry is wall-clock based and checked on read —
/// there is no eviction beyond TTL expiry (call [`purge_expired`] to
/// reclaim memory from dead entries).
///
/// [`purge_expired`]: MarketDataCache::purge_expired
#[derive(Debug, Clone)]
pub struct MarketDataCache {
    inner: Arc<tokio::sync::RwLock<CacheInner>>,
}

impl MarketDataCache {
    pub fn new() -> Self {
        Self::build(true)
    }

    /// A pass-through cache: every `get` reports absent and `set` is a
    /// no-op. Used when no cache backing should be kept at all; dependents
    /// cannot distinguish it from a cache that never hits.
    pub fn disabled() -> Self {
        Self::build(false)
    }

    fn build(enabled: bool) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(CacheInner {
                map: HashMap::new(),
                enabled,
            })),
        }
    }

    /// Get a cached value if present and not expired.
    pub async fn get(&self, key: &str) -> Option<String> {
        let store = self.inner.read().await;
        if !store.enabled {
            return None;
        }
        store.get(key)
    }

    /// Store a value under `key` for `ttl`. Overwrites any previous entry.
    pub async fn set(&self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) {
        let mut store = self.inner.write().await;
        if !store.enabled {
            return;
        }
        store.map.insert(
            key.into(),
            CacheEntry {
                value: value.into(),
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Remove a single entry.
    pub async fn delete(&self, key: &str) {
        let mut store = self.inner.write().await;
        store.map.remove(key);
    }

    /// Drop entries whose TTL has passed.
    pub async fn purge_expired(&self) {
        let mut store = self.inner.write().await;
        let now = Instant::now();
        store.map.retain(|_, entry| entry.expires_at > now);
    }

    /// Remove all entries.
    pub async fn clear(&self) {
        let mut store = self.inner.write().await;
        store.map.clear();
    }

    /// Number of entries held (expired-but-unpurged entries included).
    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn is_disabled(&self) -> bool {
        let store = self.inner.read().await;
        !store.enabled
    }
}

impl Default for MarketDataCache {
    fn default() -> Self {
        Self::new()
    }
}
