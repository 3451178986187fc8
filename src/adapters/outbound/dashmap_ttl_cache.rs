//! DashMap TTL Cache
//!
//! Implements Cache using DashMap with a per-entry expiry deadline.

use crate::domain::ports::Cache;
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default time-to-live for cached responses.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(4 * 60 * 60);

/// A cached body and the instant it stops being served.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Bytes,
    /// `None` when `now + ttl` is past what `Instant` can represent
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(deadline) if now >= deadline)
    }
}

/// DashMap-backed cache with lazy expiry.
///
/// Every `set` stamps the entry with `now + ttl`. Expired entries are never
/// returned by `get`; they are dropped when read, by `purge_expired`, or by
/// the optional background sweep started with `start_gc`.
pub struct DashMapTtlCache {
    ttl: Duration,
    entries: Arc<DashMap<String, CacheEntry>>,
}

impl DashMapTtlCache {
    /// Create a cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(DashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start the background sweep.
    ///
    /// Only reclaims memory; `get` already hides expired entries. A zero
    /// interval would spin, so no sweep is started for it.
    pub fn start_gc(&self, interval: Duration) {
        if interval.is_zero() {
            tracing::warn!("cache GC interval is zero, background sweep disabled");
            return;
        }

        let entries = self.entries.clone();

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                let removed = Self::sweep(&entries, Instant::now());
                if removed > 0 {
                    tracing::debug!("cache GC removed {} expired entries", removed);
                }
            }
        });
    }

    /// Remove every expired entry, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        Self::sweep(&self.entries, Instant::now())
    }

    fn sweep(entries: &DashMap<String, CacheEntry>, now: Instant) -> usize {
        let mut removed = 0;
        entries.retain(|_, entry| {
            let keep = !entry.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Drop a key regardless of its expiry.
    pub fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Number of stored entries, including expired ones not yet reclaimed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DashMapTtlCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

#[async_trait]
impl Cache for DashMapTtlCache {
    async fn get(&self, key: &str) -> Option<Bytes> {
        let now = Instant::now();

        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
            Some(_) => {}
            None => return None,
        }

        // Re-check under the shard write lock so a concurrent fresh `set`
        // is not thrown away.
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        None
    }

    async fn set(&self, key: &str, value: Bytes) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now().checked_add(self.ttl),
        };
        self.entries.insert(key.to_string(), entry);
    }
}
