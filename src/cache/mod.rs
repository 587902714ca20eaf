//! Absolute-TTL cache for listing results.
//!
//! An entry lives for `ttl` from the moment it was stored; reading it does not
//! extend its life. Each `get`/`set` is atomic per key (DashMap shard locks).
//! There is no capacity bound: time is the only eviction policy.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::debug;

struct CacheEntry<V> {
    value: Arc<V>,
    inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) < ttl
    }
}

pub struct TtlCache<V> {
    entries: Arc<DashMap<String, CacheEntry<V>>>,
    ttl: Duration,
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
        }
    }
}

impl<V> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh value for `key`, if any. A stale entry is dropped on the way.
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        self.get_at(key, Instant::now())
    }

    /// Store `value` under `key`, replacing whatever was there, and hand back
    /// the shared copy now held by the cache.
    pub fn set(&self, key: impl Into<String>, value: V) -> Arc<V> {
        self.set_at(key.into(), value, Instant::now())
    }

    /// Number of stored entries, stale ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry; returns how many went.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    pub(crate) fn get_at(&self, key: &str, now: Instant) -> Option<Arc<V>> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_fresh(self.ttl, now) {
                return Some(Arc::clone(&entry.value));
            }
            // Release the read guard before taking the shard's write lock
            drop(entry);
            self.entries
                .remove_if(key, |_, entry| !entry.is_fresh(self.ttl, now));
        }
        None
    }

    pub(crate) fn set_at(&self, key: String, value: V, now: Instant) -> Arc<V> {
        let value = Arc::new(value);
        self.entries.insert(
            key,
            CacheEntry {
                value: Arc::clone(&value),
                inserted_at: now,
            },
        );
        value
    }

    pub(crate) fn purge_expired_at(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(self.ttl, now));
        before.saturating_sub(self.entries.len())
    }
}

impl<V: Send + Sync + 'static> TtlCache<V> {
    /// Purge expired entries every `every` on the tokio runtime.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            // The first tick fires immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let purged = cache.purge_expired();
                if purged > 0 {
                    debug!(purged, remaining = cache.len(), "swept expired cache entries");
                }
            }
        })
    }
}
