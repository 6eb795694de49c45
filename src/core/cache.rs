//! Response caching keyed by the canonical request URL.

use std::collections::{HashMap, VecDeque};
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

/// Storage for raw response bodies, keyed by [`BuiltRequest::cache_key`].
///
/// Implementations must be safe under concurrent `get`/`put`; the request pipeline
/// takes no locks of its own.
///
/// [`BuiltRequest::cache_key`]: crate::series::BuiltRequest::cache_key
pub trait ResponseCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, body: &str);
}

#[derive(Debug)]
struct CacheEntry {
    body: String,
    expires_at: Option<Instant>,
}

#[derive(Debug, Default)]
struct CacheInner {
    map: HashMap<String, CacheEntry>,
    // insertion order, oldest first; drives capacity eviction
    order: VecDeque<String>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now > at)
    }
}

impl CacheInner {
    fn purge_expired(&mut self, now: Instant) {
        self.map.retain(|_, e| !e.is_expired(now));
        let map = &self.map;
        self.order.retain(|k| map.contains_key(k));
    }
}

/// In-process cache with optional expiry and an optional entry limit.
///
/// Without a TTL entries live for the life of the cache; without a capacity the
/// cache grows with every distinct request.
#[derive(Debug, Default)]
pub struct MemoryCache {
    inner: RwLock<CacheInner>,
    ttl: Option<Duration>,
    capacity: Option<usize>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expire entries `ttl` after they were stored.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Keep at most `max_entries`, evicting the oldest insertion first.
    pub fn with_capacity_limit(mut self, max_entries: usize) -> Self {
        self.capacity = Some(max_entries.max(1));
        self
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .map
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.map.clear();
        guard.order.clear();
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        {
            let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            let entry = guard.map.get(key)?;
            if !entry.is_expired(Instant::now()) {
                return Some(entry.body.clone());
            }
        }
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if guard
            .map
            .get(key)
            .is_some_and(|e| e.is_expired(Instant::now()))
        {
            guard.map.remove(key);
            guard.order.retain(|k| k != key);
        }
        None
    }

    fn put(&self, key: &str, body: &str) {
        let entry = CacheEntry {
            body: body.to_string(),
            expires_at: self.ttl.map(|ttl| Instant::now() + ttl),
        };
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.purge_expired(Instant::now());
        if guard.map.insert(key.to_string(), entry).is_some() {
            guard.order.retain(|k| k != key);
        }
        guard.order.push_back(key.to_string());

        if let Some(cap) = self.capacity {
            while guard.map.len() > cap {
                let Some(oldest) = guard.order.pop_front() else {
                    break;
                };
                guard.map.remove(&oldest);
            }
        }
    }
}
