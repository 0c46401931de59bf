//! Response cache for raw routing payloads.

use dashmap::DashMap;
use runroute_core::{CacheKey, ExternalRouteResponse};
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Store for raw upstream responses keyed by request signature.
pub trait RouteCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<Arc<ExternalRouteResponse>>;
    fn put(&self, key: CacheKey, value: Arc<ExternalRouteResponse>);
}

pub trait CacheEntry {
    /// Monotonic insertion order; lower is older.
    fn inserted_seq(&self) -> u64;
}

/// Evict the oldest entries until at most `max_entries` remain.
pub fn prune_cache<K, V>(cache: &DashMap<K, V>, max_entries: usize)
where
    K: Clone + Eq + Hash,
    V: CacheEntry,
{
    if cache.len() <= max_entries {
        return;
    }

    let mut entries: Vec<(K, u64)> = cache
        .iter()
        .map(|entry| (entry.key().clone(), entry.value().inserted_seq()))
        .collect();

    entries.sort_by_key(|(_, seq)| *seq);
    evict_snapshot(cache, entries, max_entries);
}

/// Remove snapshotted entries in order. A key rewritten since the snapshot
/// carries a newer seq and is left alone.
fn evict_snapshot<K, V>(cache: &DashMap<K, V>, entries: Vec<(K, u64)>, max_entries: usize)
where
    K: Eq + Hash,
    V: CacheEntry,
{
    for (key, seq) in entries {
        if cache.len() <= max_entries {
            break;
        }
        cache.remove_if(&key, |_, value| value.inserted_seq() == seq);
    }
}

#[derive(Debug, Clone)]
struct CachedResponse {
    seq: u64,
    response: Arc<ExternalRouteResponse>,
}

impl CacheEntry for CachedResponse {
    fn inserted_seq(&self) -> u64 {
        self.seq
    }
}

/// In-process cache living as long as the process.
///
/// When disabled, `get` always misses and `put` is a no-op. Concurrent misses
/// on one key may both write; the last writer wins.
#[derive(Debug)]
pub struct MemoryRouteCache {
    enabled: bool,
    max_entries: Option<usize>,
    entries: DashMap<CacheKey, CachedResponse>,
    next_seq: AtomicU64,
}

impl MemoryRouteCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            max_entries: None,
            entries: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Cap the number of stored responses, evicting oldest-inserted first.
    pub fn with_max_entries(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryRouteCache {
    fn default() -> Self {
        Self::disabled()
    }
}

impl RouteCache for MemoryRouteCache {
    fn get(&self, key: &CacheKey) -> Option<Arc<ExternalRouteResponse>> {
        if !self.enabled {
            return None;
        }
        self.entries
            .get(key)
            .map(|entry| Arc::clone(&entry.value().response))
    }

    fn put(&self, key: CacheKey, value: Arc<ExternalRouteResponse>) {
        if !self.enabled {
            return;
        }
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(
            key,
            CachedResponse {
                seq,
                response: value,
            },
        );

        if let Some(max_entries) = self.max_entries {
            prune_cache(&self.entries, max_entries);
        }
    }
}
