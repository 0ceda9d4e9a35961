use std::time::{Duration, Instant};

use indexmap::IndexMap;

use crate::model::{CacheKey, RenderMetadata};

pub const DEFAULT_CAPACITY: usize = 50;
pub const DEFAULT_TTL: Duration = Duration::from_millis(300_000);

/// A cached render, owned exclusively by [`ResultCache`].
///
/// `get` hands out clones, so callers can never mutate a stored entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub output: String,
    /// Creation or last-refresh instant; the TTL is measured from here.
    pub timestamp: Instant,
    pub metadata: RenderMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub size: usize,
    /// hits / total requests, in `[0, 1]`; `0.0` before any request.
    pub hit_rate: f64,
    pub total_requests: u64,
}

/// Bounded key→result store with LRU-on-access ordering and absolute TTL
/// expiry.
///
/// The map's iteration order doubles as the recency order: index 0 is the
/// least-recently-used entry. Both `get` and `set` reinsert at the back, so
/// eviction reflects actual read/write recency, not just insertion order.
/// Expiry is enforced lazily on `get`; there is no background sweep.
#[derive(Debug)]
pub struct ResultCache {
    entries: IndexMap<CacheKey, CacheEntry>,
    capacity: usize,
    ttl: Duration,
    hits: u64,
    misses: u64,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::with_capacity_and_ttl(DEFAULT_CAPACITY, DEFAULT_TTL)
    }

    pub fn with_capacity_and_ttl(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: IndexMap::new(),
            capacity,
            ttl,
            hits: 0,
            misses: 0,
        }
    }

    /// Looks up a live entry, bumping it to most-recently-used.
    ///
    /// An expired entry is removed and reported absent.
    pub fn get(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        let Some(entry) = self.entries.shift_remove(key) else {
            self.misses += 1;
            return None;
        };
        if entry.timestamp.elapsed() >= self.ttl {
            // Already removed above; lazy expiry just reports absence.
            self.misses += 1;
            return None;
        }

        self.hits += 1;
        self.entries.insert(key.clone(), entry.clone());
        Some(entry)
    }

    /// Inserts or refreshes an entry (full replace, not merge), evicting the
    /// least-recently-used entry first when a new key would exceed capacity.
    pub fn set(&mut self, key: CacheKey, output: String, metadata: RenderMetadata) {
        if self.entries.shift_remove(&key).is_none()
            && self.entries.len() >= self.capacity
            && self.capacity > 0
        {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(
            key,
            CacheEntry {
                output,
                timestamp: Instant::now(),
                metadata,
            },
        );
    }

    /// Drops a single entry. Returns whether it was present.
    pub fn remove(&mut self, key: &CacheKey) -> bool {
        self.entries.shift_remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Genuine hit/miss accounting over the cache's lifetime; counters are
    /// not reset by `clear` or `remove`.
    pub fn stats(&self) -> CacheStats {
        let total = self.hits + self.misses;
        CacheStats {
            size: self.entries.len(),
            hit_rate: if total == 0 {
                0.0
            } else {
                self.hits as f64 / total as f64
            },
            total_requests: total,
        }
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}
