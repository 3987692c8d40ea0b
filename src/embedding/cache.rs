//! Bounded in-memory embedding cache.
//!
//! Keyed by a BLAKE3 hash of `(tier, prefix, text)` so the same text cached
//! for one tier or usage never shadows another. Capacity-bounded with LRU
//! eviction; an unbounded map would grow with every distinct text embedded
//! over the process lifetime.

use moka::sync::Cache;
use std::sync::Arc;

use crate::constants::DEFAULT_CACHE_CAPACITY;
use crate::embedding::vector::EmbeddingVector;

/// Capacity-bounded cache of finished embeddings.
///
/// The cache itself is policy-free: callers decide what is worth keeping.
/// Tier clients only insert genuine vectors, so a degraded fallback never
/// outlives the outage that produced it.
pub struct VectorCache {
    entries: Cache<[u8; 32], EmbeddingVector>,
}

impl VectorCache {
    /// Creates a cache with the default capacity.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache with a max entry capacity (LRU eviction).
    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Looks up an entry by a precomputed request key.
    #[inline]
    pub fn lookup(&self, key: &[u8; 32]) -> Option<EmbeddingVector> {
        self.entries.get(key)
    }

    /// Inserts a key → vector mapping.
    #[inline]
    pub fn insert(&self, key: [u8; 32], vector: EmbeddingVector) {
        self.entries.insert(key, vector);
    }

    /// Removes an entry by key.
    #[inline]
    pub fn remove(&self, key: &[u8; 32]) -> Option<EmbeddingVector> {
        self.entries.remove(key)
    }

    /// Returns the number of cached entries.
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Returns `true` if the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    /// Clears all entries.
    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Returns `true` if the cache contains the given key.
    #[inline]
    pub fn contains(&self, key: &[u8; 32]) -> bool {
        self.entries.contains_key(key)
    }

    /// Runs any pending maintenance tasks in the underlying cache.
    #[inline]
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}

impl Default for VectorCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VectorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

#[derive(Clone)]
/// Shared handle to a [`VectorCache`].
pub struct VectorCacheHandle {
    inner: Arc<VectorCache>,
}

impl VectorCacheHandle {
    /// Creates a new handle with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(VectorCache::new()),
        }
    }

    /// Creates a new handle with a specific capacity.
    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            inner: Arc::new(VectorCache::with_capacity(capacity)),
        }
    }

    /// Looks up an entry by key.
    #[inline]
    pub fn lookup(&self, key: &[u8; 32]) -> Option<EmbeddingVector> {
        self.inner.lookup(key)
    }

    /// Inserts a key → vector mapping.
    #[inline]
    pub fn insert(&self, key: [u8; 32], vector: EmbeddingVector) {
        self.inner.insert(key, vector);
    }

    /// Removes an entry by key.
    #[inline]
    pub fn remove(&self, key: &[u8; 32]) -> Option<EmbeddingVector> {
        self.inner.remove(key)
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> u64 {
        self.inner.len()
    }

    /// Returns `true` if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Clears all entries.
    #[inline]
    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Returns `true` if the cache contains the given key.
    #[inline]
    pub fn contains(&self, key: &[u8; 32]) -> bool {
        self.inner.contains(key)
    }

    /// Runs any pending maintenance tasks.
    #[inline]
    pub fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks();
    }

    /// Returns the number of strong references to the underlying cache.
    #[inline]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl Default for VectorCacheHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VectorCacheHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorCacheHandle")
            .field("strong_count", &self.strong_count())
            .finish()
    }
}
