//! Memoization of derived label styles.

use std::num::NonZeroUsize;

use lru::LruCache;

use super::{derive, DerivedStyle};
use crate::error::InvalidColorError;
use crate::theme::ColorMode;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    color: String,
    mode: ColorMode,
    selected: bool,
}

/// Hit/miss counters for a [`DeriveCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// A bounded, per-instance cache of [`DerivedStyle`]s.
///
/// Entries are keyed on the exact `(color, mode, selected)` triple: `"#999"` and
/// `"#999999"` are distinct keys even though they derive the same style.
/// Parse failures are returned but never cached.
///
/// ```rust
/// use labelkit::{ColorMode, DeriveCache};
///
/// let mut cache = DeriveCache::new();
/// let first = cache.derive("#0969da", ColorMode::Dark, false).unwrap();
/// let second = cache.derive("#0969da", ColorMode::Dark, false).unwrap();
/// assert_eq!(first, second);
/// assert_eq!(cache.stats().hits, 1);
/// ```
#[derive(Debug)]
pub struct DeriveCache {
    entries: LruCache<CacheKey, DerivedStyle>,
    stats: CacheStats,
}

impl DeriveCache {
    /// Capacity used by [`DeriveCache::new`].
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Returns the cached style for the triple, deriving it on a miss.
    pub fn derive(
        &mut self,
        color: &str,
        mode: ColorMode,
        selected: bool,
    ) -> Result<DerivedStyle, InvalidColorError> {
        let key = CacheKey {
            color: color.to_string(),
            mode,
            selected,
        };

        if let Some(hit) = self.entries.get(&key) {
            self.stats.hits += 1;
            tracing::debug!(color, %mode, selected, "derive cache hit");
            return Ok(hit.clone());
        }

        self.stats.misses += 1;
        tracing::debug!(color, %mode, selected, "derive cache miss");

        let style = derive(color, mode, selected)?;
        if let Some((evicted, _)) = self.entries.push(key, style.clone()) {
            tracing::debug!(color = %evicted.color, mode = %evicted.mode, "derive cache eviction");
        }
        Ok(style)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }
}

impl Default for DeriveCache {
    fn default() -> Self {
        Self::new()
    }
}
