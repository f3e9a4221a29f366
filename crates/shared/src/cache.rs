use lru::LruCache;
use std::num::NonZeroUsize;

/// Number of image sources remembered before the oldest request is forgotten.
pub const DEFAULT_PRELOAD_CAPACITY: usize = 50;

/// Bounded record of image sources that have already been requested.
///
/// Entries are never promoted on lookup, so eviction always removes the
/// source that was inserted first.
#[derive(Debug)]
pub struct PreloadCache {
    requested: LruCache<String, ()>,
}

impl PreloadCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            requested: LruCache::new(capacity),
        }
    }

    pub fn contains(&self, src: &str) -> bool {
        self.requested.contains(src)
    }

    /// Records `src` as requested.
    ///
    /// Returns `true` when the source was not known yet and should be fetched.
    pub fn insert(&mut self, src: &str) -> bool {
        if self.requested.contains(src) {
            return false;
        }

        if let Some((evicted, ())) = self.requested.push(src.to_owned(), ()) {
            tracing::trace!("preload cache full, forgetting {evicted}");
        }

        true
    }

    pub fn len(&self) -> usize {
        self.requested.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requested.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.requested.cap().get()
    }

    /// Sources in insertion order, oldest first.
    pub fn sources(&self) -> Vec<&str> {
        self.requested.iter().rev().map(|(src, _)| src.as_str()).collect()
    }
}

impl Default for PreloadCache {
    fn default() -> Self {
        Self::new(DEFAULT_PRELOAD_CAPACITY)
    }
}
