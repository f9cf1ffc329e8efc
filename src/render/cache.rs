//! Bounded LRU cache of per-page display lists
//!
//! Deriving a display list from page content is the expensive step of
//! rendering; rasterizing an existing list is cheap. The cache therefore
//! memoizes the list, never the bitmap: repeat visits and zoom toggles on a
//! page skip the parse without pinning pixel data in memory.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

/// Memoizing LRU keyed by 0-based page index.
///
/// Generic over the cached value so the memoization contract can be tested
/// without a PDF engine; in production `T` is `mupdf::DisplayList`.
pub struct DisplayListCache<T> {
    entries: LruCache<usize, Arc<T>>,
}

impl<T> DisplayListCache<T> {
    /// Create a cache holding at most `capacity` display lists.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).expect("1 is non-zero")),
            ),
        }
    }

    /// Look up the handle for a page, deriving it with `loader` on first
    /// use. While an entry is resident it is returned unchanged and
    /// promoted in LRU order; `loader` runs at most once per resident page.
    pub fn get_or_create<E>(
        &mut self,
        page: usize,
        loader: impl FnOnce() -> Result<T, E>,
    ) -> Result<Arc<T>, E> {
        if let Some(hit) = self.entries.get(&page) {
            return Ok(Arc::clone(hit));
        }

        let handle = Arc::new(loader()?);
        self.entries.put(page, Arc::clone(&handle));
        Ok(handle)
    }

    /// Check whether a page is resident without promoting it.
    #[must_use]
    pub fn contains(&self, page: usize) -> bool {
        self.entries.contains(&page)
    }

    /// Number of resident display lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cache capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}
