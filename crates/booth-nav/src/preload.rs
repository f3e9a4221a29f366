use shared::PreloadCache;

use crate::slides::SlideList;

/// Decides which neighbouring slide images to fetch ahead of time.
#[derive(Debug, Default)]
pub struct PreloadManager {
    cache: PreloadCache,
}

impl PreloadManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: PreloadCache::new(capacity),
        }
    }

    pub fn cache(&self) -> &PreloadCache {
        &self.cache
    }

    /// Sources around `index` (current, next, previous; wrapping) that have
    /// not been requested yet. They are recorded as requested.
    pub fn plan(&mut self, slides: &SlideList, index: usize) -> Vec<String> {
        let mut requests = Vec::new();

        for idx in neighbours(index, slides.len()) {
            let Some(src) = slides.get(idx).and_then(|slide| slide.src()) else {
                continue;
            };

            if self.cache.insert(src) {
                requests.push(src.to_owned());
            }
        }

        requests
    }
}

/// Current, next and previous indices with wrap-around, without duplicates.
pub fn neighbours(index: usize, total: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }

    let current = index.min(total - 1);
    let next = (current + 1) % total;
    let prev = (current + total - 1) % total;

    let mut indices = vec![current];
    for idx in [next, prev] {
        if !indices.contains(&idx) {
            indices.push(idx);
        }
    }
    indices
}
