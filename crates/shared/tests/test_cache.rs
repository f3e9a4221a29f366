#[cfg(test)]
mod tests {
    use shared::cache::{DEFAULT_PRELOAD_CAPACITY, PreloadCache};

    #[test]
    fn test_cache_never_exceeds_capacity() {
        let mut cache = PreloadCache::default();

        for i in 0..200 {
            cache.insert(&format!("slide-{i}.jpg"));
            assert!(cache.len() <= DEFAULT_PRELOAD_CAPACITY);
        }

        assert_eq!(cache.len(), DEFAULT_PRELOAD_CAPACITY);
    }

    #[test]
    fn test_fifty_first_insert_evicts_oldest() {
        let mut cache = PreloadCache::new(50);

        for i in 0..50 {
            cache.insert(&format!("slide-{i}.jpg"));
        }
        assert!(cache.contains("slide-0.jpg"));

        cache.insert("slide-50.jpg");

        assert_eq!(cache.len(), 50);
        assert!(!cache.contains("slide-0.jpg"));
        assert!(cache.contains("slide-1.jpg"));
        assert!(cache.contains("slide-50.jpg"));
    }

    #[test]
    fn test_repeat_request_does_not_refresh_position() {
        let mut cache = PreloadCache::new(3);

        cache.insert("a.jpg");
        cache.insert("b.jpg");
        cache.insert("c.jpg");

        // Asking again for the oldest entry must not save it from eviction
        assert!(!cache.insert("a.jpg"));
        cache.insert("d.jpg");

        assert!(!cache.contains("a.jpg"));
        assert_eq!(cache.sources(), vec!["b.jpg", "c.jpg", "d.jpg"]);
    }
}
