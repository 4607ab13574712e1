use iced::widget::image::Handle;
use std::collections::{HashMap, HashSet};

/// Decoded image handles keyed by delivery URL, plus the URLs already in flight
#[derive(Debug, Default)]
pub struct HandleCache {
    handles: HashMap<String, Handle>,
    requested: HashSet<String>,
}

impl HandleCache {
    pub fn get(&self, url: &str) -> Option<&Handle> {
        self.handles.get(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.handles.contains_key(url)
    }

    /// Mark `url` as requested. Returns false when it is cached or already
    /// in flight, i.e. when the caller should not fetch it.
    pub fn request(&mut self, url: &str) -> bool {
        if url.is_empty() || self.handles.contains_key(url) {
            return false;
        }
        self.requested.insert(url.to_string())
    }

    pub fn insert(&mut self, url: String, handle: Handle) {
        self.requested.remove(&url);
        self.handles.insert(url, handle);
    }

    /// Forget a failed request so it can be retried later
    pub fn failed(&mut self, url: &str) {
        self.requested.remove(url);
    }

    pub fn clear(&mut self) {
        self.handles.clear();
        self.requested.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_once_until_failed() {
        let mut cache = HandleCache::default();
        assert!(cache.request("https://cdn.example/a.jpg"));
        assert!(!cache.request("https://cdn.example/a.jpg"));

        cache.failed("https://cdn.example/a.jpg");
        assert!(cache.request("https://cdn.example/a.jpg"));
    }

    #[test]
    fn test_cached_urls_are_not_requested() {
        let mut cache = HandleCache::default();
        cache.insert(
            "https://cdn.example/a.jpg".to_string(),
            Handle::from_bytes(vec![0u8; 4]),
        );
        assert!(cache.contains("https://cdn.example/a.jpg"));
        assert!(!cache.request("https://cdn.example/a.jpg"));
        assert!(!cache.request(""));

        cache.clear();
        assert!(cache.get("https://cdn.example/a.jpg").is_none());
    }
}
