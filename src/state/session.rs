/// Image loading for one opening of the lightbox
///
/// Pairs the navigator with the cache of full-size images fetched while it
/// is open. After every navigation the session says which URLs still need
/// fetching; every fetch result is fed back through `image_fetched`, which
/// keeps the loaded flag and the preload bookkeeping consistent. The cache
/// is dropped whenever the lightbox opens or closes.

use iced::widget::image::Handle;

use super::data::ProjectEntry;
use super::lightbox::LightboxNavigator;
use crate::media::cache::HandleCache;

#[derive(Debug)]
pub struct LightboxSession {
    navigator: LightboxNavigator,
    images: HandleCache,
}

impl LightboxSession {
    pub fn new(navigator: LightboxNavigator) -> Self {
        Self {
            navigator,
            images: HandleCache::default(),
        }
    }

    pub fn navigator(&self) -> &LightboxNavigator {
        &self.navigator
    }

    /// Navigation goes through here; call `after_navigation` when it moved
    pub fn navigator_mut(&mut self) -> &mut LightboxNavigator {
        &mut self.navigator
    }

    pub fn images(&self) -> &HandleCache {
        &self.images
    }

    /// Open on `project` with an empty cache. Returns the URLs to fetch.
    pub fn open(&mut self, project: ProjectEntry) -> Vec<String> {
        self.images.clear();
        self.navigator.open(project);
        self.after_navigation()
    }

    pub fn close(&mut self) {
        self.navigator.close();
        self.images.clear();
    }

    /// Settle the new current image and queue its neighbours.
    ///
    /// A cached current image is marked loaded straight away. One that is
    /// already in flight as a preload is left alone: its result resolves it.
    pub fn after_navigation(&mut self) -> Vec<String> {
        let session = self.navigator.session();
        let index = self.navigator.index();
        let mut wanted = Vec::new();

        if let Some(url) = self.navigator.displayed_url().map(str::to_string) {
            if self.images.contains(&url) {
                self.navigator.image_loaded(session, index);
            } else if self.images.request(&url) {
                wanted.push(url);
            }
        }

        for url in self.navigator.preload_targets() {
            if self.images.contains(&url) {
                self.navigator.preload_finished(session, &url, true);
            } else if self.images.request(&url) {
                wanted.push(url);
            }
        }

        wanted
    }

    /// Record a fetch result (`None` for a failure) started in `session`.
    ///
    /// Returns a fallback URL to fetch when the current image failed and its
    /// fallback is neither cached here nor in `shared`.
    pub fn image_fetched(
        &mut self,
        session: u64,
        url: String,
        handle: Option<Handle>,
        shared: &HandleCache,
    ) -> Option<String> {
        if session != self.navigator.session() || !self.navigator.is_open() {
            tracing::debug!("Dropping image from closed session: {}", url);
            return None;
        }

        let succeeded = handle.is_some();
        if self.navigator.is_pending(&url) {
            self.navigator.preload_finished(session, &url, succeeded);
        }

        match handle {
            Some(handle) => self.images.insert(url.clone(), handle),
            None => self.images.failed(&url),
        }

        self.resolve_current(&url, succeeded, shared)
    }

    /// Settle the loaded flag if `url` is what the lightbox is waiting for
    fn resolve_current(
        &mut self,
        url: &str,
        succeeded: bool,
        shared: &HandleCache,
    ) -> Option<String> {
        if self.navigator.is_image_loaded() || self.navigator.displayed_url() != Some(url) {
            return None;
        }

        let session = self.navigator.session();
        let index = self.navigator.index();

        if succeeded {
            self.navigator.image_loaded(session, index);
            return None;
        }

        let fallback = self.navigator.image_failed(session, index)?;
        let cached = shared.contains(&fallback) || self.images.contains(&fallback);
        if !cached && self.images.request(&fallback) {
            Some(fallback)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::delivery::{tier_url, ImageTier};
    use crate::state::data::ImageRef;

    const COVER: &str = "https://cdn.example/upload/f_webp,q_100,w_600,c_fill/p/cover.jpg";
    const PLACEHOLDER: &str = "https://cdn.example/upload/sample";

    fn project(image_count: usize, cover: &str) -> ProjectEntry {
        let images = (0..image_count)
            .map(|i| ImageRef {
                url: format!("https://cdn.example/upload/p/{i}.jpg"),
            })
            .collect();

        ProjectEntry {
            id: 1,
            name: "Çayırova Rezidans".to_string(),
            folder: "Çayırova Rezidans".to_string(),
            folder_path: "projeler/Çayırova Rezidans".to_string(),
            cover_image: cover.to_string(),
            images,
            image_count,
        }
    }

    fn full(index: usize) -> String {
        tier_url(&format!("https://cdn.example/upload/p/{index}.jpg"), ImageTier::Lightbox)
    }

    fn handle() -> Option<Handle> {
        Some(Handle::from_bytes(vec![0u8; 8]))
    }

    fn session() -> LightboxSession {
        LightboxSession::new(LightboxNavigator::new(100.0, PLACEHOLDER))
    }

    #[test]
    fn test_open_requests_current_and_neighbours() {
        let mut viewer = session();
        let wanted = viewer.open(project(6, COVER));

        assert_eq!(wanted[0], full(0));
        for index in [1, 2, 4, 5] {
            assert!(wanted.contains(&full(index)), "missing {index}");
        }
        assert!(!viewer.navigator().is_image_loaded());
    }

    #[test]
    fn test_current_image_success_marks_loaded() {
        let mut viewer = session();
        let shared = HandleCache::default();
        viewer.open(project(6, COVER));
        let id = viewer.navigator().session();

        assert_eq!(viewer.image_fetched(id, full(0), handle(), &shared), None);
        assert!(viewer.navigator().is_image_loaded());
        assert!(viewer.images().contains(&full(0)));
    }

    #[test]
    fn test_navigating_onto_inflight_preload_resolves_on_arrival() {
        let mut viewer = session();
        let shared = HandleCache::default();
        viewer.open(project(6, COVER));
        let id = viewer.navigator().session();

        assert!(viewer.navigator_mut().next());
        let wanted = viewer.after_navigation();
        // Already in flight as a preload, so not fetched twice
        assert!(!wanted.contains(&full(1)));
        assert!(!viewer.navigator().is_image_loaded());

        viewer.image_fetched(id, full(1), handle(), &shared);
        assert!(viewer.navigator().is_image_loaded());
        assert!(!viewer.navigator().is_pending(&full(1)));
    }

    #[test]
    fn test_cached_preload_is_loaded_immediately() {
        let mut viewer = session();
        let shared = HandleCache::default();
        viewer.open(project(6, COVER));
        let id = viewer.navigator().session();
        viewer.image_fetched(id, full(1), handle(), &shared);
        assert!(viewer.navigator().is_preloaded(&full(1)));

        assert!(viewer.navigator_mut().next());
        let wanted = viewer.after_navigation();
        assert!(!wanted.contains(&full(1)));
        assert!(viewer.navigator().is_image_loaded());
    }

    #[test]
    fn test_failed_current_image_falls_back_to_cover() {
        let mut viewer = session();
        let shared = HandleCache::default();
        viewer.open(project(6, COVER));
        let id = viewer.navigator().session();

        let fallback = viewer.image_fetched(id, full(0), None, &shared);
        assert_eq!(fallback.as_deref(), Some(COVER));
        assert_eq!(viewer.navigator().displayed_url(), Some(COVER));
        assert!(viewer.navigator().is_image_loaded());
    }

    #[test]
    fn test_fallback_already_shared_is_not_fetched() {
        let mut viewer = session();
        let mut shared = HandleCache::default();
        shared.insert(COVER.to_string(), Handle::from_bytes(vec![1u8; 8]));
        viewer.open(project(6, COVER));
        let id = viewer.navigator().session();

        assert_eq!(viewer.image_fetched(id, full(0), None, &shared), None);
        assert_eq!(viewer.navigator().displayed_url(), Some(COVER));
        assert!(viewer.navigator().is_image_loaded());
    }

    #[test]
    fn test_missing_cover_falls_back_to_placeholder() {
        let mut viewer = session();
        let shared = HandleCache::default();
        viewer.open(project(3, ""));
        let id = viewer.navigator().session();

        let fallback = viewer.image_fetched(id, full(0), None, &shared);
        assert_eq!(fallback.as_deref(), Some(PLACEHOLDER));
    }

    #[test]
    fn test_result_from_previous_session_is_dropped() {
        let mut viewer = session();
        let shared = HandleCache::default();
        viewer.open(project(6, COVER));
        let stale = viewer.navigator().session();

        viewer.close();
        viewer.open(project(6, COVER));
        assert_ne!(viewer.navigator().session(), stale);

        assert_eq!(viewer.image_fetched(stale, full(0), handle(), &shared), None);
        assert!(!viewer.navigator().is_image_loaded());
        assert!(!viewer.images().contains(&full(0)));
    }

    #[test]
    fn test_failed_preload_can_be_requested_again() {
        let mut viewer = session();
        let shared = HandleCache::default();
        viewer.open(project(6, COVER));
        let id = viewer.navigator().session();

        viewer.image_fetched(id, full(2), None, &shared);
        assert!(!viewer.navigator().is_pending(&full(2)));

        assert!(viewer.navigator_mut().next());
        let wanted = viewer.after_navigation();
        assert!(wanted.contains(&full(2)));
    }

    #[test]
    fn test_close_drops_cache() {
        let mut viewer = session();
        let shared = HandleCache::default();
        viewer.open(project(2, COVER));
        let id = viewer.navigator().session();
        viewer.image_fetched(id, full(0), handle(), &shared);

        viewer.close();
        assert!(!viewer.navigator().is_open());
        assert!(!viewer.images().contains(&full(0)));
    }
}
