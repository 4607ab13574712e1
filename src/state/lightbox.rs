/// Lightbox navigation state
///
/// The lightbox is either closed or showing one project's image sequence.
/// Navigation wraps around, every index change resets the loaded flag, and
/// neighbouring images are preloaded into a cache that belongs to the
/// current opening of the lightbox.
///
/// Each opening gets a new session number. Load and preload callbacks carry
/// the session they were started in so completions that arrive after the
/// project changed are dropped.

use std::collections::HashSet;

use super::data::ProjectEntry;
use super::pager::Direction;
use crate::media::delivery::{tier_url, ImageTier};

/// Default horizontal drag distance (pixels) that counts as a swipe
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 100.0;

/// Offsets around the current index that are preloaded
const PRELOAD_OFFSETS: [isize; 4] = [-2, -1, 1, 2];

/// Keys the lightbox reacts to while open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Left,
    Right,
    Escape,
}

/// What an input did to the lightbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The current image changed
    Navigated,
    /// The lightbox closed
    Closed,
    /// Nothing changed
    Ignored,
}

#[derive(Debug, Clone)]
struct OpenLightbox {
    project: ProjectEntry,
    index: usize,
    direction: Direction,
    image_loaded: bool,
    displayed_url: String,
    preloaded: HashSet<String>,
    pending: HashSet<String>,
}

#[derive(Debug, Clone)]
pub struct LightboxNavigator {
    open: Option<OpenLightbox>,
    session: u64,
    swipe_threshold: f32,
    placeholder_url: String,
}

impl LightboxNavigator {
    pub fn new(swipe_threshold: f32, placeholder_url: impl Into<String>) -> Self {
        Self {
            open: None,
            session: 0,
            swipe_threshold,
            placeholder_url: placeholder_url.into(),
        }
    }

    /// Open the lightbox on `project`, starting at its first image with an
    /// empty preload cache. Returns the new session number.
    pub fn open(&mut self, project: ProjectEntry) -> u64 {
        self.session += 1;

        tracing::info!(
            project = %project.name,
            images = project.image_count,
            session = self.session,
            "🖼️  Opening lightbox"
        );

        let displayed_url = project
            .image_url(0)
            .map(|url| tier_url(url, ImageTier::Lightbox))
            .unwrap_or_default();

        self.open = Some(OpenLightbox {
            project,
            index: 0,
            direction: Direction::None,
            image_loaded: false,
            displayed_url,
            preloaded: HashSet::new(),
            pending: HashSet::new(),
        });

        self.session
    }

    pub fn close(&mut self) {
        if self.open.take().is_some() {
            tracing::debug!(session = self.session, "Lightbox closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn project(&self) -> Option<&ProjectEntry> {
        self.open.as_ref().map(|open| &open.project)
    }

    pub fn index(&self) -> usize {
        self.open.as_ref().map_or(0, |open| open.index)
    }

    pub fn direction(&self) -> Direction {
        self.open.as_ref().map_or(Direction::None, |open| open.direction)
    }

    pub fn is_image_loaded(&self) -> bool {
        self.open.as_ref().is_some_and(|open| open.image_loaded)
    }

    /// URL currently shown: the lightbox tier of the current image, or the
    /// fallback after a failed load
    pub fn displayed_url(&self) -> Option<&str> {
        self.open
            .as_ref()
            .map(|open| open.displayed_url.as_str())
            .filter(|url| !url.is_empty())
    }

    #[cfg(test)]
    pub fn is_preloaded(&self, url: &str) -> bool {
        self.open
            .as_ref()
            .is_some_and(|open| open.preloaded.contains(url))
    }

    /// Whether `url` is a preload still in flight
    pub fn is_pending(&self, url: &str) -> bool {
        self.open.as_ref().is_some_and(|open| open.pending.contains(url))
    }

    fn image_count(&self) -> usize {
        self.open.as_ref().map_or(0, |open| open.project.images.len())
    }

    /// Advance to the next image, wrapping to the first
    pub fn next(&mut self) -> bool {
        let count = self.image_count();
        if count == 0 {
            return false;
        }
        let target = (self.index() + 1) % count;
        self.move_to(target, Direction::Forward)
    }

    /// Go back to the previous image, wrapping to the last
    pub fn previous(&mut self) -> bool {
        let count = self.image_count();
        if count == 0 {
            return false;
        }
        let target = (self.index() + count - 1) % count;
        self.move_to(target, Direction::Backward)
    }

    /// Jump straight to `target`. Jumping to the current image or past the
    /// end changes nothing.
    pub fn jump_to(&mut self, target: usize) -> bool {
        let current = self.index();
        if !self.is_open() || target == current || target >= self.image_count() {
            return false;
        }

        let direction = if target > current {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.move_to(target, direction)
    }

    /// Thumbnail strip "previous" button: one step back, no wrap
    pub fn step_back(&mut self) -> bool {
        self.jump_to(self.index().saturating_sub(1))
    }

    /// Thumbnail strip "next" button: one step forward, no wrap
    pub fn step_forward(&mut self) -> bool {
        let last = self.image_count().saturating_sub(1);
        self.jump_to((self.index() + 1).min(last))
    }

    /// Interpret the horizontal offset of a finished drag.
    /// Dragging right goes back, dragging left goes forward.
    pub fn swipe(&mut self, offset_x: f32) -> bool {
        if offset_x > self.swipe_threshold {
            self.previous()
        } else if offset_x < -self.swipe_threshold {
            self.next()
        } else {
            false
        }
    }

    pub fn handle_key(&mut self, key: LightboxKey) -> Outcome {
        if !self.is_open() {
            return Outcome::Ignored;
        }

        let navigated = match key {
            LightboxKey::Left => self.previous(),
            LightboxKey::Right => self.next(),
            LightboxKey::Escape => {
                self.close();
                return Outcome::Closed;
            }
        };

        if navigated {
            Outcome::Navigated
        } else {
            Outcome::Ignored
        }
    }

    fn move_to(&mut self, target: usize, direction: Direction) -> bool {
        let Some(open) = self.open.as_mut() else {
            return false;
        };

        open.index = target;
        open.direction = direction;
        open.image_loaded = false;
        open.displayed_url = open
            .project
            .image_url(target)
            .map(|url| tier_url(url, ImageTier::Lightbox))
            .unwrap_or_default();

        tracing::debug!(index = target, direction = direction.as_sign(), "Lightbox navigated");
        true
    }

    fn is_current(&self, session: u64, index: usize) -> bool {
        session == self.session && self.is_open() && self.index() == index
    }

    /// The current image finished loading
    pub fn image_loaded(&mut self, session: u64, index: usize) {
        if !self.is_current(session, index) {
            return;
        }
        if let Some(open) = self.open.as_mut() {
            open.image_loaded = true;
        }
    }

    /// The current image failed to load. The displayed URL falls back to the
    /// project cover, or the placeholder when there is no cover, and the
    /// loaded flag is forced so the spinner never hangs.
    ///
    /// Returns the fallback URL, or `None` for a stale callback.
    pub fn image_failed(&mut self, session: u64, index: usize) -> Option<String> {
        if !self.is_current(session, index) {
            return None;
        }

        let placeholder = self.placeholder_url.clone();
        let open = self.open.as_mut()?;

        let fallback = if open.project.cover_image.is_empty() {
            placeholder
        } else {
            open.project.cover_image.clone()
        };

        tracing::warn!(
            project = %open.project.name,
            index,
            fallback = %fallback,
            "Image failed to load, showing fallback"
        );

        open.displayed_url = fallback.clone();
        open.image_loaded = true;
        Some(fallback)
    }

    /// Neighbour URLs (two on each side, wrapping) that still need fetching.
    /// Returned URLs are marked in flight until `preload_finished`.
    pub fn preload_targets(&mut self) -> Vec<String> {
        let Some(open) = self.open.as_mut() else {
            return Vec::new();
        };

        let count = open.project.images.len();
        if count == 0 {
            return Vec::new();
        }

        let mut targets = Vec::new();
        for offset in PRELOAD_OFFSETS {
            let normalized = (open.index as isize + offset).rem_euclid(count as isize) as usize;
            let Some(url) = open.project.image_url(normalized) else {
                continue;
            };
            if url.is_empty() {
                continue;
            }

            let url = tier_url(url, ImageTier::Lightbox);
            if open.preloaded.contains(&url) || open.pending.contains(&url) {
                continue;
            }

            open.pending.insert(url.clone());
            targets.push(url);
        }

        targets
    }

    /// Record the outcome of a preload. Failures are dropped silently and
    /// may be requested again later.
    pub fn preload_finished(&mut self, session: u64, url: &str, succeeded: bool) {
        if session != self.session {
            return;
        }
        let Some(open) = self.open.as_mut() else {
            return;
        };

        open.pending.remove(url);
        if succeeded {
            open.preloaded.insert(url.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::ImageRef;

    const PLACEHOLDER: &str = "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto,w_800/sample";

    fn project(image_count: usize, cover: &str) -> ProjectEntry {
        let images = (0..image_count)
            .map(|i| ImageRef {
                url: format!("https://cdn.example/upload/p/{i}.jpg"),
            })
            .collect();

        ProjectEntry {
            id: 1,
            name: "Gökçe Vital".to_string(),
            folder: "Gökçe Vital".to_string(),
            folder_path: "projeler/Gökçe Vital".to_string(),
            cover_image: cover.to_string(),
            images,
            image_count,
        }
    }

    fn lightbox_url(i: usize) -> String {
        format!("https://cdn.example/upload/f_webp,q_90,w_1600/p/{i}.jpg")
    }

    fn open_with(image_count: usize) -> LightboxNavigator {
        let mut lightbox = LightboxNavigator::new(DEFAULT_SWIPE_THRESHOLD, PLACEHOLDER);
        lightbox.open(project(image_count, "https://cdn.example/cover.jpg"));
        lightbox
    }

    #[test]
    fn test_open_initial_state() {
        let lightbox = open_with(5);
        assert!(lightbox.is_open());
        assert_eq!(lightbox.index(), 0);
        assert_eq!(lightbox.direction(), Direction::None);
        assert!(!lightbox.is_image_loaded());
        assert_eq!(lightbox.displayed_url(), Some(lightbox_url(0).as_str()));
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut lightbox = open_with(5);
        assert!(lightbox.previous());
        assert_eq!(lightbox.index(), 4);
        assert_eq!(lightbox.direction(), Direction::Backward);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut lightbox = open_with(7);
        lightbox.jump_to(3);

        for _ in 0..7 {
            lightbox.next();
        }
        assert_eq!(lightbox.index(), 3);

        for _ in 0..7 {
            lightbox.previous();
        }
        assert_eq!(lightbox.index(), 3);
    }

    #[test]
    fn test_navigation_resets_loaded_flag() {
        let mut lightbox = open_with(3);
        let session = lightbox.session();
        lightbox.image_loaded(session, 0);
        assert!(lightbox.is_image_loaded());

        lightbox.next();
        assert!(!lightbox.is_image_loaded());
        assert_eq!(lightbox.direction(), Direction::Forward);
    }

    #[test]
    fn test_jump_to_current_is_noop() {
        let mut lightbox = open_with(5);
        let session = lightbox.session();
        lightbox.next();
        lightbox.image_loaded(session, 1);

        assert!(!lightbox.jump_to(1));
        assert_eq!(lightbox.direction(), Direction::Forward);
        assert!(lightbox.is_image_loaded());
    }

    #[test]
    fn test_jump_sets_direction() {
        let mut lightbox = open_with(10);
        assert!(lightbox.jump_to(6));
        assert_eq!(lightbox.direction(), Direction::Forward);
        assert!(lightbox.jump_to(2));
        assert_eq!(lightbox.direction(), Direction::Backward);
        assert!(!lightbox.jump_to(10));
        assert_eq!(lightbox.index(), 2);
    }

    #[test]
    fn test_steps_do_not_wrap() {
        let mut lightbox = open_with(3);
        assert!(!lightbox.step_back());
        assert_eq!(lightbox.index(), 0);

        assert!(lightbox.step_forward());
        assert!(lightbox.step_forward());
        assert!(!lightbox.step_forward());
        assert_eq!(lightbox.index(), 2);
    }

    #[test]
    fn test_empty_project_is_inert() {
        let mut lightbox = open_with(0);
        assert!(!lightbox.next());
        assert!(!lightbox.previous());
        assert!(!lightbox.jump_to(0));
        assert!(!lightbox.step_forward());
        assert!(!lightbox.swipe(-500.0));
        assert!(lightbox.preload_targets().is_empty());
        assert_eq!(lightbox.displayed_url(), None);
        assert_eq!(lightbox.index(), 0);
    }

    #[test]
    fn test_swipe_threshold() {
        let mut lightbox = open_with(5);
        assert!(!lightbox.swipe(99.0));
        assert!(!lightbox.swipe(-100.0));
        assert_eq!(lightbox.index(), 0);

        assert!(lightbox.swipe(101.0));
        assert_eq!(lightbox.index(), 4);
        assert!(lightbox.swipe(-150.0));
        assert_eq!(lightbox.index(), 0);
    }

    #[test]
    fn test_keys() {
        let mut lightbox = open_with(4);
        assert_eq!(lightbox.handle_key(LightboxKey::Right), Outcome::Navigated);
        assert_eq!(lightbox.index(), 1);
        assert_eq!(lightbox.handle_key(LightboxKey::Left), Outcome::Navigated);
        assert_eq!(lightbox.index(), 0);
        assert_eq!(lightbox.handle_key(LightboxKey::Escape), Outcome::Closed);
        assert!(!lightbox.is_open());
        assert_eq!(lightbox.handle_key(LightboxKey::Right), Outcome::Ignored);
    }

    #[test]
    fn test_failed_image_falls_back_to_cover() {
        let mut lightbox = open_with(5);
        let session = lightbox.session();
        lightbox.jump_to(2);

        let fallback = lightbox.image_failed(session, 2);
        assert_eq!(fallback.as_deref(), Some("https://cdn.example/cover.jpg"));
        assert!(lightbox.is_image_loaded());
        assert_eq!(lightbox.displayed_url(), Some("https://cdn.example/cover.jpg"));
    }

    #[test]
    fn test_failed_image_without_cover_uses_placeholder() {
        let mut lightbox = LightboxNavigator::new(DEFAULT_SWIPE_THRESHOLD, PLACEHOLDER);
        let session = lightbox.open(project(5, ""));
        lightbox.jump_to(2);

        assert_eq!(lightbox.image_failed(session, 2).as_deref(), Some(PLACEHOLDER));
        assert_eq!(lightbox.displayed_url(), Some(PLACEHOLDER));
        assert!(lightbox.is_image_loaded());
    }

    #[test]
    fn test_stale_load_callbacks_are_ignored() {
        let mut lightbox = open_with(5);
        let old_session = lightbox.session();
        lightbox.next();

        // Index no longer current
        lightbox.image_loaded(old_session, 0);
        assert!(!lightbox.is_image_loaded());

        // Session replaced by reopening
        lightbox.open(project(5, ""));
        assert_eq!(lightbox.image_failed(old_session, 0), None);
        assert!(!lightbox.is_image_loaded());
    }

    #[test]
    fn test_preload_targets_wrap_and_dedupe() {
        let mut lightbox = open_with(10);
        let targets = lightbox.preload_targets();
        assert_eq!(
            targets,
            vec![lightbox_url(8), lightbox_url(9), lightbox_url(1), lightbox_url(2)]
        );

        // In flight, so not requested twice
        assert!(lightbox.preload_targets().is_empty());

        // Three images: offsets collapse onto indices 1 and 2
        let mut small = open_with(3);
        assert_eq!(small.preload_targets(), vec![lightbox_url(1), lightbox_url(2)]);
    }

    #[test]
    fn test_preload_cache_records_successes_only() {
        let mut lightbox = open_with(10);
        let session = lightbox.session();
        let targets = lightbox.preload_targets();

        lightbox.preload_finished(session, &targets[0], true);
        lightbox.preload_finished(session, &targets[1], false);
        assert!(lightbox.is_preloaded(&targets[0]));
        assert!(!lightbox.is_preloaded(&targets[1]));

        // Failed preload can be retried on the next index change
        lightbox.next();
        let retry = lightbox.preload_targets();
        assert!(retry.contains(&targets[1]));
        assert!(!retry.contains(&targets[0]));
    }

    #[test]
    fn test_reopen_clears_preload_cache() {
        let mut lightbox = open_with(10);
        let session = lightbox.session();
        let targets = lightbox.preload_targets();
        lightbox.preload_finished(session, &targets[0], true);

        lightbox.open(project(10, ""));
        assert!(!lightbox.is_preloaded(&targets[0]));

        // Completion from the previous session lands nowhere
        lightbox.preload_finished(session, &targets[1], true);
        assert!(!lightbox.is_preloaded(&targets[1]));
    }
}
