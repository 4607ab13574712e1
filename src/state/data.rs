/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the catalog loader and the UI layer.

use serde::Deserialize;

/// A single image belonging to a project
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageRef {
    /// Delivery URL (opaque, rewritten per tier by `media::delivery`)
    pub url: String,
}

/// Represents a single project in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectEntry {
    /// Sequential ID (position in the catalog, starting at 1)
    pub id: usize,
    /// Display name (curated fix or the raw folder name)
    pub name: String,
    /// Source folder name, used for classification
    pub folder: String,
    /// Full folder path from the asset pipeline
    pub folder_path: String,
    /// Cover image URL, already rewritten to the cover tier
    pub cover_image: String,
    /// Ordered image sequence
    pub images: Vec<ImageRef>,
    /// Always equal to `images.len()`
    pub image_count: usize,
}

impl ProjectEntry {
    /// URL of the image at `index`, if any
    pub fn image_url(&self, index: usize) -> Option<&str> {
        self.images.get(index).map(|image| image.url.as_str())
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}
