/// Application configuration
///
/// Read from `config.toml` in the user's config directory:
/// - Linux: ~/.config/epa-gallery/config.toml
/// - macOS: ~/Library/Application Support/epa-gallery/config.toml
/// - Windows: %APPDATA%\epa-gallery\config.toml
///
/// Every field is optional; a missing file means all defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::state::lightbox::DEFAULT_SWIPE_THRESHOLD;
use crate::state::pager::DEFAULT_PAGE_SIZE;

/// Directory name under the platform config dir
pub const APP_DIR: &str = "epa-gallery";

const DEFAULT_PLACEHOLDER: &str =
    "https://res.cloudinary.com/duwqt0u27/image/upload/f_auto,q_auto,w_800/sample";
const DEFAULT_CONTACT_ENDPOINT: &str = "https://api.web3forms.com/submit";
const DEFAULT_CONTACT_ACCESS_KEY: &str = "7203c09f-8103-45cc-94a6-d8e3196d6e00";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Project cards per gallery page
    pub page_size: usize,
    /// Drag distance in pixels that counts as a swipe
    pub swipe_threshold: f32,
    /// Thumbnails shown on narrow windows
    pub thumbnails_narrow: usize,
    /// Thumbnails shown otherwise
    pub thumbnails_wide: usize,
    /// Window width below which the layout is narrow
    pub narrow_breakpoint: f32,
    /// Shown when an image and its project cover both fail
    pub placeholder_url: String,
    /// Catalog JSON to load instead of the bundled one
    pub catalog_path: Option<PathBuf>,
    pub contact_endpoint: String,
    pub contact_access_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            thumbnails_narrow: 6,
            thumbnails_wide: 10,
            narrow_breakpoint: 768.0,
            placeholder_url: DEFAULT_PLACEHOLDER.to_string(),
            catalog_path: None,
            contact_endpoint: DEFAULT_CONTACT_ENDPOINT.to_string(),
            contact_access_key: DEFAULT_CONTACT_ACCESS_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Load the config from the default location, falling back to defaults
    /// when the file is missing or broken.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            tracing::warn!("No config directory available, using defaults");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("⚠️  {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: AppConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.page_size = config.page_size.max(1);

        tracing::info!("⚙️  Configuration loaded from {}", path.display());
        Ok(config)
    }

    fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push(APP_DIR);
        path.push("config.toml");
        Some(path)
    }
}
