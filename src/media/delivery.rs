/// Delivery tiers for catalog images
///
/// Image URLs carry an insertable transformation segment right after the
/// `/upload/` marker. Each tier rewrites that marker to request a variant
/// of a different size and quality:
/// - Lightbox: large WebP for the full view
/// - Cover: cropped WebP for grid cards
/// - NavThumb: tiny square WebP for the thumbnail strip

/// Marker the transformation segment is inserted after
const UPLOAD_MARKER: &str = "/upload/";

/// Transformation parameters per tier
const TIER_LIGHTBOX: &str = "f_webp,q_90,w_1600";
const TIER_COVER: &str = "f_webp,q_100,w_600,c_fill";
const TIER_NAV_THUMB: &str = "f_webp,q_30,w_80,h_80,c_fill";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTier {
    /// Full image inside the lightbox
    Lightbox,
    /// Project card in the gallery grid
    Cover,
    /// Clickable thumbnail in the lightbox strip
    NavThumb,
}

impl ImageTier {
    fn params(self) -> &'static str {
        match self {
            ImageTier::Lightbox => TIER_LIGHTBOX,
            ImageTier::Cover => TIER_COVER,
            ImageTier::NavThumb => TIER_NAV_THUMB,
        }
    }
}

/// Rewrite `url` so it requests the given tier.
///
/// Only the first marker is rewritten. Empty input stays empty and URLs
/// without the marker are returned unchanged.
pub fn tier_url(url: &str, tier: ImageTier) -> String {
    if url.is_empty() {
        return String::new();
    }

    let replacement = format!("{}{}/", UPLOAD_MARKER, tier.params());
    url.replacen(UPLOAD_MARKER, &replacement, 1)
}
