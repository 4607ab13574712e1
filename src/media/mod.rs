/// Image delivery module
///
/// This module handles:
/// - Rewriting delivery URLs per size/quality tier
/// - Fetching images over HTTP for the grid and the lightbox
/// - Caching decoded handles by URL

pub mod cache;
pub mod delivery;
pub mod fetch;
