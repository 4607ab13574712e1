/// State management module
///
/// This module handles all application state, including:
/// - The project catalog and its loader (catalog.rs)
/// - Shared data structures (data.rs)
/// - Category classification (category.rs)
/// - Filtering and pagination of the gallery (pager.rs)
/// - Lightbox navigation, load tracking and preloading (lightbox.rs)
/// - Lightbox image loading for one opening (session.rs)
/// - The thumbnail strip window (thumbnails.rs)

pub mod catalog;
pub mod category;
pub mod data;
pub mod lightbox;
pub mod pager;
pub mod session;
pub mod thumbnails;
