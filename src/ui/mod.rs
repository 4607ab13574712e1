/// Views and custom widgets
///
/// - `gallery.rs` - projects tab (filters, cards, pagination)
/// - `lightbox.rs` - full-screen image viewer overlay
/// - `swipe.rs` - canvas program turning drags into swipes
/// - `contact.rs` - contact form tab

pub mod contact;
pub mod gallery;
pub mod lightbox;
pub mod swipe;
