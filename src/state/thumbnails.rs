/// Visible span of the lightbox thumbnail strip.
///
/// The span is centred on the current image and shifted left when it would
/// run past the end of the list, so it is always `min(max_visible, count)` wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailWindow {
    /// First visible index (inclusive)
    pub start: usize,
    /// Last visible index (exclusive)
    pub end: usize,
    pub has_more_left: bool,
    pub has_more_right: bool,
}

impl ThumbnailWindow {
    pub fn compute(current: usize, count: usize, max_visible: usize) -> Self {
        let half = max_visible / 2;

        let mut start = current.saturating_sub(half);
        let mut end = start + max_visible;

        if end > count {
            end = count;
            start = end.saturating_sub(max_visible);
        }

        Self {
            start,
            end,
            has_more_left: start > 0,
            has_more_right: end < count,
        }
    }

    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Thumbnail budget for the current viewport width
pub fn max_visible_for(width: f32, breakpoint: f32, narrow: usize, wide: usize) -> usize {
    if width < breakpoint {
        narrow
    } else {
        wide
    }
}
