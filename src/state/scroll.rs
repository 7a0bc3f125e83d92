//! Scroll State Module - offsets, clamping and scrollbar thumb arithmetic
//!
//! Offsets are user state and may be stale after content or geometry changes,
//! so every reader re-clamps them against the current extents.

// =============================================================================
// SCROLL OFFSET
// =============================================================================

/// Scroll position of a panel's content window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScrollOffset {
    pub x: usize,
    pub y: usize,
}

impl ScrollOffset {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Clamp both axes into `[0, max]`.
    pub fn clamped(self, max_x: usize, max_y: usize) -> Self {
        Self {
            x: self.x.min(max_x),
            y: self.y.min(max_y),
        }
    }
}

/// Largest valid offset for `content` units shown through a `viewport`.
#[inline]
pub fn max_scroll(content: usize, viewport: usize) -> usize {
    content.saturating_sub(viewport)
}

/// Apply a signed delta and clamp into `[0, max]`.
#[inline]
pub fn scroll_by(offset: usize, delta: isize, max: usize) -> usize {
    offset.saturating_add_signed(delta).min(max)
}

// =============================================================================
// THUMB
// =============================================================================

/// Position and size of a scrollbar thumb along its track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thumb {
    /// First track cell covered by the thumb.
    pub start: usize,
    /// Number of track cells covered.
    pub len: usize,
    /// Largest valid offset on this axis.
    pub max_scroll: usize,
}

impl Thumb {
    /// Compute thumb geometry.
    ///
    /// - `track`: cells available to the bar (content height or width)
    /// - `visible`: numerator of the viewport ratio
    /// - `content`: total content extent on this axis
    /// - `offset`: current scroll offset (clamped here)
    ///
    /// `len = max(1, floor(track * visible / content))`, never longer than the
    /// track; `start = floor((track - len) * offset / max_scroll)`, 0 when
    /// there is nothing to scroll.
    pub fn compute(track: usize, visible: usize, content: usize, offset: usize) -> Self {
        let max_scroll = max_scroll(content, track);

        let len = if content == 0 {
            track
        } else {
            (track * visible / content).max(1).min(track)
        };

        let start = if max_scroll == 0 {
            0
        } else {
            (track - len) * offset.min(max_scroll) / max_scroll
        };

        Self { start, len, max_scroll }
    }

    /// One past the last covered cell.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn contains(&self, cell: usize) -> bool {
        cell >= self.start && cell < self.end()
    }

    pub fn is_before(&self, cell: usize) -> bool {
        cell < self.start
    }

    pub fn is_after(&self, cell: usize) -> bool {
        cell >= self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_max_scroll() {
        assert_eq!(max_scroll(100, 10), 90);
        assert_eq!(max_scroll(3, 10), 0);
    }

    #[test]
    fn test_scroll_by_clamps() {
        assert_eq!(scroll_by(0, -1, 90), 0);
        assert_eq!(scroll_by(89, 5, 90), 90);
        assert_eq!(scroll_by(10, -3, 90), 7);
    }

    #[test]
    fn test_offset_clamped() {
        let offset = ScrollOffset::new(50, 200).clamped(10, 90);
        assert_eq!(offset, ScrollOffset::new(10, 90));
    }

    #[test]
    fn test_thumb_top_and_bottom() {
        // 100 lines, 10-row track, widget height 12.
        let top = Thumb::compute(10, 12, 100, 0);
        assert_eq!(top.len, 1);
        assert_eq!(top.start, 0);
        assert_eq!(top.max_scroll, 90);

        let bottom = Thumb::compute(10, 12, 100, 90);
        assert_eq!(bottom.start, 9);
        assert_eq!(bottom.end(), 10);
    }

    #[test]
    fn test_thumb_middle() {
        // 20 lines, track 10, height 12: len = floor(10 * 12 / 20) = 6, max 10.
        let thumb = Thumb::compute(10, 12, 20, 5);
        assert_eq!(thumb.len, 6);
        assert_eq!(thumb.start, 2);
        assert!(thumb.is_before(1));
        assert!(thumb.contains(2));
        assert!(thumb.contains(7));
        assert!(thumb.is_after(8));
    }

    #[test]
    fn test_thumb_never_exceeds_track() {
        // ratio > 1 when content barely overflows
        let thumb = Thumb::compute(4, 6, 5, 1);
        assert_eq!(thumb.len, 4);
        assert_eq!(thumb.start, 0);
    }

    proptest! {
        #[test]
        fn prop_scroll_by_stays_in_range(offset in 0usize..500, delta in -600isize..600, content in 0usize..400, viewport in 0usize..60) {
            let max = max_scroll(content, viewport);
            let next = scroll_by(offset.min(max), delta, max);
            prop_assert!(next <= max);
        }

        #[test]
        fn prop_thumb_inside_track(track in 0usize..80, extra in 0usize..20, content in 0usize..1000, offset in 0usize..2000) {
            let thumb = Thumb::compute(track, track + extra, content, offset);
            prop_assert!(thumb.end() <= track);
        }
    }
}
