//! Shared scrolling metrics for vertically scrollable panes.
//!
//! Tracks content height, viewport height, and the current scroll offset
//! while keeping every movement bounded, including restoring a persisted
//! offset and centering a target row.

/// Shared metrics for vertical scrolling, in terminal row units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
    offset: u16,
    content_height: u16,
    viewport_height: u16,
}

impl ScrollMetrics {
    /// Returns the current vertical scroll offset.
    pub const fn offset(&self) -> u16 {
        self.offset
    }

    /// Returns the maximum valid scroll offset.
    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Returns whether content exceeds the current viewport.
    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.viewport_height && self.viewport_height > 0
    }

    /// Resets offset and dimensions.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Updates the viewport height and clamps the current offset.
    pub fn update_viewport_height(&mut self, viewport_height: u16) {
        self.viewport_height = viewport_height;
        self.clamp_offset();
    }

    /// Updates the content height and clamps the current offset.
    pub fn update_content_height(&mut self, content_height: u16) {
        self.content_height = content_height;
        self.clamp_offset();
    }

    /// Scrolls by a relative line count (`+` down, `-` up).
    pub fn scroll_lines(&mut self, delta: i16) {
        if delta == 0 || !self.is_scrollable() {
            return;
        }
        let next = (i32::from(self.offset) + i32::from(delta)).clamp(0, i32::from(self.max_offset()));
        self.offset = next as u16;
    }

    /// Overwrites the offset, clamping to bounds.
    pub fn set_offset(&mut self, offset: u16) {
        self.offset = offset.min(self.max_offset());
    }

    /// Scrolls the minimum amount needed to bring `row` into the viewport.
    pub fn scroll_into_view(&mut self, row: u16) {
        if self.viewport_height == 0 {
            return;
        }
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + self.viewport_height {
            self.offset = row + 1 - self.viewport_height;
        }
    }

    /// Scrolls so `row` sits as close to the vertical center of the viewport
    /// as bounds allow.
    pub fn center_on(&mut self, row: u16) {
        if self.viewport_height == 0 {
            return;
        }
        let half = self.viewport_height / 2;
        self.offset = row.saturating_sub(half).min(self.max_offset());
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollMetrics;

    fn metrics(content: u16, viewport: u16) -> ScrollMetrics {
        let mut metrics = ScrollMetrics::default();
        metrics.update_viewport_height(viewport);
        metrics.update_content_height(content);
        metrics
    }

    #[test]
    fn scrolling_clamps_to_bounds() {
        let mut metrics = metrics(20, 5);
        metrics.scroll_lines(3);
        assert_eq!(metrics.offset(), 3);
        metrics.scroll_lines(-10);
        assert_eq!(metrics.offset(), 0);
        metrics.set_offset(99);
        assert_eq!(metrics.offset(), 15);
    }

    #[test]
    fn scroll_into_view_moves_the_minimum_distance() {
        let mut metrics = metrics(20, 5);
        metrics.scroll_into_view(7);
        assert_eq!(metrics.offset(), 3);
        metrics.scroll_into_view(3);
        assert_eq!(metrics.offset(), 3);
        metrics.scroll_into_view(0);
        assert_eq!(metrics.offset(), 0);
    }

    #[test]
    fn centering_respects_bounds() {
        let mut metrics = metrics(20, 5);
        metrics.center_on(10);
        assert_eq!(metrics.offset(), 8);
        metrics.center_on(0);
        assert_eq!(metrics.offset(), 0);
        metrics.center_on(19);
        assert_eq!(metrics.offset(), 15);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut metrics = metrics(3, 5);
        metrics.scroll_lines(2);
        assert_eq!(metrics.offset(), 0);
        metrics.center_on(2);
        assert_eq!(metrics.offset(), 0);
    }
}
