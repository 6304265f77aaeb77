// Scrollable component system for TUI panels
//
// A reusable scroll state that any panel can embed. Each component owns
// its own state; the App only renders and routes input.
//
// The outline panel scrolls from the top (a fresh outline starts at the
// first symbol), the logs panel follows its tail; both behaviors come
// from the same state with different follow defaults.

/// Scroll state for a single panel
///
/// Owns position, content size, and viewport size. Call
/// `update_dimensions` once per frame before reading `visible_range`.
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Line index at the top of the viewport
    offset: usize,

    /// Total number of lines in content
    total: usize,

    /// Number of lines visible in the viewport
    viewport: usize,

    /// Whether new content keeps the view pinned to the bottom.
    /// Scrolling up takes control away; scrolling back to the bottom
    /// returns it.
    pub auto_follow: bool,
}

impl ScrollState {
    /// Scroll state pinned to the top (outline-style).
    pub fn anchored_top() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: false,
        }
    }

    /// Scroll state following the tail (log-style).
    pub fn following() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Update content and viewport dimensions; call each render frame.
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Scroll up one line; the user takes control.
    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.auto_follow = false;
        }
    }

    /// Scroll down one line; reaching the bottom re-enables follow mode.
    pub fn scroll_down(&mut self) {
        if self.offset < self.max_offset() {
            self.offset += 1;
        }
        if self.total > 0 && self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
        self.auto_follow = false;
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
        if self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_follow = true;
    }

    /// Jump so that `line` is inside the viewport, moving as little as
    /// possible. Used to keep the keyboard selection visible.
    pub fn reveal(&mut self, line: usize) {
        if line < self.offset {
            self.offset = line;
            self.auto_follow = false;
        } else if self.viewport > 0 && line >= self.offset + self.viewport {
            self.offset = line + 1 - self.viewport;
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Visible line range as (start, end).
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::anchored_top()
    }
}

/// Panels that can be focused for input routing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FocusablePanel {
    /// The structure outline panel (default focus)
    #[default]
    Outline,
    /// System logs panel
    Logs,
}

impl FocusablePanel {
    pub fn next(self) -> Self {
        match self {
            FocusablePanel::Outline => FocusablePanel::Logs,
            FocusablePanel::Logs => FocusablePanel::Outline,
        }
    }

    pub fn prev(self) -> Self {
        // Two panels, so the cycle is its own inverse.
        self.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_mode_tracks_new_content() {
        let mut scroll = ScrollState::following();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn test_anchored_top_stays_put_as_content_grows() {
        let mut scroll = ScrollState::anchored_top();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 0);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_scroll_up_disables_follow() {
        let mut scroll = ScrollState::following();
        scroll.update_dimensions(20, 5);
        scroll.scroll_up();
        assert!(!scroll.auto_follow);
        assert_eq!(scroll.offset(), 14);
    }

    #[test]
    fn test_scroll_to_bottom_reenables_follow() {
        let mut scroll = ScrollState::following();
        scroll.update_dimensions(20, 5);
        scroll.scroll_up();
        scroll.scroll_up();
        assert!(!scroll.auto_follow);

        scroll.scroll_to_bottom();
        assert!(scroll.auto_follow);
        assert_eq!(scroll.offset(), 15);
    }

    #[test]
    fn test_reveal_scrolls_minimally() {
        let mut scroll = ScrollState::anchored_top();
        scroll.update_dimensions(50, 10);

        scroll.reveal(25);
        let (start, end) = scroll.visible_range();
        assert!(start <= 25 && 25 < end);
        assert_eq!(end, 26); // moved just far enough

        scroll.reveal(3);
        assert_eq!(scroll.offset(), 3);
    }

    #[test]
    fn test_offset_clamps_when_content_shrinks() {
        let mut scroll = ScrollState::anchored_top();
        scroll.update_dimensions(100, 10);
        scroll.page_down();
        scroll.page_down();
        assert_eq!(scroll.offset(), 20);

        scroll.update_dimensions(12, 10);
        assert_eq!(scroll.offset(), 2);
    }

    #[test]
    fn test_focus_cycle_covers_both_panels() {
        let start = FocusablePanel::Outline;
        assert_eq!(start.next(), FocusablePanel::Logs);
        assert_eq!(start.next().next(), start);
        assert_eq!(start.prev(), FocusablePanel::Logs);
    }
}
