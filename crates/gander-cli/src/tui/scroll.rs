//! Message viewport scrolling
//!
//! Follows new output only while the user sits at the bottom. Scrolling up
//! pauses auto-follow; coming back to the bottom resumes it.

/// Rows from the bottom that still count as "at the bottom"
const AT_BOTTOM_THRESHOLD: usize = 2;

#[derive(Debug, Clone)]
pub struct ScrollState {
    pub offset: usize,
    pub max_scroll: usize,
    auto_follow: bool,
    follow_requested: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0,
            max_scroll: 0,
            auto_follow: true,
            follow_requested: false,
        }
    }
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update bounds after layout; applies a pending follow request
    pub fn set_content(&mut self, total_rows: usize, viewport_rows: usize) {
        self.max_scroll = total_rows.saturating_sub(viewport_rows);
        if self.follow_requested && self.auto_follow {
            self.offset = self.max_scroll;
        }
        self.follow_requested = false;
        self.offset = self.offset.min(self.max_scroll);
    }

    /// Ask to jump to the bottom at the next layout (reveal checkpoints)
    pub fn request_follow(&mut self) {
        self.follow_requested = true;
    }

    /// Jump to the bottom and resume following
    pub fn scroll_to_bottom(&mut self) {
        self.auto_follow = true;
        self.offset = self.max_scroll;
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.offset = self.offset.saturating_sub(rows);
        self.auto_follow = self.is_at_bottom();
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.offset = (self.offset + rows).min(self.max_scroll);
        self.auto_follow = self.is_at_bottom();
    }

    pub fn is_at_bottom(&self) -> bool {
        self.max_scroll.saturating_sub(self.offset) <= AT_BOTTOM_THRESHOLD
    }

    pub fn is_following(&self) -> bool {
        self.auto_follow
    }
}
