#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollMode {
    /// Pinned to the newest line; content growth scrolls the view.
    Follow,
    /// The user moved away from the bottom; the position is kept.
    Manual,
}

#[derive(Debug, Clone)]
pub struct ScrollState {
    position: usize,
    total_lines: usize,
    viewport_height: usize,
    mode: ScrollMode,
}

impl ScrollState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: 0,
            total_lines: 0,
            viewport_height: 0,
            mode: ScrollMode::Follow,
        }
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub const fn is_following(&self) -> bool {
        matches!(self.mode, ScrollMode::Follow)
    }

    #[must_use]
    pub const fn is_at_bottom(&self) -> bool {
        self.position >= self.max_scroll()
    }

    /// Records the latest content size and clamps or pins the position.
    pub const fn update(&mut self, total_lines: usize, viewport_height: usize) {
        self.total_lines = total_lines;
        self.viewport_height = viewport_height;

        let max = self.max_scroll();
        if self.is_following() || self.position > max {
            self.position = max;
        }
    }

    pub const fn follow(&mut self) {
        self.mode = ScrollMode::Follow;
        self.position = self.max_scroll();
    }

    pub const fn scroll_to_top(&mut self) {
        self.position = 0;
        self.mode = ScrollMode::Manual;
    }

    pub const fn scroll_up(&mut self, lines: usize) {
        self.position = self.position.saturating_sub(lines);
        self.mode = ScrollMode::Manual;
    }

    /// Scrolling back to the bottom resumes following.
    pub fn scroll_down(&mut self, lines: usize) {
        self.position = (self.position + lines).min(self.max_scroll());
        self.mode = if self.is_at_bottom() {
            ScrollMode::Follow
        } else {
            ScrollMode::Manual
        };
    }

    const fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport_height)
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}
