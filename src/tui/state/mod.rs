mod history;

pub use history::InputHistory;

use crate::tui::widgets::ScrollState;
use crate::ui::Notice;
use std::time::{Duration, Instant};

/// Presentation-only state. Conversation data lives in the controller.
pub struct AppState {
    pub should_quit: bool,
    pub spinner_frame: usize,
    pub history: InputHistory,
    pub scroll: ScrollState,
    pub notice: Option<Notice>,

    request_start: Option<Instant>,
}

impl AppState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            should_quit: false,
            spinner_frame: 0,
            history: InputHistory::new(),
            scroll: ScrollState::new(),
            notice: None,
            request_start: None,
        }
    }

    pub const fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn start_request(&mut self) {
        self.request_start = Some(Instant::now());
        self.scroll.follow();
    }

    pub const fn finish_request(&mut self) {
        self.request_start = None;
    }

    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.request_start.map(|start| start.elapsed())
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }

    pub const fn scroll_up(&mut self, lines: usize) {
        self.scroll.scroll_up(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll.scroll_down(lines);
    }

    pub const fn scroll_to_top(&mut self) {
        self.scroll.scroll_to_top();
    }

    pub const fn scroll_to_bottom(&mut self) {
        self.scroll.follow();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
