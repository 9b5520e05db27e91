mod key_handler;
mod render;

use crate::ui::theme::Theme;
use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

const READY_PLACEHOLDER: &str = "Enter a prompt here";
const BUSY_PLACEHOLDER: &str = "Waiting for Gemini…";

/// What the app should do after the editor handled a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// The editor absorbed the key.
    Continue,
    /// Enter on non-blank text. Carries the text as typed.
    Submit(String),
    /// Up on the first row.
    HistoryPrev,
    /// Down on the last row.
    HistoryNext,
}

/// Prompt editor. While disabled the user can keep typing but Enter does
/// not send; slash commands still go through.
pub struct InputWidget<'a> {
    textarea: TextArea<'a>,
    suggestions: Vec<&'static str>,
    show_suggestions: bool,
    selected_suggestion: usize,
    enabled: bool,
}

impl InputWidget<'_> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            textarea: Self::create_textarea(true),
            suggestions: Vec::new(),
            show_suggestions: false,
            selected_suggestion: 0,
            enabled: true,
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn set_text(&mut self, text: &str) {
        let lines: Vec<String> = text.split('\n').map(ToString::to_string).collect();
        self.textarea = TextArea::new(lines);
        self.configure_textarea();
        self.textarea.move_cursor(CursorMove::Bottom);
        self.textarea.move_cursor(CursorMove::End);
        self.hide_suggestions();
    }

    pub fn clear(&mut self) {
        self.textarea = Self::create_textarea(self.enabled);
        self.hide_suggestions();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textarea.lines().iter().all(String::is_empty)
    }

    pub fn take(&mut self) -> String {
        let text = self.text();
        self.clear();
        text
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.textarea.set_placeholder_text(placeholder(enabled));
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.textarea.lines().len()
    }

    fn create_textarea(enabled: bool) -> TextArea<'static> {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(placeholder(enabled));
        textarea.set_placeholder_style(Theme::muted());
        textarea.set_cursor_line_style(Style::default());
        textarea.set_cursor_style(Theme::white());
        textarea
    }

    fn configure_textarea(&mut self) {
        self.textarea.set_placeholder_text(placeholder(self.enabled));
        self.textarea.set_placeholder_style(Theme::muted());
        self.textarea.set_cursor_line_style(Style::default());
        self.textarea.set_cursor_style(Theme::white());
    }
}

impl Default for InputWidget<'_> {
    fn default() -> Self {
        Self::new()
    }
}

const fn placeholder(enabled: bool) -> &'static str {
    if enabled {
        READY_PLACEHOLDER
    } else {
        BUSY_PLACEHOLDER
    }
}
