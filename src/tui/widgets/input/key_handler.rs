use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::CursorMove;

use super::{InputAction, InputWidget};
use crate::tui::app::SLASH_COMMANDS;

impl InputWidget<'_> {
    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match (key.code, key.modifiers) {
            (KeyCode::Char('/'), KeyModifiers::NONE) if self.is_empty() => {
                self.textarea.input(key);
                self.update_suggestions();
                InputAction::Continue
            }

            (KeyCode::Tab, KeyModifiers::NONE) => self.handle_tab(),
            (KeyCode::BackTab, _) => self.handle_backtab(),

            (KeyCode::Down, KeyModifiers::NONE) => self.handle_down(),
            (KeyCode::Up, KeyModifiers::NONE) => self.handle_up(),

            (KeyCode::Enter, modifiers)
                if modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
            {
                self.textarea.insert_newline();
                self.hide_suggestions();
                InputAction::Continue
            }
            (KeyCode::Enter, KeyModifiers::NONE) => self.handle_enter(),

            (KeyCode::Char('k' | 'u'), KeyModifiers::CONTROL) => {
                self.clear();
                InputAction::Continue
            }

            (KeyCode::Char(_), KeyModifiers::NONE | KeyModifiers::SHIFT)
            | (KeyCode::Backspace | KeyCode::Delete, _) => {
                self.textarea.input(key);
                self.update_suggestions_if_slash();
                InputAction::Continue
            }

            _ => {
                self.textarea.input(key);
                InputAction::Continue
            }
        }
    }

    /// Inserts pasted text verbatim, normalising line endings.
    pub fn handle_paste(&mut self, text: &str) -> InputAction {
        self.hide_suggestions();

        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        self.textarea.insert_str(normalized);

        InputAction::Continue
    }

    fn handle_tab(&mut self) -> InputAction {
        if self.suggestions_visible() {
            self.apply_selected_suggestion();
        } else {
            self.textarea.insert_tab();
        }
        InputAction::Continue
    }

    fn handle_backtab(&mut self) -> InputAction {
        if self.suggestions_visible() {
            self.select_previous_suggestion();
        }
        InputAction::Continue
    }

    fn handle_down(&mut self) -> InputAction {
        if self.suggestions_visible() {
            self.select_next_suggestion();
            return InputAction::Continue;
        }

        let (row, _) = self.textarea.cursor();
        if row + 1 >= self.line_count() {
            InputAction::HistoryNext
        } else {
            self.textarea.move_cursor(CursorMove::Down);
            InputAction::Continue
        }
    }

    fn handle_up(&mut self) -> InputAction {
        if self.suggestions_visible() {
            self.select_previous_suggestion();
            return InputAction::Continue;
        }

        let (row, _) = self.textarea.cursor();
        if row == 0 {
            InputAction::HistoryPrev
        } else {
            self.textarea.move_cursor(CursorMove::Up);
            InputAction::Continue
        }
    }

    fn handle_enter(&mut self) -> InputAction {
        if self.suggestions_visible() {
            return self.submit_selected_suggestion();
        }

        let text = self.text();
        if text.trim().is_empty() {
            return InputAction::Continue;
        }

        let is_command = text.trim_start().starts_with('/');
        if !self.enabled && !is_command {
            return InputAction::Continue;
        }

        self.clear();
        InputAction::Submit(text)
    }

    pub(super) const fn suggestions_visible(&self) -> bool {
        self.show_suggestions && !self.suggestions.is_empty()
    }

    fn update_suggestions_if_slash(&mut self) {
        if self.text().starts_with('/') {
            self.update_suggestions();
        } else {
            self.hide_suggestions();
        }
    }

    fn update_suggestions(&mut self) {
        let text = self.text();

        self.suggestions = SLASH_COMMANDS
            .iter()
            .copied()
            .filter(|cmd| cmd.starts_with(&text))
            .collect();

        self.show_suggestions = !self.suggestions.is_empty();
        self.selected_suggestion = 0;
    }

    pub(super) fn hide_suggestions(&mut self) {
        self.show_suggestions = false;
        self.suggestions.clear();
        self.selected_suggestion = 0;
    }

    const fn select_next_suggestion(&mut self) {
        self.selected_suggestion = (self.selected_suggestion + 1) % self.suggestions.len();
    }

    const fn select_previous_suggestion(&mut self) {
        if self.selected_suggestion > 0 {
            self.selected_suggestion -= 1;
        } else {
            self.selected_suggestion = self.suggestions.len().saturating_sub(1);
        }
    }

    fn apply_selected_suggestion(&mut self) {
        if let Some(suggestion) = self.suggestions.get(self.selected_suggestion).copied() {
            self.set_text(suggestion);
        }
    }

    fn submit_selected_suggestion(&mut self) -> InputAction {
        match self.suggestions.get(self.selected_suggestion).copied() {
            Some(command) => {
                self.clear();
                InputAction::Submit(command.to_string())
            }
            None => InputAction::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(input: &mut InputWidget<'_>, text: &str) {
        for ch in text.chars() {
            input.handle_key(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn enter_submits_and_clears() {
        let mut input = InputWidget::new();
        type_text(&mut input, "Hi");

        assert_eq!(
            input.handle_key(key(KeyCode::Enter)),
            InputAction::Submit("Hi".to_string())
        );
        assert!(input.is_empty());
    }

    #[test]
    fn enter_on_blank_input_does_nothing() {
        let mut input = InputWidget::new();
        type_text(&mut input, "   ");

        assert_eq!(input.handle_key(key(KeyCode::Enter)), InputAction::Continue);
        assert_eq!(input.text(), "   ");
    }

    #[test]
    fn disabled_input_keeps_text_on_enter() {
        let mut input = InputWidget::new();
        input.set_enabled(false);
        type_text(&mut input, "queued");

        assert_eq!(input.handle_key(key(KeyCode::Enter)), InputAction::Continue);
        assert_eq!(input.text(), "queued");
    }

    #[test]
    fn commands_go_through_while_disabled() {
        let mut input = InputWidget::new();
        input.set_enabled(false);
        type_text(&mut input, "/exit ");

        assert_eq!(
            input.handle_key(key(KeyCode::Enter)),
            InputAction::Submit("/exit ".to_string())
        );
    }

    #[test]
    fn shift_enter_inserts_newline() {
        let mut input = InputWidget::new();
        type_text(&mut input, "a");
        input.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        type_text(&mut input, "b");

        assert_eq!(input.text(), "a\nb");
        assert_eq!(input.line_count(), 2);
    }

    #[test]
    fn up_on_first_row_asks_for_history() {
        let mut input = InputWidget::new();
        assert_eq!(input.handle_key(key(KeyCode::Up)), InputAction::HistoryPrev);
        assert_eq!(input.handle_key(key(KeyCode::Down)), InputAction::HistoryNext);
    }

    #[test]
    fn up_inside_multiline_text_moves_cursor() {
        let mut input = InputWidget::new();
        input.set_text("one\ntwo");

        assert_eq!(input.handle_key(key(KeyCode::Up)), InputAction::Continue);
        assert_eq!(input.handle_key(key(KeyCode::Up)), InputAction::HistoryPrev);
    }

    #[test]
    fn slash_shows_matching_commands() {
        let mut input = InputWidget::new();
        type_text(&mut input, "/c");

        assert!(input.show_suggestions);
        assert_eq!(input.suggestions, vec!["/copy"]);

        assert_eq!(
            input.handle_key(key(KeyCode::Enter)),
            InputAction::Submit("/copy".to_string())
        );
    }

    #[test]
    fn tab_completes_selected_command() {
        let mut input = InputWidget::new();
        type_text(&mut input, "/he");
        input.handle_key(key(KeyCode::Tab));

        assert_eq!(input.text(), "/help");
        assert!(!input.show_suggestions);
    }

    #[test]
    fn ctrl_u_clears() {
        let mut input = InputWidget::new();
        type_text(&mut input, "draft");

        let action = input.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(action, InputAction::Continue);
        assert!(input.is_empty());
    }

    #[test]
    fn paste_keeps_newlines() {
        let mut input = InputWidget::new();
        input.handle_paste("line one\r\nline two");

        assert_eq!(input.text(), "line one\nline two");
    }
}
