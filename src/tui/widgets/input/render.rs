#![allow(clippy::cast_possible_truncation)]

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use super::InputWidget;
use crate::ui::theme::{BoxChars, Theme};

const HINT_TEXT: &str = "↵ send";
const PREFIX_WIDTH: u16 = 2;

impl InputWidget<'_> {
    pub fn render(&mut self, area: Rect, frame: &mut Frame) {
        self.render_separator(area, frame.buffer_mut());

        let input_area = Self::input_area(area);
        self.render_prefix(input_area, frame.buffer_mut());
        self.render_hint_if_needed(input_area, frame.buffer_mut());

        let textarea_area = Self::textarea_area(input_area);
        self.render_textarea(textarea_area, frame);

        if self.suggestions_visible() {
            self.render_suggestions(area, frame.buffer_mut());
        }
    }

    fn render_separator(&self, area: Rect, buf: &mut Buffer) {
        let separator_area = Rect {
            height: 1.min(area.height),
            ..area
        };

        let line = Line::from(Span::styled(
            BoxChars::HORIZONTAL.repeat(area.width as usize),
            Theme::border(),
        ));
        Paragraph::new(line).render(separator_area, buf);
    }

    fn render_prefix(&self, input_area: Rect, buf: &mut Buffer) {
        if input_area.height == 0 {
            return;
        }

        let prefix_area = Rect {
            width: PREFIX_WIDTH.min(input_area.width),
            height: 1,
            ..input_area
        };

        let style = if self.enabled {
            Theme::primary()
        } else {
            Theme::muted()
        };
        Paragraph::new(Line::from(Span::styled("> ", style))).render(prefix_area, buf);
    }

    fn render_hint_if_needed(&self, input_area: Rect, buf: &mut Buffer) {
        if self.is_empty() || !self.enabled || input_area.height == 0 {
            return;
        }

        let hint_width = HINT_TEXT.width() as u16;
        if input_area.width <= hint_width + PREFIX_WIDTH + 1 {
            return;
        }

        let hint_area = Rect {
            x: input_area.x + input_area.width - hint_width - 1,
            y: input_area.y,
            width: hint_width,
            height: 1,
        };

        let hint = Line::from(Span::styled(HINT_TEXT, Theme::muted()));
        Paragraph::new(hint).render(hint_area, buf);
    }

    fn render_textarea(&mut self, area: Rect, frame: &mut Frame) {
        self.textarea
            .set_block(Block::default().borders(Borders::NONE));

        frame.render_widget(&self.textarea, area);

        if area.width == 0 || area.height == 0 {
            return;
        }

        let (cursor_row, cursor_col) = self.textarea.cursor();
        let row = (cursor_row as u16).min(area.height - 1);
        let col = (cursor_col as u16).min(area.width - 1);
        frame.set_cursor_position(Position::new(area.x + col, area.y + row));
    }

    fn render_suggestions(&self, area: Rect, buf: &mut Buffer) {
        let height = self.suggestions.len().min(5) as u16 + 2;

        if area.y < height {
            return;
        }

        let suggestions_area = Rect {
            x: area.x + 2,
            y: area.y - height,
            width: 30.min(area.width.saturating_sub(4)),
            height,
        };

        let lines: Vec<Line> = self
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, cmd)| self.render_suggestion_line(i, cmd))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::primary())
            .border_set(ratatui::symbols::border::ROUNDED)
            .title(" Commands ");

        Paragraph::new(lines)
            .block(block)
            .render(suggestions_area, buf);
    }

    fn render_suggestion_line(&self, index: usize, command: &'static str) -> Line<'static> {
        let is_selected = index == self.selected_suggestion;

        let style = if is_selected {
            Theme::primary_bold()
        } else {
            Theme::muted()
        };

        let indicator = if is_selected {
            Span::styled(" ←", Theme::primary())
        } else {
            Span::raw("  ")
        };

        Line::from(vec![
            Span::raw(" "),
            Span::styled(command, style),
            indicator,
        ])
    }

    const fn input_area(area: Rect) -> Rect {
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(1),
        }
    }

    fn textarea_area(input_area: Rect) -> Rect {
        let hint_width = HINT_TEXT.width() as u16 + 2;

        Rect {
            x: input_area.x + PREFIX_WIDTH,
            y: input_area.y,
            width: input_area.width.saturating_sub(PREFIX_WIDTH + hint_width),
            height: input_area.height,
        }
    }
}
