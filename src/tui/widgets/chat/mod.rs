mod cards;
mod render;
mod scroll_state;

pub use cards::{SUGGESTIONS, render_welcome, suggestion_for_key};
pub use render::{entry_lines, pending_line};
pub use scroll_state::ScrollState;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::core::Role;
use crate::ui::theme::Theme;

/// One turn as it should appear right now. For the turn being revealed
/// `text` is only the visible prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatEntry<'a> {
    pub role: Role,
    pub text: &'a str,
    pub revealing: bool,
}

pub struct ChatWidget<'a> {
    entries: &'a [ChatEntry<'a>],
    scroll: &'a mut ScrollState,
    pending: bool,
    spinner_frame: usize,
}

impl<'a> ChatWidget<'a> {
    #[must_use]
    pub const fn new(
        entries: &'a [ChatEntry<'a>],
        scroll: &'a mut ScrollState,
        pending: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            entries,
            scroll,
            pending,
            spinner_frame,
        }
    }

    pub fn render(self, area: Rect, buf: &mut Buffer) {
        if self.entries.is_empty() && !self.pending {
            render_welcome(area, buf);
            return;
        }

        let content_width = area.width.saturating_sub(4);
        let lines = self.collect_lines(content_width);

        self.render_viewport(area, buf, &lines, content_width);
    }

    fn collect_lines(&self, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                lines.push(Line::from(""));
            }
            lines.extend(entry_lines(entry, width));
        }

        if self.pending {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(pending_line(self.spinner_frame));
        }

        lines
    }

    fn render_viewport(
        self,
        area: Rect,
        buf: &mut Buffer,
        lines: &[Line<'static>],
        content_width: u16,
    ) {
        let viewport_height = area.height as usize;
        self.scroll.update(lines.len(), viewport_height);

        let offset = self.scroll.position();
        let end = (offset + viewport_height).min(lines.len());

        for (i, line) in lines[offset..end].iter().enumerate() {
            buf.set_line(area.x + 2, area.y + i as u16, line, content_width);
        }

        if !self.scroll.is_at_bottom() {
            Self::render_scroll_indicator(area, buf);
        }
    }

    fn render_scroll_indicator(area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height == 0 {
            return;
        }

        let indicator_area = Rect {
            x: area.x + area.width - 10,
            y: area.y + area.height - 1,
            width: 10,
            height: 1,
        };

        let indicator = Line::from(Span::styled("↓ More", Theme::warning()));
        Paragraph::new(indicator).render(indicator_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render(entries: &[ChatEntry<'_>], pending: bool, height: u16) -> (String, ScrollState) {
        let area = Rect::new(0, 0, 60, height);
        let mut buf = Buffer::empty(area);
        let mut scroll = ScrollState::new();
        ChatWidget::new(entries, &mut scroll, pending, 0).render(area, &mut buf);
        (buffer_text(&buf), scroll)
    }

    #[test]
    fn empty_chat_shows_greeting() {
        let (text, _) = render(&[], false, 24);
        assert!(text.contains("Hello, dev."));
        assert!(text.contains("How can I help you today?"));
    }

    #[test]
    fn pending_without_turns_shows_placeholder_not_greeting() {
        let (text, _) = render(&[], true, 10);
        assert!(!text.contains("Hello, dev."));
        assert!(text.contains('.'));
    }

    #[test]
    fn renders_turns_in_order() {
        let entries = [
            ChatEntry {
                role: Role::User,
                text: "Hi",
                revealing: false,
            },
            ChatEntry {
                role: Role::Assistant,
                text: "Hello there",
                revealing: false,
            },
        ];

        let (text, _) = render(&entries, false, 10);
        let user_at = text.find("Hi").expect("user turn rendered");
        let reply_at = text.find("Hello there").expect("assistant turn rendered");
        assert!(user_at < reply_at);
    }

    #[test]
    fn long_conversation_scrolls_to_latest() {
        let texts: Vec<String> = (0..20).map(|i| format!("message {i}")).collect();
        let entries: Vec<ChatEntry<'_>> = texts
            .iter()
            .map(|text| ChatEntry {
                role: Role::User,
                text,
                revealing: false,
            })
            .collect();

        let (text, scroll) = render(&entries, false, 5);
        assert!(text.contains("message 19"));
        assert!(!text.contains("message 0 "));
        assert!(scroll.is_at_bottom());
    }
}
