#![allow(clippy::cast_possible_truncation)]

use crate::ui::theme::{Spinners, Theme};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

const HINTS: &str = "/ commands | PgUp/PgDn scroll | Ctrl+Y copy";

/// What the right side of the status line reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusView {
    Idle,
    Waiting { elapsed: Option<Duration> },
    Typing,
    /// The session could not be opened.
    Offline,
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs > 0 {
        format!(" {secs}s")
    } else {
        format!(" {}ms", elapsed.as_millis())
    }
}

fn status_text(view: StatusView, spinner_frame: usize) -> Option<(String, Style)> {
    match view {
        StatusView::Idle => None,
        StatusView::Waiting { elapsed } => {
            let frames = Spinners::BRAILLE;
            let frame_char = frames[spinner_frame % frames.len()];
            let elapsed_text = elapsed.map(format_elapsed).unwrap_or_default();
            Some((
                format!("{frame_char} Waiting for Gemini{elapsed_text}"),
                Theme::warning(),
            ))
        }
        StatusView::Typing => Some(("Typing".to_string(), Theme::primary())),
        StatusView::Offline => Some(("Offline".to_string(), Theme::error())),
    }
}

pub fn render_status(frame: &mut Frame, area: Rect, view: StatusView, spinner_frame: usize) {
    let hints_width = HINTS.width() as u16;
    let left_line = Line::from(vec![Span::raw(" "), Span::styled(HINTS, Theme::muted())]);
    frame
        .buffer_mut()
        .set_line(area.x, area.y, &left_line, (hints_width + 2).min(area.width));

    let Some((text, style)) = status_text(view, spinner_frame) else {
        return;
    };

    let right_line = Line::from(vec![Span::styled(text, style), Span::raw(" ")]);
    let status_len = (right_line.width() + 1) as u16;
    let status_x = area.x + area.width.saturating_sub(status_len);
    frame
        .buffer_mut()
        .set_line(status_x, area.y, &right_line, status_len.min(area.width));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_shows_nothing_on_the_right() {
        assert!(status_text(StatusView::Idle, 0).is_none());
    }

    #[test]
    fn waiting_reports_elapsed_time() {
        let (text, _) = status_text(
            StatusView::Waiting {
                elapsed: Some(Duration::from_secs(3)),
            },
            0,
        )
        .expect("status");
        assert!(text.ends_with("Waiting for Gemini 3s"));
    }

    #[test]
    fn short_waits_are_shown_in_millis() {
        assert_eq!(format_elapsed(Duration::from_millis(250)), " 250ms");
    }

    #[test]
    fn offline_is_an_error() {
        let (text, style) = status_text(StatusView::Offline, 0).expect("status");
        assert_eq!(text, "Offline");
        assert_eq!(style, Theme::error());
    }
}
