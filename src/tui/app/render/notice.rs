#![allow(clippy::cast_possible_truncation)]

use crate::ui::Notice;
use crate::ui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

const MAX_WIDTH: u16 = 72;

/// Draws the notice as a box anchored to the bottom of `area`.
pub fn render_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    let width = MAX_WIDTH.min(area.width.saturating_sub(4));
    if width < 10 {
        return;
    }

    let height = (notice.line_count() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height.saturating_sub(height),
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(ratatui::symbols::border::ROUNDED)
        .border_style(notice.level.style())
        .title_bottom(Line::from(Span::styled(" Esc to dismiss ", Theme::muted())).right_aligned());

    let mut lines: Vec<Line> = Vec::with_capacity(notice.line_count());
    for (i, text) in notice.text.lines().enumerate() {
        let lead = if i == 0 {
            Span::styled(format!("{} ", notice.level.icon()), notice.level.style())
        } else {
            Span::raw("    ")
        };
        lines.push(Line::from(vec![lead, Span::styled(text.to_string(), Theme::assistant())]));
    }

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}
