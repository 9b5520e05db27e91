use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

/// Prompts offered on the empty conversation screen, picked with keys 1-4.
pub const SUGGESTIONS: [&str; 4] = [
    "Suggest beautiful places to see on an upcoming road trip",
    "Briefly summarize this concept: urban planning",
    "Brainstorm team bonding activities for our work retreat",
    "Improve the readability of the following code",
];

const WIDE_LAYOUT_MIN_WIDTH: u16 = 100;
const CARD_HEIGHT: u16 = 5;

#[must_use]
pub fn suggestion_for_key(key: char) -> Option<&'static str> {
    let index = key.to_digit(10)?.checked_sub(1)?;
    SUGGESTIONS.get(index as usize).copied()
}

pub fn render_welcome(area: Rect, buf: &mut Buffer) {
    let wide = area.width >= WIDE_LAYOUT_MIN_WIDTH;
    let cards_height = if wide { CARD_HEIGHT } else { CARD_HEIGHT * 2 };

    let [_, greeting_area, _, cards_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(cards_height),
        Constraint::Fill(1),
    ])
    .areas(area);

    render_greeting(greeting_area, buf);

    let cards_area = inset(cards_area, 2);
    if wide {
        render_card_row(cards_area, buf, &[0, 1, 2, 3]);
    } else {
        let [top, bottom] =
            Layout::vertical([Constraint::Length(CARD_HEIGHT); 2]).areas(cards_area);
        render_card_row(top, buf, &[0, 1]);
        render_card_row(bottom, buf, &[2, 3]);
    }
}

fn render_greeting(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Hello, ", Theme::primary_bold()),
            Span::styled("dev.", Theme::accent()),
        ]),
        Line::from(Span::styled("How can I help you today?", Theme::subtitle())),
    ];

    Paragraph::new(lines).render(inset(area, 2), buf);
}

fn render_card_row(area: Rect, buf: &mut Buffer, indices: &[usize]) {
    let constraints = vec![Constraint::Ratio(1, indices.len() as u32); indices.len()];
    let columns = Layout::horizontal(constraints).spacing(1).split(area);

    for (column, &index) in columns.iter().zip(indices) {
        render_card(*column, buf, index);
    }
}

fn render_card(area: Rect, buf: &mut Buffer, index: usize) {
    let Some(text) = SUGGESTIONS.get(index) else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(format!(" {} ", index + 1), Theme::primary()));

    Paragraph::new(Span::styled(*text, Theme::assistant()))
        .wrap(Wrap { trim: true })
        .block(block)
        .render(area, buf);
}

const fn inset(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(margin * 2),
        height: area.height,
    }
}
