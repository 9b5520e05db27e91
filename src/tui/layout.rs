use ratatui::layout::{Constraint, Direction, Layout, Rect};

const HEADER_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;
const MIN_INPUT_LINES: usize = 2;
const MAX_INPUT_LINES: usize = 6;

pub struct LayoutAreas {
    pub header: Rect,
    pub chat: Rect,
    pub input: Rect,
    pub status: Rect,
}

/// Splits the screen. The input grows with its content (plus one row for
/// the separator) up to a cap; the chat view takes what is left.
#[must_use]
pub fn calculate_layout(area: Rect, input_lines: usize) -> LayoutAreas {
    let input_height = 1 + input_lines.clamp(MIN_INPUT_LINES, MAX_INPUT_LINES) as u16;

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    let middle_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(input_height)])
        .split(main_chunks[1]);

    LayoutAreas {
        header: main_chunks[0],
        chat: middle_chunks[0],
        input: middle_chunks[1],
        status: main_chunks[2],
    }
}
