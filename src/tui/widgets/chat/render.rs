use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use super::ChatEntry;
use crate::core::Role;
use crate::ui::markdown::MarkdownWidget;
use crate::ui::theme::{Spinners, Theme};

const USER_PREFIX: &str = "> ";
const ASSISTANT_PREFIX: &str = "✦ ";
const ERROR_PREFIX: &str = "[x] ";
const CURSOR: &str = "▊";

#[must_use]
pub fn entry_lines(entry: &ChatEntry<'_>, width: u16) -> Vec<Line<'static>> {
    match entry.role {
        Role::User => prefixed(entry.text, width, USER_PREFIX, Theme::user(), Theme::user()),
        Role::Assistant => render_assistant(entry.text, width, entry.revealing),
        Role::Error => prefixed(
            entry.text,
            width,
            ERROR_PREFIX,
            Theme::error(),
            Theme::error(),
        ),
    }
}

/// The "..." line shown while a reply is outstanding.
#[must_use]
pub fn pending_line(spinner_frame: usize) -> Line<'static> {
    let frames = Spinners::DOTS;
    let dots = frames[spinner_frame % frames.len()];

    Line::from(vec![
        Span::styled(ASSISTANT_PREFIX, Theme::primary()),
        Span::styled(dots, Theme::muted()),
    ])
}

fn render_assistant(text: &str, width: u16, revealing: bool) -> Vec<Line<'static>> {
    let mut lines = assistant_body(text, width);

    if revealing {
        let cursor = Span::styled(CURSOR, Theme::primary());
        match lines.last_mut() {
            Some(last) => last.spans.push(cursor),
            None => lines.push(Line::from(vec![
                Span::styled(ASSISTANT_PREFIX, Theme::primary()),
                cursor,
            ])),
        }
    }

    lines
}

/// Renders the visible part of a reply as markdown. Text the parser cannot
/// handle, or that renders to nothing readable, is shown as plain wrapped
/// text instead.
fn assistant_body(text: &str, width: u16) -> Vec<Line<'static>> {
    let indent = ASSISTANT_PREFIX.width();
    let available = (width as usize).saturating_sub(indent).max(1);

    match MarkdownWidget::new(text).width(available).render_to_lines() {
        Ok(lines) if !is_content_lost(text, &lines) => with_prefix(lines, indent),
        Ok(_) => plain_assistant(text, width),
        Err(err) => {
            tracing::debug!(error = %err, "rendering reply as plain text");
            plain_assistant(text, width)
        }
    }
}

fn with_prefix(lines: Vec<Line<'static>>, indent: usize) -> Vec<Line<'static>> {
    lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            let lead = if idx == 0 {
                Span::styled(ASSISTANT_PREFIX, Theme::primary())
            } else {
                Span::raw(" ".repeat(indent))
            };
            let mut spans = vec![lead];
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect()
}

fn plain_assistant(text: &str, width: u16) -> Vec<Line<'static>> {
    prefixed(
        text,
        width,
        ASSISTANT_PREFIX,
        Theme::primary(),
        Theme::assistant(),
    )
}

fn is_content_lost(source: &str, rendered: &[Line<'_>]) -> bool {
    source.chars().any(char::is_alphanumeric)
        && !rendered
            .iter()
            .flat_map(|line| line.spans.iter())
            .any(|span| span.content.chars().any(char::is_alphanumeric))
}

fn prefixed(
    text: &str,
    width: u16,
    prefix: &str,
    prefix_style: Style,
    body_style: Style,
) -> Vec<Line<'static>> {
    let indent = prefix.width();
    let available = (width as usize).saturating_sub(indent).max(1);

    text.split('\n')
        .flat_map(|line| wrap(line, available))
        .enumerate()
        .map(|(i, line)| {
            let lead = if i == 0 {
                Span::styled(prefix.to_string(), prefix_style)
            } else {
                Span::raw(" ".repeat(indent))
            };
            Line::from(vec![lead, Span::styled(line, body_style)])
        })
        .collect()
}

fn wrap(line: &str, width: usize) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }
    textwrap::wrap(line, width)
        .into_iter()
        .map(|cow| cow.into_owned())
        .collect()
}
