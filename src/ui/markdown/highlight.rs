use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::ui::theme::Theme;

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const HIGHLIGHT_THEME: &str = "base16-ocean.dark";

/// Highlights `code` line by line. Unknown languages, or any highlighter
/// failure, fall back to the flat code style.
pub fn highlight_code(code: &str, lang: Option<&str>) -> Vec<Vec<Span<'static>>> {
    let syntax = lang
        .and_then(|token| SYNTAXES.find_syntax_by_token(token))
        .unwrap_or_else(|| SYNTAXES.find_syntax_plain_text());

    let Some(theme) = THEMES.themes.get(HIGHLIGHT_THEME) else {
        return plain(code);
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();

    for line in LinesWithEndings::from(code) {
        let ranges = match highlighter.highlight_line(line, &SYNTAXES) {
            Ok(ranges) => ranges,
            Err(err) => {
                tracing::debug!(error = %err, "syntax highlighting failed");
                return plain(code);
            }
        };

        lines.push(
            ranges
                .into_iter()
                .filter_map(|(style, text)| {
                    let text = text.trim_end_matches(['\n', '\r']);
                    (!text.is_empty()).then(|| Span::styled(text.to_string(), to_style(style)))
                })
                .collect(),
        );
    }

    lines
}

fn plain(code: &str) -> Vec<Vec<Span<'static>>> {
    code.lines()
        .map(|line| vec![Span::styled(line.to_string(), Theme::code())])
        .collect()
}

fn to_style(style: syntect::highlighting::Style) -> Style {
    let fg = style.foreground;
    let mut out = Theme::code().fg(Color::Rgb(fg.r, fg.g, fg.b));

    if style.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    out
}
