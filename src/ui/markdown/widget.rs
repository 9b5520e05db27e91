use markdown::{ParseOptions, to_mdast};
use ratatui::text::Line;

use super::block::{render_node, trim_trailing_blank};
use super::context::RenderContext;
use super::error::MarkdownError;

const DEFAULT_WIDTH: usize = 80;

/// Renders GitHub-flavoured markdown into styled lines. The text may be a
/// prefix of a longer reply, so unterminated constructs render as far as
/// they go.
#[derive(Debug, Clone)]
pub struct MarkdownWidget<'a> {
    content: &'a str,
    width: usize,
}

impl<'a> MarkdownWidget<'a> {
    #[must_use]
    pub const fn new(content: &'a str) -> Self {
        Self {
            content,
            width: DEFAULT_WIDTH,
        }
    }

    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn render_to_lines(&self) -> Result<Vec<Line<'static>>, MarkdownError> {
        let ast = to_mdast(self.content, &ParseOptions::gfm())
            .map_err(|e| MarkdownError::Parse(e.to_string()))?;

        let ctx = RenderContext::new(self.width, self.content);
        Ok(trim_trailing_blank(render_node(&ast, ctx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::{BoxChars, Theme};
    use ratatui::style::Modifier;

    fn render(source: &str) -> Vec<Line<'static>> {
        MarkdownWidget::new(source).width(40).render_to_lines().unwrap()
    }

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn span_with<'l>(lines: &'l [Line<'static>], text: &str) -> &'l ratatui::text::Span<'static> {
        lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .find(|span| span.content == text)
            .unwrap_or_else(|| panic!("no span {text:?} in {:?}", texts(lines)))
    }

    #[test]
    fn test_heading_drops_hashes() {
        let lines = render("# Title\n\n### Smaller");

        assert_eq!(texts(&lines), vec!["Title", "", "Smaller"]);
        assert_eq!(span_with(&lines, "Title").style, Theme::primary_bold());
        assert_eq!(span_with(&lines, "Smaller").style, Theme::heading());
    }

    #[test]
    fn test_emphasis_and_inline_code_are_styled() {
        let lines = render("**bold** and *soft* with `code`");

        assert_eq!(texts(&lines), vec!["bold and soft with code"]);
        assert!(
            span_with(&lines, "bold")
                .style
                .add_modifier
                .contains(Modifier::BOLD)
        );
        assert!(
            span_with(&lines, "soft")
                .style
                .add_modifier
                .contains(Modifier::ITALIC)
        );
        assert_eq!(span_with(&lines, "code").style, Theme::inline_code());
    }

    #[test]
    fn test_bullet_and_ordered_lists() {
        let lines = render("- apples\n- pears\n\n3. three\n4. four");

        assert_eq!(
            texts(&lines),
            vec![
                format!("{} apples", BoxChars::BULLET),
                format!("{} pears", BoxChars::BULLET),
                String::new(),
                "3. three".to_string(),
                "4. four".to_string(),
            ]
        );
    }

    #[test]
    fn test_nested_list_is_indented() {
        let lines = render("- outer\n  - inner");
        assert_eq!(
            texts(&lines),
            vec![
                format!("{} outer", BoxChars::BULLET),
                format!("  {} inner", BoxChars::BULLET),
            ]
        );
    }

    #[test]
    fn test_long_list_item_hangs_under_marker() {
        let lines = render(&format!("- {}", "word ".repeat(12)));

        let rendered = texts(&lines);
        assert!(rendered.len() > 1);
        assert!(rendered[1].starts_with("  word"));
        assert!(rendered.iter().all(|l| l.chars().count() <= 40));
    }

    #[test]
    fn test_fenced_code_is_framed_and_highlighted() {
        let lines = render("```rust\nfn main() {}\n```");

        assert_eq!(
            texts(&lines),
            vec![
                format!("{} rust", BoxChars::ROUND_TOP_LEFT),
                format!("{} fn main() {{}}", BoxChars::VERTICAL),
                BoxChars::ROUND_BOTTOM_LEFT.to_string(),
            ]
        );
        assert!(lines[1].spans.iter().skip(1).all(|s| s.style.bg == Theme::code().bg));
    }

    #[test]
    fn test_partially_revealed_fence_stays_open() {
        let lines = render("Here:\n\n```python\nprint(\"hi\")\nx = 4");

        let rendered = texts(&lines);
        assert_eq!(rendered[0], "Here:");
        assert_eq!(rendered[2], format!("{} python", BoxChars::ROUND_TOP_LEFT));
        assert_eq!(
            rendered.last().map(String::as_str),
            Some(format!("{} x = 4", BoxChars::VERTICAL).as_str())
        );
        assert!(!rendered.contains(&BoxChars::ROUND_BOTTOM_LEFT.to_string()));
    }

    #[test]
    fn test_bare_opening_fence_renders_header_only() {
        let lines = render("```");
        assert_eq!(
            texts(&lines),
            vec![format!("{} code", BoxChars::ROUND_TOP_LEFT)]
        );
    }

    #[test]
    fn test_table_cells_are_joined() {
        let lines = render("| a | b |\n|---|---|\n| 1 | 2 |");
        let sep = BoxChars::VERTICAL;
        assert_eq!(texts(&lines), vec![format!("a {sep} b"), format!("1 {sep} 2")]);
    }

    #[test]
    fn test_plain_text_renders_unchanged() {
        assert_eq!(texts(&render("Hello there")), vec!["Hello there"]);
    }
}
