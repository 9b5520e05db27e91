use markdown::mdast::Node;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::ui::theme::Theme;

/// Styled runs of a block's inline content. A hard line break starts a new
/// run.
pub fn collect_inline(nodes: &[Node], base: Style) -> Vec<Vec<Span<'static>>> {
    let mut runs = vec![Vec::new()];
    push_nodes(nodes, base, &mut runs);
    runs
}

pub fn collect_text(nodes: &[Node]) -> String {
    collect_inline(nodes, Style::default())
        .iter()
        .flatten()
        .map(|span| span.content.as_ref())
        .collect()
}

fn push_nodes(nodes: &[Node], style: Style, runs: &mut Vec<Vec<Span<'static>>>) {
    for node in nodes {
        push_node(node, style, runs);
    }
}

fn push_node(node: &Node, style: Style, runs: &mut Vec<Vec<Span<'static>>>) {
    match node {
        Node::Text(text) => push_span(runs, Span::styled(text.value.clone(), style)),
        Node::Html(html) => push_span(runs, Span::styled(html.value.clone(), style)),
        Node::InlineCode(code) => push_span(
            runs,
            Span::styled(code.value.clone(), Theme::inline_code()),
        ),

        Node::Strong(strong) => {
            push_nodes(&strong.children, style.add_modifier(Modifier::BOLD), runs);
        }
        Node::Emphasis(em) => {
            push_nodes(&em.children, style.add_modifier(Modifier::ITALIC), runs);
        }
        Node::Delete(del) => {
            push_nodes(&del.children, style.add_modifier(Modifier::CROSSED_OUT), runs);
        }
        Node::Link(link) => push_nodes(&link.children, style.patch(Theme::link()), runs),

        Node::Break(_) => runs.push(Vec::new()),

        _ => {}
    }
}

fn push_span(runs: &mut Vec<Vec<Span<'static>>>, span: Span<'static>) {
    if let Some(run) = runs.last_mut() {
        run.push(span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown::{ParseOptions, to_mdast};

    fn paragraph_children(source: &str) -> Vec<Node> {
        let root = to_mdast(source, &ParseOptions::gfm()).unwrap();
        match root.children().and_then(|c| c.first()) {
            Some(Node::Paragraph(para)) => para.children.clone(),
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_emphasis_stacks_modifiers() {
        let children = paragraph_children("***both***");
        let runs = collect_inline(&children, Style::default());

        let span = &runs[0][0];
        assert_eq!(span.content, "both");
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
        assert!(span.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_hard_break_starts_new_run() {
        let children = paragraph_children("one\\\ntwo");
        let runs = collect_inline(&children, Style::default());
        assert_eq!(runs.len(), 2);
    }

    #[test]
    fn test_collect_text_drops_markers() {
        let children = paragraph_children("a [link](https://example.com) and ~~old~~ `x`");
        assert_eq!(collect_text(&children), "a link and old x");
    }
}
