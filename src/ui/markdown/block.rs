use markdown::mdast::{Code, Heading, List, ListItem, Node, Table};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::ui::theme::{BoxChars, Theme};

use super::context::RenderContext;
use super::highlight::highlight_code;
use super::inline::{collect_inline, collect_text};
use super::wrap::wrap_spans;

pub fn render_node(node: &Node, ctx: RenderContext<'_>) -> Vec<Line<'static>> {
    match node {
        Node::Root(root) => render_children(&root.children, ctx),

        Node::Heading(heading) => with_trailing_blank(render_heading(heading, ctx)),

        Node::Paragraph(para) => {
            with_trailing_blank(render_inline_block(&para.children, Theme::assistant(), ctx))
        }

        Node::List(list) => with_trailing_blank(render_list(list, ctx)),

        Node::Code(code) => with_trailing_blank(render_code_block(code, ctx)),

        Node::Table(table) => with_trailing_blank(render_table(table, ctx)),

        Node::Blockquote(quote) => render_quote(&quote.children, ctx),

        Node::ThematicBreak(_) => with_trailing_blank(vec![Line::from(vec![
            Span::raw(ctx.indent()),
            Span::styled(
                BoxChars::HORIZONTAL.repeat(ctx.available_width()),
                Theme::border(),
            ),
        ])]),

        Node::Html(html) => with_trailing_blank(wrap_run(
            &[Span::styled(html.value.clone(), Theme::assistant())],
            ctx,
        )),

        _ => Vec::new(),
    }
}

fn render_children(children: &[Node], ctx: RenderContext<'_>) -> Vec<Line<'static>> {
    children
        .iter()
        .flat_map(|child| render_node(child, ctx))
        .collect()
}

fn with_trailing_blank(mut lines: Vec<Line<'static>>) -> Vec<Line<'static>> {
    lines.push(Line::default());
    lines
}

fn render_heading(heading: &Heading, ctx: RenderContext<'_>) -> Vec<Line<'static>> {
    let style = if heading.depth <= 2 {
        Theme::primary_bold()
    } else {
        Theme::heading()
    };
    render_inline_block(&heading.children, style, ctx)
}

fn render_inline_block(
    children: &[Node],
    base: Style,
    ctx: RenderContext<'_>,
) -> Vec<Line<'static>> {
    collect_inline(children, base)
        .iter()
        .flat_map(|run| wrap_run(run, ctx))
        .collect()
}

fn wrap_run(run: &[Span<'static>], ctx: RenderContext<'_>) -> Vec<Line<'static>> {
    let indent = ctx.indent();
    wrap_spans(run, ctx.available_width())
        .into_iter()
        .map(|spans| indented(&indent, spans))
        .collect()
}

fn indented(indent: &str, spans: Vec<Span<'static>>) -> Line<'static> {
    if indent.is_empty() {
        return Line::from(spans);
    }
    let mut out = Vec::with_capacity(spans.len() + 1);
    out.push(Span::raw(indent.to_string()));
    out.extend(spans);
    Line::from(out)
}

fn render_list(list: &List, ctx: RenderContext<'_>) -> Vec<Line<'static>> {
    let first = list.start.unwrap_or(1);

    list.children
        .iter()
        .enumerate()
        .flat_map(|(idx, child)| match child {
            Node::ListItem(item) => {
                let marker = if list.ordered {
                    format!("{}. ", first as usize + idx)
                } else {
                    format!("{} ", BoxChars::BULLET)
                };
                render_list_item(item, &marker, ctx)
            }
            _ => Vec::new(),
        })
        .collect()
}

/// The marker goes on the item's first line and the rest of the item's text
/// hangs under it. Nested lists carry their own indentation.
fn render_list_item(item: &ListItem, marker: &str, ctx: RenderContext<'_>) -> Vec<Line<'static>> {
    let marker_width = marker.chars().count();
    let body = RenderContext {
        width: ctx.width.saturating_sub(marker_width),
        ..ctx
    };
    let indent = ctx.indent();
    let hang = " ".repeat(marker_width);

    let mut lines = Vec::new();
    for child in &item.children {
        if let Node::List(nested) = child {
            lines.extend(render_list(nested, ctx.nested()));
            continue;
        }

        let rendered = match child {
            Node::Paragraph(para) => {
                render_inline_block(&para.children, Theme::assistant(), body)
            }
            other => trim_trailing_blank(render_node(other, body)),
        };

        for line in rendered {
            let lead = if lines.is_empty() {
                Span::styled(marker.to_string(), Theme::primary())
            } else {
                Span::raw(hang.clone())
            };
            let mut spans = vec![Span::raw(indent.clone()), lead];
            spans.extend(line.spans);
            lines.push(Line::from(spans));
        }
    }

    lines
}

fn render_code_block(code: &Code, ctx: RenderContext<'_>) -> Vec<Line<'static>> {
    let indent = ctx.indent();
    let lang = code.lang.as_deref();

    let highlighted = highlight_code(&code.value, lang);
    let mut lines = Vec::with_capacity(highlighted.len() + 2);

    lines.push(indented(
        &indent,
        vec![Span::styled(
            format!("{} {}", BoxChars::ROUND_TOP_LEFT, lang.unwrap_or("code")),
            Theme::border(),
        )],
    ));

    for spans in highlighted {
        let mut line = vec![Span::styled(
            format!("{} ", BoxChars::VERTICAL),
            Theme::border(),
        )];
        line.extend(spans);
        lines.push(indented(&indent, line));
    }

    if is_fence_closed(code, ctx.source) {
        lines.push(indented(
            &indent,
            vec![Span::styled(BoxChars::ROUND_BOTTOM_LEFT, Theme::border())],
        ));
    }

    lines
}

/// A fence still being revealed has no closing marker yet, so its block
/// runs to the end of the text.
fn is_fence_closed(code: &Code, source: &str) -> bool {
    let Some(raw) = code
        .position
        .as_ref()
        .and_then(|pos| source.get(pos.start.offset..pos.end.offset))
    else {
        return true;
    };

    let opening = raw.lines().next().unwrap_or_default().trim_start();
    let Some(fence) = opening.chars().next().filter(|c| matches!(c, '`' | '~')) else {
        return true;
    };
    let fence_len = opening.chars().take_while(|&c| c == fence).count();

    raw.lines().skip(1).last().is_some_and(|line| {
        let line = line.trim();
        line.chars().count() >= fence_len && line.chars().all(|c| c == fence)
    })
}

fn render_table(table: &Table, ctx: RenderContext<'_>) -> Vec<Line<'static>> {
    let separator = format!(" {} ", BoxChars::VERTICAL);

    table
        .children
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            let Node::TableRow(row) = row else {
                return None;
            };
            let cells: Vec<String> = row
                .children
                .iter()
                .map(|cell| cell.children().map_or_else(String::new, |c| collect_text(c)))
                .collect();
            let style = if idx == 0 {
                Theme::heading()
            } else {
                Theme::assistant()
            };
            Some(Line::from(vec![
                Span::raw(ctx.indent()),
                Span::styled(cells.join(&separator), style),
            ]))
        })
        .collect()
}

fn render_quote(children: &[Node], ctx: RenderContext<'_>) -> Vec<Line<'static>> {
    let inner = RenderContext {
        width: ctx.width.saturating_sub(2),
        ..ctx
    };
    let mut lines = trim_trailing_blank(render_children(children, inner));
    for line in &mut lines {
        line.spans.insert(
            0,
            Span::styled(format!("{} ", BoxChars::VERTICAL), Theme::muted()),
        );
        for span in line.spans.iter_mut().skip(1) {
            span.style = span.style.patch(Theme::muted());
        }
    }
    with_trailing_blank(lines)
}

pub fn trim_trailing_blank(mut lines: Vec<Line<'static>>) -> Vec<Line<'static>> {
    while lines
        .last()
        .is_some_and(|line| line.spans.iter().all(|s| s.content.trim().is_empty()))
    {
        lines.pop();
    }
    lines
}
