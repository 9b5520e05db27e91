use ratatui::text::Span;
use textwrap::core::Fragment;
use textwrap::wrap_algorithms::wrap_first_fit;
use unicode_width::UnicodeWidthStr;

#[derive(Debug)]
struct StyledWord {
    span: Span<'static>,
    trailing_space: bool,
}

impl Fragment for StyledWord {
    fn width(&self) -> f64 {
        self.span.content.width() as f64
    }

    fn whitespace_width(&self) -> f64 {
        if self.trailing_space { 1.0 } else { 0.0 }
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// Word-wraps styled spans to `width` columns, keeping each word's style.
/// Runs of whitespace collapse to a single space.
pub fn wrap_spans(spans: &[Span<'static>], width: usize) -> Vec<Vec<Span<'static>>> {
    let words = split_words(spans);
    if words.is_empty() {
        return vec![Vec::new()];
    }

    wrap_first_fit(&words, &[width as f64])
        .into_iter()
        .map(|line| {
            let mut out = Vec::with_capacity(line.len() * 2);
            for (idx, word) in line.iter().enumerate() {
                out.push(word.span.clone());
                if word.trailing_space && idx + 1 < line.len() {
                    out.push(Span::raw(" "));
                }
            }
            out
        })
        .collect()
}

fn split_words(spans: &[Span<'static>]) -> Vec<StyledWord> {
    let mut words: Vec<StyledWord> = Vec::new();

    for span in spans {
        let mut rest = span.content.as_ref();
        while !rest.is_empty() {
            let trimmed = rest.trim_start();
            if trimmed.len() < rest.len() {
                if let Some(last) = words.last_mut() {
                    last.trailing_space = true;
                }
                rest = trimmed;
                continue;
            }

            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            words.push(StyledWord {
                span: Span::styled(rest[..end].to_string(), span.style),
                trailing_space: false,
            });
            rest = &rest[end..];
        }
    }

    words
}
