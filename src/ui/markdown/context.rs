#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub depth: usize,
    pub width: usize,
    /// Markdown the tree was parsed from, for checks that need the raw text.
    pub source: &'a str,
}

impl<'a> RenderContext<'a> {
    const INDENT_STR: &'static str = "  ";

    pub const fn new(width: usize, source: &'a str) -> Self {
        Self {
            depth: 0,
            width,
            source,
        }
    }

    pub fn indent(&self) -> String {
        Self::INDENT_STR.repeat(self.depth)
    }

    pub const fn indent_width(&self) -> usize {
        self.depth * Self::INDENT_STR.len()
    }

    pub fn available_width(&self) -> usize {
        self.width.saturating_sub(self.indent_width()).max(1)
    }

    pub const fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }
}
