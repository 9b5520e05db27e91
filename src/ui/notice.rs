use ratatui::style::Style;

use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Info => "[i]",
            Self::Success => "[✓]",
            Self::Error => "[x]",
        }
    }

    #[must_use]
    pub const fn style(&self) -> Style {
        match self {
            Self::Info => Theme::primary(),
            Self::Success => Theme::success(),
            Self::Error => Theme::error(),
        }
    }
}

/// Transient UI feedback. Never part of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
}

impl Notice {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: NoticeLevel::Info,
        }
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: NoticeLevel::Success,
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: NoticeLevel::Error,
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.text.lines().count().max(1)
    }
}
