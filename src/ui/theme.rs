use ratatui::style::{Color, Modifier, Style};

pub struct BrandColors;

impl BrandColors {
    pub const BLUE: Color = Color::Rgb(75, 144, 255);
    pub const CORAL: Color = Color::Rgb(255, 85, 70);
    pub const SKY: Color = Color::Rgb(194, 231, 255);
    pub const GREEN: Color = Color::Rgb(16, 185, 129);
    pub const AMBER: Color = Color::Rgb(245, 158, 11);
    pub const RED: Color = Color::Rgb(239, 68, 68);
    pub const SILVER: Color = Color::Rgb(196, 199, 197);
    pub const GRAY: Color = Color::Rgb(107, 114, 128);
    pub const DARK_GRAY: Color = Color::Rgb(55, 65, 81);
    pub const CODE_BG: Color = Color::Rgb(30, 30, 30);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const OFF_WHITE: Color = Color::Rgb(184, 184, 184);
}

pub struct BoxChars;

impl BoxChars {
    pub const ROUND_TOP_LEFT: &'static str = "╭";
    pub const ROUND_BOTTOM_LEFT: &'static str = "╰";
    pub const ROUND_BOTTOM_RIGHT: &'static str = "╯";
    pub const HORIZONTAL: &'static str = "─";
    pub const VERTICAL: &'static str = "│";
    pub const BULLET: &'static str = "•";
    pub const SPARKLE: &'static str = "✦";
}

pub struct Spinners;

impl Spinners {
    pub const BRAILLE: &'static [&'static str] =
        &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    pub const DOTS: &'static [&'static str] = &[".  ", ".. ", "...", " ..", "  .", "   "];
}

pub struct Theme;

impl Theme {
    #[must_use]
    pub const fn primary() -> Style {
        Style::new().fg(BrandColors::BLUE)
    }

    #[must_use]
    pub const fn primary_bold() -> Style {
        Style::new()
            .fg(BrandColors::BLUE)
            .add_modifier(Modifier::BOLD)
    }

    /// Second stop of the greeting gradient.
    #[must_use]
    pub const fn accent() -> Style {
        Style::new()
            .fg(BrandColors::CORAL)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub const fn success() -> Style {
        Style::new().fg(BrandColors::GREEN)
    }

    #[must_use]
    pub const fn warning() -> Style {
        Style::new().fg(BrandColors::AMBER)
    }

    #[must_use]
    pub const fn error() -> Style {
        Style::new().fg(BrandColors::RED)
    }

    #[must_use]
    pub const fn muted() -> Style {
        Style::new().fg(BrandColors::GRAY)
    }

    #[must_use]
    pub const fn subtitle() -> Style {
        Style::new()
            .fg(BrandColors::SILVER)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub const fn border() -> Style {
        Style::new().fg(BrandColors::DARK_GRAY)
    }

    #[must_use]
    pub const fn user() -> Style {
        Style::new().fg(BrandColors::SKY)
    }

    #[must_use]
    pub const fn assistant() -> Style {
        Style::new().fg(BrandColors::OFF_WHITE)
    }

    #[must_use]
    pub const fn code() -> Style {
        Style::new().fg(BrandColors::WHITE).bg(BrandColors::CODE_BG)
    }

    #[must_use]
    pub const fn inline_code() -> Style {
        Style::new().fg(BrandColors::SKY).bg(BrandColors::CODE_BG)
    }

    #[must_use]
    pub const fn heading() -> Style {
        Style::new()
            .fg(BrandColors::WHITE)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub const fn link() -> Style {
        Style::new()
            .fg(BrandColors::BLUE)
            .add_modifier(Modifier::UNDERLINED)
    }

    #[must_use]
    pub const fn white() -> Style {
        Style::new().fg(BrandColors::WHITE)
    }
}
