use ratatui::style::{Color, Modifier, Style};

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub title: Color,
    pub text: Color,
    pub dim: Color,
    pub active: Color,
    pub error: Color,
    pub border: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
}

impl Theme {
    /// Hacker-green terminal theme.
    pub fn hacker() -> Self {
        Self {
            name: "hacker",
            title: Color::Rgb(0, 210, 0),
            text: Color::White,
            dim: Color::DarkGray,
            active: Color::Cyan,
            error: Color::Red,
            border: Color::Rgb(0, 210, 0),
            highlight_fg: Color::Black,
            highlight_bg: Color::Rgb(0, 210, 0),
        }
    }

    /// Modern theme: white text, electric blue accents.
    pub fn modern() -> Self {
        Self {
            name: "modern",
            title: Color::Rgb(60, 140, 255),
            text: Color::White,
            dim: Color::Rgb(120, 120, 140),
            active: Color::Rgb(60, 140, 255),
            error: Color::Rgb(255, 80, 80),
            border: Color::Rgb(60, 140, 255),
            highlight_fg: Color::White,
            highlight_bg: Color::Rgb(30, 60, 120),
        }
    }

    /// Look up a theme by name, falling back to [`Theme::hacker`].
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "modern" => Self::modern(),
            "hacker" => Self::hacker(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using hacker");
                Self::hacker()
            }
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_name_is_case_insensitive_with_fallback() {
        assert_eq!(Theme::by_name("Modern").name, "modern");
        assert_eq!(Theme::by_name("hacker").name, "hacker");
        assert_eq!(Theme::by_name("solarized").name, "hacker");
    }
}
