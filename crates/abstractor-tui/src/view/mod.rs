pub mod detail;
pub mod search;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, Screen};

/// Smallest terminal the full layout is drawn on.
pub const MIN_WIDTH: u16 = 20;
pub const MIN_HEIGHT: u16 = 8;

/// Draw the whole UI for the current state.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let notice = truncate("Terminal too small", area.width as usize);
        f.render_widget(
            Paragraph::new(Line::styled(notice, app.theme.error_style())),
            area,
        );
        return;
    }

    search::render(f, app, area);
    if let Screen::DetailOverlay(detail) = &app.screen {
        detail::render(f, detail, &app.theme, area);
    }
}

/// Truncate a string to fit in `max_width` columns, appending "\u{2026}" if truncated.
/// Control characters are shown as spaces.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let clean: String = s
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if clean.width() <= max_width {
        return clean;
    }

    let mut truncated = String::new();
    let mut used = 0;
    for c in clean.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        truncated.push(c);
        used += w;
    }
    truncated.push('\u{2026}');
    truncated
}

/// Word-wrap `text` to `width` columns, keeping explicit line breaks.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    textwrap::wrap(text, width)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Rectangle of the given size centered in `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_string_unchanged() {
        assert_eq!(truncate("Knot Theory", 20), "Knot Theory");
        assert_eq!(truncate("Knot Theory", 11), "Knot Theory");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("Knot Theory", 5), "Knot\u{2026}");
        assert_eq!(truncate("Knot Theory", 1), "\u{2026}");
        assert_eq!(truncate("Knot Theory", 0), "");
    }

    #[test]
    fn truncate_counts_display_columns() {
        // Each CJK character is two columns wide.
        let t = truncate("結び目理論", 5);
        assert_eq!(t, "結び\u{2026}");
        assert!(t.width() <= 5);
    }

    #[test]
    fn truncate_replaces_control_characters() {
        assert_eq!(truncate("Knot\nTheory", 20), "Knot Theory");
    }

    #[test]
    fn wrap_respects_width_and_newlines() {
        let lines = wrap_text("Abstract:\nWe study knots and links in three space", 12);
        assert_eq!(lines[0], "Abstract:");
        assert!(lines.iter().all(|l| l.width() <= 12));
        assert!(lines.len() > 2);
    }

    #[test]
    fn wrap_zero_width_does_not_panic() {
        assert!(!wrap_text("abc", 0).is_empty());
    }

    #[test]
    fn centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_rect(10, 4, area), Rect::new(10, 3, 10, 4));
        assert_eq!(centered_rect(50, 50, area), area);
    }
}
