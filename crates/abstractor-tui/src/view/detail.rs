use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::Detail;
use crate::theme::Theme;
use crate::view::{centered_rect, truncate, wrap_text};

const FOOTER: &str = "Press any key to continue";
/// Columns kept free on each side of the wrapped abstract.
const WRAP_MARGIN: u16 = 12;
/// Border, padding and gutter around the longest line.
const POPUP_PADDING: usize = 6;
/// Rows used by the title, rule, spacer and footer.
const CHROME_ROWS: usize = 4;

/// Geometry and content of the abstract popup for a given screen size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLayout {
    pub popup: Rect,
    pub title: String,
    pub body: Vec<String>,
}

pub fn detail_layout(detail: &Detail, screen: Rect) -> DetailLayout {
    let title = format!("Abstract for: \"{}\"", detail.title);
    let mut body = wrap_text(
        &format!("Abstract:\n{}", detail.text),
        screen.width.saturating_sub(WRAP_MARGIN) as usize,
    );
    body.push(String::new());

    let longest = body
        .iter()
        .map(|l| l.width())
        .chain(std::iter::once(title.width()))
        .max()
        .unwrap_or(0);
    let width = (longest + POPUP_PADDING).min(screen.width.saturating_sub(4) as usize);
    let height = (body.len() + POPUP_PADDING).min(screen.height.saturating_sub(4) as usize);

    DetailLayout {
        popup: centered_rect(width as u16, height as u16, screen),
        title,
        body,
    }
}

/// Draw the abstract popup over whatever is already on screen.
pub fn render(f: &mut Frame, detail: &Detail, theme: &Theme, area: Rect) {
    let layout = detail_layout(detail, area);
    let popup = layout.popup;
    if popup.width < 3 || popup.height < 3 {
        return;
    }

    let inner_w = popup.width.saturating_sub(2) as usize;
    let inner_h = popup.height.saturating_sub(2) as usize;
    let text_w = inner_w.saturating_sub(4);

    let mut lines: Vec<Line> = Vec::with_capacity(inner_h);
    lines.push(
        Line::styled(
            truncate(&layout.title, inner_w),
            theme.title_style(),
        )
        .alignment(Alignment::Center),
    );
    lines.push(Line::styled("\u{2500}".repeat(inner_w), theme.border_style()));
    lines.push(Line::raw(""));

    let room = inner_h.saturating_sub(CHROME_ROWS);
    for text in layout.body.iter().take(room) {
        lines.push(Line::styled(
            format!("  {}", truncate(text, text_w)),
            Style::default().fg(theme.text),
        ));
    }

    // Footer sits on the last inner row regardless of body length.
    while lines.len() + 1 < inner_h {
        lines.push(Line::raw(""));
    }
    lines.push(
        Line::styled(truncate(FOOTER, inner_w), theme.dim_style()).alignment(Alignment::Center),
    );
    lines.truncate(inner_h);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style());

    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(text: &str) -> Detail {
        Detail {
            title: "Knot Theory".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn short_abstract_fits_its_content() {
        let layout = detail_layout(&detail("abc"), Rect::new(0, 0, 80, 24));
        assert_eq!(layout.title, "Abstract for: \"Knot Theory\"");
        assert_eq!(layout.body, vec!["Abstract:", "abc", ""]);
        // Title is the longest line.
        assert_eq!(layout.popup.width as usize, layout.title.width() + 6);
        assert_eq!(layout.popup.height, 3 + 6);
        assert_eq!(layout.popup.x, (80 - layout.popup.width) / 2);
    }

    #[test]
    fn long_abstract_is_wrapped_and_clamped() {
        let text = "knot ".repeat(400);
        let screen = Rect::new(0, 0, 60, 20);
        let layout = detail_layout(&detail(&text), screen);
        assert!(layout.body.iter().all(|l| l.width() <= 48));
        assert!(layout.popup.width <= 56);
        assert_eq!(layout.popup.height, 16);
    }

    #[test]
    fn empty_abstract_still_has_heading() {
        let layout = detail_layout(&detail(""), Rect::new(0, 0, 80, 24));
        assert_eq!(layout.body[0], "Abstract:");
        assert_eq!(layout.body.last().map(String::as_str), Some(""));
    }

    #[test]
    fn tiny_screen_does_not_underflow() {
        let layout = detail_layout(&detail("abc"), Rect::new(0, 0, 2, 2));
        assert_eq!(layout.popup.width, 0);
        assert_eq!(layout.popup.height, 0);
    }
}
