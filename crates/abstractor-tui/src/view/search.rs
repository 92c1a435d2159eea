use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, InputMode};
use crate::view::truncate;

const SEARCH_LABEL: &str = "Search: ";
const HELP_TEXT: &str =
    "Type to search | \u{2191}/\u{2193} to select | Enter to choose | Backspace to delete | ESC to exit";
/// Left margin of result rows.
const ROW_INDENT: usize = 2;

/// One row of the results list as it will be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow<'a> {
    pub title: &'a str,
    pub selected: bool,
}

/// The first `height` rows of `titles`, with the row at `selected` marked.
/// The list always starts at row 0; a selection further down is not drawn.
pub fn visible_rows<'a>(titles: &[&'a str], selected: usize, height: usize) -> Vec<VisibleRow<'a>> {
    titles
        .iter()
        .copied()
        .enumerate()
        .take(height)
        .map(|(i, title)| VisibleRow {
            title,
            selected: i == selected,
        })
        .collect()
}

/// Render the search screen into `area`.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Length(1), // underline
        Constraint::Length(1), // spacer
        Constraint::Length(1), // search box
        Constraint::Length(1), // rule
        Constraint::Length(1), // results header
        Constraint::Min(0),    // results
        Constraint::Length(1), // footer
    ])
    .split(area);

    render_title(f, chunks[0], chunks[1], app);
    render_search_box(f, chunks[3], app);
    f.render_widget(
        Paragraph::new(Line::styled(
            "-".repeat(chunks[4].width.saturating_sub(1) as usize),
            app.theme.dim_style(),
        )),
        chunks[4],
    );

    let header = format!("Results ({} items):", app.filtered.len());
    f.render_widget(
        Paragraph::new(Line::styled(
            truncate(&header, chunks[5].width as usize),
            Style::default()
                .fg(app.theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        chunks[5],
    );

    render_results(f, chunks[6], app);
    render_footer(f, chunks[7], app);
}

fn render_title(f: &mut Frame, title_area: Rect, underline_area: Rect, app: &App) {
    let title = truncate(&app.title, title_area.width as usize);
    let underline = "=".repeat(title.width());
    f.render_widget(
        Paragraph::new(Line::styled(title, app.theme.title_style())),
        title_area,
    );
    f.render_widget(
        Paragraph::new(Line::styled(underline, app.theme.dim_style())),
        underline_area,
    );
}

fn render_search_box(f: &mut Frame, area: Rect, app: &App) {
    let width = area.width as usize;
    let room = width.saturating_sub(SEARCH_LABEL.len() + 1);
    // Keep the tail of a long query visible, next to the cursor.
    let shown = tail_fitting(&app.query, room);

    let line = Line::from(vec![
        Span::styled(SEARCH_LABEL, Style::default().fg(app.theme.active)),
        Span::styled(shown.as_str(), Style::default().fg(app.theme.text)),
    ]);
    f.render_widget(Paragraph::new(line), area);

    if app.input_mode() == InputMode::Search {
        let cursor_x = (SEARCH_LABEL.len() + shown.width()).min(width.saturating_sub(1));
        f.set_cursor_position((area.x + cursor_x as u16, area.y));
    }
}

/// Longest suffix of `s` that fits in `max_width` columns.
fn tail_fitting(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut tail: Vec<char> = Vec::new();
    let mut used = 0;
    for c in s.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        tail.push(c);
        used += w;
    }
    tail.into_iter().rev().collect()
}

fn render_results(f: &mut Frame, area: Rect, app: &App) {
    let titles = app.filtered_titles();
    let rows = visible_rows(&titles, app.selected, area.height as usize);
    let text_width = (area.width as usize).saturating_sub(ROW_INDENT + 2);
    let indent = " ".repeat(ROW_INDENT);

    let lines: Vec<Line> = rows
        .iter()
        .map(|row| {
            let title = truncate(row.title, text_width);
            if row.selected {
                Line::from(vec![
                    Span::raw(indent.clone()),
                    Span::styled(format!("> {title}"), app.theme.highlight_style()),
                ])
            } else {
                Line::from(vec![
                    Span::raw(indent.clone()),
                    Span::styled(format!("  {title}"), Style::default().fg(app.theme.text)),
                ])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let width = area.width as usize;
    let line = match &app.status {
        Some(message) => Line::styled(truncate(message, width), app.theme.error_style()),
        None => Line::styled(truncate(HELP_TEXT, width), app.theme.dim_style()),
    };
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLES: [&str; 5] = ["a", "b", "c", "d", "e"];

    fn selected_titles(rows: &[VisibleRow]) -> Vec<String> {
        rows.iter()
            .filter(|r| r.selected)
            .map(|r| r.title.to_string())
            .collect()
    }

    #[test]
    fn selected_row_is_marked() {
        let rows = visible_rows(&TITLES, 1, 3);
        let titles: Vec<&str> = rows.iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(selected_titles(&rows), vec!["b"]);
    }

    #[test]
    fn rows_always_start_at_zero() {
        let rows = visible_rows(&TITLES, 4, 3);
        let titles: Vec<&str> = rows.iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert!(selected_titles(&rows).is_empty());
    }

    #[test]
    fn viewport_larger_than_list_shows_everything() {
        assert_eq!(visible_rows(&TITLES, 0, 50).len(), 5);
    }

    #[test]
    fn zero_height_and_empty_list() {
        assert!(visible_rows(&TITLES, 2, 0).is_empty());
        assert!(visible_rows(&[], 0, 10).is_empty());
    }

    #[test]
    fn tail_fitting_keeps_end_of_query() {
        assert_eq!(tail_fitting("knot theory", 6), "theory");
        assert_eq!(tail_fitting("knot", 6), "knot");
    }
}
