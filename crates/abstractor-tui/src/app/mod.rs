mod update;


use abstractor_core::Catalog;

use crate::theme::Theme;

/// Which screen is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Browsing,
    /// Modal abstract popup; any key returns to browsing.
    DetailOverlay(Detail),
    Exiting,
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Search,
    Overlay,
}

/// Content of the abstract overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub title: String,
    pub text: String,
}

/// A pending abstract lookup produced by activating a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub title: String,
    pub key: String,
}

/// Main application state.
pub struct App {
    pub catalog: Catalog,
    pub screen: Screen,
    pub query: String,
    /// Index into `filtered`; 0 when nothing matches.
    pub selected: usize,
    /// Catalog indices matching `query`, recomputed on every query change.
    pub filtered: Vec<usize>,
    /// Inline error from the last failed lookup, cleared by the next input.
    pub status: Option<String>,
    pub theme: Theme,
    /// Heading shown on the first line.
    pub title: String,
}

impl App {
    pub fn new(catalog: Catalog, theme: Theme, title: impl Into<String>) -> Self {
        let filtered = catalog.filter("");
        Self {
            catalog,
            screen: Screen::Browsing,
            query: String::new(),
            selected: 0,
            filtered,
            status: None,
            theme,
            title: title.into(),
        }
    }

    pub fn input_mode(&self) -> InputMode {
        match self.screen {
            Screen::DetailOverlay(_) => InputMode::Overlay,
            _ => InputMode::Search,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.screen == Screen::Exiting
    }

    /// Titles of the current filtered view, in catalog order.
    pub fn filtered_titles(&self) -> Vec<&str> {
        self.filtered
            .iter()
            .filter_map(|&i| self.catalog.title(i))
            .collect()
    }

    pub fn selected_title(&self) -> Option<&str> {
        self.filtered
            .get(self.selected)
            .and_then(|&i| self.catalog.title(i))
    }

    /// Re-run the filter for the current query and reset the selection.
    pub(crate) fn refilter(&mut self) {
        self.filtered = self.catalog.filter(&self.query);
        self.selected = 0;
    }
}
