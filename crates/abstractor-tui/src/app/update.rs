use abstractor_core::{DetailProvider, LookupError};

use super::{App, Detail, LookupRequest, Screen};
use crate::action::Action;

impl App {
    /// Process a user action and update state. Returns the lookup to perform
    /// when a row was activated; the caller completes it with
    /// [`finish_lookup`](App::finish_lookup).
    pub fn update(&mut self, action: Action) -> Option<LookupRequest> {
        match action {
            Action::None => return None,
            Action::Resize(w, h) => {
                // Layout is derived from the frame size on the next draw.
                tracing::trace!(width = w, height = h, "terminal resized");
                return None;
            }
            Action::Cancel => {
                self.screen = Screen::Exiting;
                return None;
            }
            _ => {}
        }

        match self.screen {
            Screen::Exiting => return None,
            // Dismiss-only: the key that closes the overlay has no other effect.
            Screen::DetailOverlay(_) => {
                self.screen = Screen::Browsing;
                return None;
            }
            Screen::Browsing => {}
        }

        self.status = None;
        match action {
            Action::Input(c) => {
                self.query.push(c);
                self.refilter();
            }
            Action::Backspace => {
                self.query.pop();
                self.refilter();
            }
            Action::MoveUp => {
                self.selected = self.selected.saturating_sub(1);
            }
            Action::MoveDown => {
                if !self.filtered.is_empty() {
                    self.selected = (self.selected + 1).min(self.filtered.len() - 1);
                }
            }
            Action::Activate => return self.lookup_request(),
            Action::Dismiss | Action::Cancel | Action::Resize(..) | Action::None => {}
        }
        None
    }

    fn lookup_request(&self) -> Option<LookupRequest> {
        let title = self.selected_title()?;
        let key = self.catalog.record_for(title)?.key.clone()?;
        Some(LookupRequest {
            title: title.to_string(),
            key,
        })
    }

    /// Show the result of a lookup: the overlay on success, an inline error
    /// otherwise.
    pub fn finish_lookup(&mut self, request: LookupRequest, result: Result<String, LookupError>) {
        match result {
            Ok(text) => {
                self.screen = Screen::DetailOverlay(Detail {
                    title: request.title,
                    text,
                });
            }
            Err(e) => {
                tracing::warn!(key = %request.key, error = %e, "abstract lookup failed");
                self.status = Some(format!(
                    "Could not load abstract for \"{}\": {}",
                    request.title, e
                ));
            }
        }
    }

    /// Apply `action`, running any resulting lookup to completion before
    /// returning. No further input is read while the lookup is in flight.
    pub async fn dispatch(&mut self, action: Action, provider: &dyn DetailProvider) {
        if let Some(request) = self.update(action) {
            let result = provider.lookup(&request.key).await;
            self.finish_lookup(request, result);
        }
    }
}
