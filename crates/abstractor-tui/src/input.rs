use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C is the interrupt and always cancels
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Cancel;
            }

            match input_mode {
                InputMode::Search => map_key_search(key),
                InputMode::Overlay => Action::Dismiss,
            }
        }
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_key_search(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::Cancel,
        KeyCode::Enter => Action::Activate,
        KeyCode::Up => Action::MoveUp,
        KeyCode::Down => Action::MoveDown,
        KeyCode::Backspace | KeyCode::Delete => Action::Backspace,
        KeyCode::Char(c)
            if !c.is_control()
                && !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Action::Input(c)
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn printable_keys_are_query_text() {
        for c in ['a', 'q', 'j', ' ', '?'] {
            assert_eq!(
                map_event(&press(KeyCode::Char(c)), InputMode::Search),
                Action::Input(c)
            );
        }
        let shifted = Event::Key(KeyEvent::new(KeyCode::Char('T'), KeyModifiers::SHIFT));
        assert_eq!(map_event(&shifted, InputMode::Search), Action::Input('T'));
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(map_event(&press(KeyCode::Up), InputMode::Search), Action::MoveUp);
        assert_eq!(map_event(&press(KeyCode::Down), InputMode::Search), Action::MoveDown);
        assert_eq!(map_event(&press(KeyCode::Enter), InputMode::Search), Action::Activate);
        assert_eq!(map_event(&press(KeyCode::Esc), InputMode::Search), Action::Cancel);
        assert_eq!(
            map_event(&press(KeyCode::Backspace), InputMode::Search),
            Action::Backspace
        );
        assert_eq!(map_event(&press(KeyCode::Delete), InputMode::Search), Action::Backspace);
        assert_eq!(map_event(&press(KeyCode::F(1)), InputMode::Search), Action::None);
    }

    #[test]
    fn ctrl_c_cancels_in_every_mode() {
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(&ctrl_c, InputMode::Search), Action::Cancel);
        assert_eq!(map_event(&ctrl_c, InputMode::Overlay), Action::Cancel);
    }

    #[test]
    fn any_key_dismisses_overlay() {
        for code in [KeyCode::Char('x'), KeyCode::Esc, KeyCode::Enter, KeyCode::F(5)] {
            assert_eq!(map_event(&press(code), InputMode::Overlay), Action::Dismiss);
        }
    }

    #[test]
    fn key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event(&release, InputMode::Search), Action::None);
    }

    #[test]
    fn resize_is_forwarded() {
        assert_eq!(
            map_event(&Event::Resize(120, 40), InputMode::Overlay),
            Action::Resize(120, 40)
        );
    }
}
