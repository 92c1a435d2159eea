/// User intent decoded from a terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Append a printable character to the query.
    Input(char),
    /// Remove the last character of the query.
    Backspace,
    MoveUp,
    MoveDown,
    /// Open the abstract of the selected talk.
    Activate,
    /// Close the abstract overlay.
    Dismiss,
    /// Leave the application (Esc, Ctrl+C).
    Cancel,
    Resize(u16, u16),
    None,
}
