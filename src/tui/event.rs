use crossterm::event::{KeyEvent, MouseEvent};

/// Events that can occur while the search box runs
#[derive(Clone, Debug)]
pub enum Event {
    /// An error occurred
    Error(String),
    /// Render the UI
    Render,
    /// A key was pressed
    Key(KeyEvent),
    /// Text was pasted (bracketed paste)
    Paste(String),
    /// A mouse event occurred
    Mouse(MouseEvent),
    /// An action was triggered
    Action(Action),
    /// Redraw the screen
    Redraw,
    /// The terminal was resized
    Resize,
}

/// Actions that can be bound to keys
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Action {
    /// Abort and exit with error
    Abort,
    /// Select the highlighted suggestion if the dropdown is open, finish otherwise
    Accept,
    /// Add a character to the query
    AddChar(char),
    /// Move cursor backward one character
    BackwardChar,
    /// Delete character before cursor, or highlight/remove the last chip
    BackwardDeleteChar,
    /// Move cursor to beginning of line
    BeginningOfLine,
    /// Close the dropdown, or abort when it is already closed
    Cancel,
    /// Delete character under cursor
    DeleteChar,
    /// Move the suggestion highlight down by N rows
    Down(u16),
    /// Move cursor to end of line
    EndOfLine,
    /// Move cursor forward one character
    ForwardChar,
    /// Do nothing
    Ignore,
    /// Redraw the screen
    Redraw,
    /// Select the highlighted suggestion
    Select,
    /// Open the dropdown as if the input field was clicked
    ShowSuggestions,
    /// Delete from cursor to beginning of line
    UnixLineDiscard,
    /// Move the suggestion highlight up by N rows
    Up(u16),
}

/// Parses an action from its `--bind` name, e.g. `down` or `down(3)`
pub fn parse_action(raw_action: &str) -> Option<Action> {
    let (action, arg) = match raw_action.split_once([':', '(']) {
        None => (raw_action, None),
        Some((act, a)) => (act, Some(a.trim_end_matches(')'))),
    };
    let count = || arg.and_then(|s| s.parse().ok()).unwrap_or(1);
    trace!("parse_action: action={action}, arg={arg:?}");

    use Action::*;
    match action {
        "abort" => Some(Abort),
        "accept" => Some(Accept),
        "backward-char" => Some(BackwardChar),
        "backward-delete-char" => Some(BackwardDeleteChar),
        "beginning-of-line" => Some(BeginningOfLine),
        "cancel" => Some(Cancel),
        "delete-char" => Some(DeleteChar),
        "down" => Some(Down(count())),
        "end-of-line" => Some(EndOfLine),
        "forward-char" => Some(ForwardChar),
        "ignore" => Some(Ignore),
        "redraw" => Some(Redraw),
        "select" => Some(Select),
        "show-suggestions" => Some(ShowSuggestions),
        "unix-line-discard" => Some(UnixLineDiscard),
        "up" => Some(Up(count())),
        _ => None,
    }
}
