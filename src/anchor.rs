//! Dropdown anchoring.
//!
//! The dropdown floats right below the input field. Its position is pulled
//! from the live geometry of the input at the moment of a click or a chip
//! removal instead of being tracked continuously, so a resize between two
//! events can never leave a stale anchor behind.

use ratatui::layout::Rect;

/// Screen coordinate the suggestion dropdown is attached to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Row right below the input field
    pub top: u16,
    /// Left column of the input field
    pub left: u16,
}

/// Pull-based query for the current anchor of the dropdown
pub trait AnchorSource {
    /// Reads the anchor from the current on-screen geometry
    fn current_anchor(&self) -> Position;
}

/// The bounding box of the input field, as laid out in the last frame
impl AnchorSource for Rect {
    fn current_anchor(&self) -> Position {
        Position {
            top: self.bottom(),
            left: self.x,
        }
    }
}

impl AnchorSource for Position {
    fn current_anchor(&self) -> Position {
        *self
    }
}
