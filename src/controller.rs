//! The multi-select autocomplete state machine.
//!
//! [`Controller`] owns every piece of state of the search box: the selection,
//! the query text, the suggestion view, the highlight, the dropdown visibility
//! and the dropdown anchor. Each public method is one transition, triggered by
//! one user event, and runs to completion before the next one.
//!
//! ```text
//!            text change                    click row
//!   Idle ───────────────────▶ Typing ───────────────────▶ Idle
//!    │ ▲                        │  ▲
//!    │ │ backspace (2nd)        │  │ text change
//!    ▼ │                        ▼  │
//!   ChipHighlighted      SuggestionHighlighted
//!        ▲   backspace (1st)         ▲   chip remove control
//! ```

use std::sync::Arc;

use crate::anchor::{AnchorSource, Position};
use crate::catalog::Catalog;
use crate::filter::filter;
use crate::selection::Selection;

/// The single item that is the target of the next action
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Highlight {
    /// A selected chip, pending keyboard deletion
    Chip(String),
    /// A suggestion row, pending selection
    Suggestion(String),
}

/// The interaction state, derived from the controller's fields
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionState {
    /// No highlight, dropdown closed
    Idle,
    /// Dropdown open, no highlight
    Typing,
    /// A chip is the delete target
    ChipHighlighted(String),
    /// A suggestion row is emphasized
    SuggestionHighlighted(String),
}

/// What a backspace press did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackspaceOutcome {
    /// The query is not empty: the text field deletes a character itself
    Passthrough,
    /// Nothing to do
    Ignored,
    /// The last chip is now highlighted
    ChipHighlighted(String),
    /// The highlighted last chip was removed
    ChipRemoved(String),
}

/// Multi-select autocomplete controller
#[derive(derive_more::Debug, Clone)]
pub struct Controller {
    #[debug(skip)]
    catalog: Arc<Catalog>,
    selection: Selection,
    suggestions: Vec<String>,
    query: String,
    highlight: Option<Highlight>,
    visible: bool,
    anchor: Option<Position>,
}

impl Controller {
    /// Creates an idle controller with nothing selected
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let selection = Selection::default();
        let suggestions = filter(&catalog, &selection, "");
        Self {
            catalog,
            selection,
            suggestions,
            query: String::new(),
            highlight: None,
            visible: false,
            anchor: None,
        }
    }

    /// The catalog this controller picks from
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The chosen items
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The current suggestion view
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// The current query text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The current highlight, if any
    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    /// The highlighted suggestion row, if the highlight is on a row
    pub fn highlighted_suggestion(&self) -> Option<&str> {
        match &self.highlight {
            Some(Highlight::Suggestion(item)) => Some(item),
            _ => None,
        }
    }

    /// The highlighted chip, if the highlight is on a chip
    pub fn highlighted_chip(&self) -> Option<&str> {
        match &self.highlight {
            Some(Highlight::Chip(item)) => Some(item),
            _ => None,
        }
    }

    /// The visibility flag of the dropdown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the dropdown should be drawn: visible and not empty
    pub fn dropdown_shown(&self) -> bool {
        self.visible && !self.suggestions.is_empty()
    }

    /// Where the dropdown was last anchored
    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    /// Current interaction state
    pub fn state(&self) -> InteractionState {
        match &self.highlight {
            Some(Highlight::Chip(item)) => InteractionState::ChipHighlighted(item.clone()),
            Some(Highlight::Suggestion(item)) => InteractionState::SuggestionHighlighted(item.clone()),
            None if self.visible => InteractionState::Typing,
            None => InteractionState::Idle,
        }
    }

    /// The text of the input field changed
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refresh_suggestions();
        self.visible = true;
        self.highlight = None;
        debug!("query {:?}: {} suggestions", self.query, self.suggestions.len());
    }

    /// The input field was clicked
    pub fn click_input(&mut self, source: &dyn AnchorSource) {
        self.anchor = Some(source.current_anchor());
        self.visible = true;
        self.refresh_suggestions();
        debug!("input clicked, dropdown at {:?}", self.anchor);
    }

    /// Adds a suggestion to the selection
    ///
    /// Clears the query, closes the dropdown and drops the highlight. Returns
    /// false without changing anything when the item is not in the suggestion
    /// view, which includes items that are already selected.
    pub fn select(&mut self, item: &str) -> bool {
        if !self.suggestions.iter().any(|s| s == item) || !self.selection.insert(item) {
            debug!("ignoring select of {item:?}: not a current suggestion");
            return false;
        }
        self.query.clear();
        self.refresh_suggestions();
        self.visible = false;
        self.highlight = None;
        debug!("selected {item:?}, selection: {:?}", self.selection);
        true
    }

    /// Removes a chip from the selection
    ///
    /// The item goes back into the suggestion view at its catalog position
    /// unless it is already there, the anchor is pulled again and the last
    /// suggestion becomes highlighted. Returns false when the item is not
    /// selected.
    pub fn remove(&mut self, item: &str, source: &dyn AnchorSource) -> bool {
        if !self.selection.remove(item) {
            debug!("ignoring remove of {item:?}: not selected");
            return false;
        }
        if !self.suggestions.iter().any(|s| s == item) {
            let idx = self.catalog.index_of(item);
            let at = self
                .suggestions
                .iter()
                .position(|s| self.catalog.index_of(s) > idx)
                .unwrap_or(self.suggestions.len());
            self.suggestions.insert(at, item.to_owned());
        }
        self.anchor = Some(source.current_anchor());
        self.highlight = self.suggestions.last().cloned().map(Highlight::Suggestion);
        debug!("removed {item:?}, highlight: {:?}", self.highlight);
        true
    }

    /// Backspace pressed anywhere
    ///
    /// Only acts on an empty query: the first press highlights the last chip,
    /// the second one removes it. The removal leaves the box idle.
    pub fn backspace(&mut self, source: &dyn AnchorSource) -> BackspaceOutcome {
        if !self.query.is_empty() {
            return BackspaceOutcome::Passthrough;
        }
        let Some(last) = self.selection.last().map(str::to_owned) else {
            return BackspaceOutcome::Ignored;
        };
        match self.highlighted_chip() {
            None => {
                trace!("backspace: highlighting {last:?}");
                self.highlight = Some(Highlight::Chip(last.clone()));
                BackspaceOutcome::ChipHighlighted(last)
            }
            Some(chip) if chip == last => {
                self.remove(&last, source);
                self.highlight = None;
                self.visible = false;
                BackspaceOutcome::ChipRemoved(last)
            }
            Some(chip) => {
                trace!("backspace: {chip:?} is highlighted but is not the last chip");
                BackspaceOutcome::Ignored
            }
        }
    }

    /// The pointer is over a suggestion row
    pub fn hover_suggestion(&mut self, item: &str) {
        if self.suggestions.iter().any(|s| s == item) {
            self.highlight = Some(Highlight::Suggestion(item.to_owned()));
        }
    }

    /// Moves the suggestion highlight by `delta` rows, wrapping around
    pub fn move_highlight(&mut self, delta: i32) {
        if self.suggestions.is_empty() {
            return;
        }
        let len = self.suggestions.len() as i32;
        let next = match self
            .highlighted_suggestion()
            .and_then(|h| self.suggestions.iter().position(|s| s == h))
        {
            Some(current) => (current as i32 + delta).rem_euclid(len),
            None if delta >= 0 => (delta - 1).clamp(0, len - 1),
            None => (len + delta).clamp(0, len - 1),
        };
        self.highlight = Some(Highlight::Suggestion(self.suggestions[next as usize].clone()));
    }

    /// Explicit deselect
    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    /// Closes the dropdown
    pub fn hide_suggestions(&mut self) {
        self.visible = false;
        if self.highlighted_suggestion().is_some() {
            self.highlight = None;
        }
    }

    fn refresh_suggestions(&mut self) {
        self.suggestions = filter(&self.catalog, &self.selection, &self.query);
    }
}
