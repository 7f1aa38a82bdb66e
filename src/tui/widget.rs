use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use std::ops::AddAssign;
use std::sync::Arc;

use crate::options::ChipBoxOptions;
use crate::theme::ColorTheme;

/// What a screen cell belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The text input field
    Input,
    /// The body of a chip
    Chip(String),
    /// The delete control of a chip
    ChipRemove(String),
    /// A dropdown row
    Suggestion(String),
}

/// A clickable area of the last frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    /// Screen area
    pub area: Rect,
    /// What a click there means
    pub target: Target,
}

/// Result of rendering a ChipBoxWidget
#[derive(Debug, Clone, Default)]
pub struct BoxRender {
    /// Clickable regions, in drawing order
    pub regions: Vec<HitRegion>,
}

impl BoxRender {
    /// A render result made of one region
    pub fn single(area: Rect, target: Target) -> Self {
        Self {
            regions: vec![HitRegion { area, target }],
        }
    }

    /// The topmost region under the cell, later regions are drawn over earlier ones
    pub fn hit_test(&self, x: u16, y: u16) -> Option<&Target> {
        self.regions
            .iter()
            .rev()
            .find(|r| r.area.contains(Position { x, y }))
            .map(|r| &r.target)
    }
}

impl AddAssign for BoxRender {
    fn add_assign(&mut self, rhs: Self) {
        self.regions.extend(rhs.regions);
    }
}

/// Trait for the search box widgets
pub trait ChipBoxWidget: Sized {
    /// Create a widget from options and theme
    fn from_options(options: &ChipBoxOptions, theme: Arc<ColorTheme>) -> Self;

    /// Render the widget to the buffer
    fn render(&mut self, area: Rect, buf: &mut Buffer) -> BoxRender;
}
