//! Terminal UI components and rendering.
//!
//! This module renders a [`Controller`](crate::Controller) with ratatui and
//! turns terminal events into controller transitions.

use std::num::ParseIntError;

pub use app::App;
pub use backend::{EventSubscription, Tui};
pub use event::Event;
use thiserror::Error;
pub use widget::{BoxRender, ChipBoxWidget, HitRegion, Target};
mod app;
mod backend;
/// Chip flow layout and rendering
pub mod chips;
/// Event handling and action definitions
pub mod event;
mod input;
/// The floating suggestion dropdown
pub mod suggestions;
/// Widget rendering utilities
pub mod widget;

/// Represents a size value, either as a percentage or fixed value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Size {
    /// Size as a percentage (0-100)
    Percent(u16),
    /// Fixed size in terminal cells
    Fixed(u16),
}

impl Size {
    /// Number of cells out of `total`, never more than `total`
    pub fn resolve(self, total: u16) -> u16 {
        match self {
            Size::Percent(p) => (u32::from(total) * u32::from(p) / 100) as u16,
            Size::Fixed(n) => n.min(total),
        }
    }
}

/// Error type for parsing size values
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SizeParseError {
    /// Error parsing the size string
    #[error("Error parsing {0}: {1:?}")]
    ParseError(String, ParseIntError),
    /// Percentage value exceeds 100
    #[error("Invalid percentage {0}")]
    InvalidPercent(u16),
}

impl TryFrom<&str> for Size {
    type Error = SizeParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if let Some(percent) = value.strip_suffix('%') {
            let percent = percent
                .parse::<u16>()
                .map_err(|e| SizeParseError::ParseError(value.to_string(), e))?;
            if percent > 100 {
                return Err(SizeParseError::InvalidPercent(percent));
            }
            Ok(Self::Percent(percent))
        } else {
            Ok(Self::Fixed(
                value
                    .parse::<u16>()
                    .map_err(|e| SizeParseError::ParseError(value.to_string(), e))?,
            ))
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::Percent(100)
    }
}
