//! Convenience re-exports of commonly used types.
//!
//! `use chipbox::prelude::*;` brings the runner, the options builder and the
//! domain types into scope.

pub use crate::options::{ChipBoxOptions, ChipBoxOptionsBuilder};
pub use crate::output::ChipBoxOutput;
pub use crate::tui::{Event, event::Action};
pub use crate::*;
pub use std::sync::Arc;
