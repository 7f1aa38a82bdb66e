//! Chipbox is a multi-select autocomplete search box for the terminal.
//!
//! The user types into a text field, picks entries from a filtered dropdown
//! and sees every picked entry as a removable chip. All of the interaction
//! logic lives in [`Controller`], which is independent of the terminal and can
//! be driven directly; the [`tui`] module renders it with ratatui.
//!
//! # Examples
//!
//! ```no_run
//! use chipbox::prelude::*;
//!
//! let options = ChipBoxOptionsBuilder::default()
//!     .height(String::from("40%"))
//!     .build()
//!     .unwrap();
//!
//! let output = ChipBox::run_with(options, Catalog::regions()).unwrap();
//! for item in output.selected {
//!     println!("{item}");
//! }
//! ```
//!
//! Driving the controller without a terminal:
//!
//! ```
//! use std::sync::Arc;
//! use chipbox::{Catalog, Controller, Position};
//!
//! let mut controller = Controller::new(Arc::new(Catalog::regions()));
//! controller.set_query("har");
//! assert_eq!(controller.suggestions(), ["Haryana"]);
//! controller.select("Haryana");
//! assert_eq!(controller.selection().to_vec(), ["Haryana"]);
//! controller.remove("Haryana", &Position { top: 2, left: 0 });
//! assert!(controller.selection().is_empty());
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub use crate::anchor::{AnchorSource, Position};
pub use crate::catalog::{Catalog, CatalogError};
pub use crate::chipbox::ChipBox;
pub use crate::controller::{BackspaceOutcome, Controller, Highlight, InteractionState};
pub use crate::filter::filter;
pub use crate::options::ChipBoxOptions;
pub use crate::output::ChipBoxOutput;
pub use crate::selection::Selection;

pub mod anchor;
pub mod binds;
pub mod catalog;
mod chipbox;
pub mod controller;
pub mod filter;
pub mod options;
mod output;
pub mod prelude;
pub mod selection;
pub mod theme;
pub mod tui;
