//! Configuration options for the search box.
//!
//! This module provides the `ChipBoxOptions` struct and builder for configuring
//! the catalog, the texts, the layout, the colors and the key bindings.

use derive_builder::Builder;

use crate::binds::KeyMap;

/// chipbox - multi-select autocomplete search box
///
/// Type to filter the catalog, pick entries from the dropdown and remove them
/// again from the chips. The selected entries are printed on exit.
#[derive(Builder, Clone, Debug)]
#[builder(build_fn(name = "final_build"))]
#[builder(default)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(
    feature = "cli",
    command(name = "chipbox", args_override_self = true, verbatim_doc_comment, version, about)
)]
pub struct ChipBoxOptions {
    //  --- Catalog ---
    /// Read the catalog from a RON file
    ///
    /// The file holds a list of `(name: "...", image: Some("..."))` records,
    /// `image` may be omitted. Defaults to the built-in list of regions.
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Catalog", verbatim_doc_comment))]
    pub catalog: Option<String>,

    //  --- Interface ---
    /// Comma separated list of bindings
    ///
    /// Each key binding expression follows the format `<key>:<action>`, and
    /// multiple actions can be chained using `+`.
    ///
    /// **Example**: `chipbox --bind 'ctrl-j:down,ctrl-k:up,enter:select+show-suggestions'`
    #[cfg_attr(
        feature = "cli",
        arg(short, long, help_heading = "Interface", verbatim_doc_comment, default_value = "", num_args=0..)
    )]
    pub bind: Vec<String>,

    /// Set color theme
    ///
    /// Format: [BASE][,COMPONENT:COLOR[:ATTR1:ATTR2:..]]
    /// BASE is one of dark, light, 16, bw, none
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Interface", verbatim_doc_comment))]
    pub color: Option<String>,

    /// Glyph for items with an image
    #[cfg_attr(feature = "cli", arg(long, default_value = "◉", help_heading = "Interface"))]
    pub image_icon: String,

    /// Glyph for items whose image is missing
    #[cfg_attr(feature = "cli", arg(long, default_value = "○", help_heading = "Interface"))]
    pub placeholder_icon: String,

    /// Glyph of the remove control of a chip
    #[cfg_attr(feature = "cli", arg(long, default_value = "x", help_heading = "Interface"))]
    pub remove_icon: String,

    //  --- Layout ---
    /// Height of the search box
    ///
    /// Can either be a row count or a percentage
    #[cfg_attr(feature = "cli", arg(long, default_value = "100%", help_heading = "Layout"))]
    pub height: String,

    /// Maximum number of rows in the dropdown
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 8, help_heading = "Layout"))]
    pub dropdown_height: u16,

    /// Width of the dropdown
    ///
    /// Can either be a column count or a percentage of the terminal width
    #[cfg_attr(feature = "cli", arg(long, default_value = "40", help_heading = "Layout"))]
    pub dropdown_width: String,

    /// Header line shown above the box
    #[cfg_attr(feature = "cli", arg(long, default_value = "Select all the states", help_heading = "Layout"))]
    pub header: String,

    /// Do not show the header line
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Layout"))]
    pub no_header: bool,

    /// Text shown in the empty input while nothing is selected
    #[cfg_attr(feature = "cli", arg(long, default_value = "Search...", help_heading = "Layout"))]
    pub placeholder: String,

    /// Prompt in front of the input field
    #[cfg_attr(feature = "cli", arg(long, default_value = "", help_heading = "Layout"))]
    pub prompt: String,

    //  --- Scripting ---
    /// Filter mode. Print the suggestions for the query and exit
    #[cfg_attr(feature = "cli", arg(short, long, help_heading = "Scripting"))]
    pub filter: Option<String>,

    /// Print output delimited by ASCII NUL(\\0) characters
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Scripting"))]
    pub print0: bool,

    /// The internal (parsed) keymap
    #[cfg_attr(feature = "cli", clap(skip))]
    pub keymap: KeyMap,
}

impl Default for ChipBoxOptions {
    fn default() -> Self {
        Self {
            catalog: Default::default(),
            bind: Default::default(),
            color: Default::default(),
            image_icon: String::from("◉"),
            placeholder_icon: String::from("○"),
            remove_icon: String::from("x"),
            height: String::from("100%"),
            dropdown_height: 8,
            dropdown_width: String::from("40"),
            header: String::from("Select all the states"),
            no_header: Default::default(),
            placeholder: String::from("Search..."),
            prompt: Default::default(),
            filter: Default::default(),
            print0: Default::default(),
            keymap: Default::default(),
        }
    }
}

impl ChipBoxOptionsBuilder {
    /// Builds the ChipBoxOptions from the builder
    pub fn build(&mut self) -> Result<ChipBoxOptions, ChipBoxOptionsBuilderError> {
        self.final_build().map(|opts| opts.build())
    }
}

impl ChipBoxOptions {
    /// Finalizes the options by parsing the key bindings
    pub fn build(mut self) -> Self {
        self.keymap = self.bind.iter().fold(KeyMap::default(), |mut res, part| {
            res.add_keymaps(part.split(','));
            res
        });
        self
    }

    /// The header line, unless disabled or empty
    pub fn header_line(&self) -> Option<&str> {
        (!self.no_header && !self.header.is_empty()).then_some(self.header.as_str())
    }
}
