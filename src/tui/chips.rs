//! Selected items drawn as chips, flowing left to right and wrapping.
//!
//! A chip reads ` <icon> <label> <remove> `. The input field takes the rest of
//! the last line, or a line of its own when less than [`INPUT_MIN_WIDTH`]
//! columns are left.

use std::sync::Arc;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_display_width::width as display_width;

use crate::catalog::Catalog;
use crate::selection::Selection;
use crate::theme::ColorTheme;
use crate::tui::widget::{BoxRender, ChipBoxWidget, HitRegion, Target};
use crate::ChipBoxOptions;

/// Columns between two chips
pub const GAP: u16 = 1;
/// Narrowest input field next to the chips
pub const INPUT_MIN_WIDTH: u16 = 10;

fn width(s: &str) -> u16 {
    display_width(s).try_into().unwrap_or(u16::MAX)
}

/// Where the chips and the input field go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowLayout {
    /// One rect per chip, in selection order
    pub chips: Vec<Rect>,
    /// The input field
    pub input: Rect,
    /// Number of lines used
    pub height: u16,
}

/// Lays out items of the given widths on single-line rows inside `area`
pub fn flow(widths: &[u16], input_min: u16, area: Rect) -> FlowLayout {
    let (mut x, mut y) = (area.x, area.y);
    let mut chips = Vec::with_capacity(widths.len());
    for w in widths {
        let w = (*w).min(area.width);
        if x > area.x && x.saturating_add(w) > area.right() {
            x = area.x;
            y = y.saturating_add(1);
        }
        chips.push(Rect::new(x, y, w, 1));
        x = x.saturating_add(w).saturating_add(GAP);
    }
    if x > area.x && x.saturating_add(input_min) > area.right() {
        x = area.x;
        y = y.saturating_add(1);
    }
    let input = Rect::new(x, y, area.right().saturating_sub(x), 1);
    FlowLayout {
        chips,
        input,
        height: y - area.y + 1,
    }
}

/// A chip to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipItem {
    /// The selected item
    pub label: String,
    /// False when the catalog has no image for it
    pub has_image: bool,
}

/// The chip list of the search box
pub struct Chips {
    /// One entry per selected item, in selection order
    pub items: Vec<ChipItem>,
    /// Label of the highlighted chip
    pub highlighted: Option<String>,
    /// Color theme
    pub theme: Arc<ColorTheme>,
    /// Thumbnail glyph of items with an image
    pub image_icon: String,
    /// Thumbnail glyph of items without one
    pub placeholder_icon: String,
    /// Glyph of the delete control
    pub remove_icon: String,
}

impl Chips {
    /// Mirrors the selection and the chip highlight
    pub fn update(&mut self, selection: &Selection, catalog: &Catalog, highlighted: Option<&str>) {
        self.items = selection
            .iter()
            .map(|label| ChipItem {
                label: label.to_owned(),
                has_image: catalog.has_image(label),
            })
            .collect();
        self.highlighted = highlighted.map(str::to_owned);
    }

    fn icon(&self, item: &ChipItem) -> &str {
        if item.has_image {
            &self.image_icon
        } else {
            &self.placeholder_icon
        }
    }

    /// Width of the part before the remove control
    fn body_width(&self, item: &ChipItem) -> u16 {
        width(self.icon(item))
            .saturating_add(width(&item.label))
            .saturating_add(3)
    }

    fn chip_width(&self, item: &ChipItem) -> u16 {
        self.body_width(item)
            .saturating_add(width(&self.remove_icon))
            .saturating_add(1)
    }

    /// Chips and input positions inside `area`
    pub fn layout(&self, area: Rect) -> FlowLayout {
        let widths: Vec<u16> = self.items.iter().map(|i| self.chip_width(i)).collect();
        flow(&widths, INPUT_MIN_WIDTH, area)
    }

    /// Chips and input positions inside `area` once `label` is gone
    pub fn layout_without(&self, label: &str, area: Rect) -> FlowLayout {
        let widths: Vec<u16> = self
            .items
            .iter()
            .filter(|i| i.label != label)
            .map(|i| self.chip_width(i))
            .collect();
        flow(&widths, INPUT_MIN_WIDTH, area)
    }

    /// Lines needed at the given width
    pub fn height(&self, width: u16) -> u16 {
        self.layout(Rect::new(0, 0, width, u16::MAX)).height
    }
}

impl ChipBoxWidget for Chips {
    fn from_options(options: &ChipBoxOptions, theme: Arc<ColorTheme>) -> Self {
        Self {
            items: Vec::new(),
            highlighted: None,
            theme,
            image_icon: options.image_icon.clone(),
            placeholder_icon: options.placeholder_icon.clone(),
            remove_icon: options.remove_icon.clone(),
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) -> BoxRender {
        let layout = self.layout(area);
        let mut res = BoxRender::default();
        for (item, rect) in self.items.iter().zip(layout.chips) {
            if rect.y >= area.bottom() {
                break;
            }
            let style = if self.highlighted.as_deref() == Some(item.label.as_str()) {
                self.theme.chip_highlight
            } else {
                self.theme.chip
            };
            let line = Line::from(vec![
                Span::raw(" "),
                Span::styled(self.icon(item), style.patch(self.theme.thumbnail)),
                Span::raw(format!(" {} ", item.label)),
                Span::styled(&self.remove_icon, style.patch(self.theme.remove)),
                Span::raw(" "),
            ])
            .style(style);
            Paragraph::new(line).render(rect, buf);

            let body = self.body_width(item);
            let remove = Rect::new(rect.x.saturating_add(body), rect.y, width(&self.remove_icon), 1)
                .intersection(rect);
            res.regions.push(HitRegion {
                area: rect,
                target: Target::Chip(item.label.clone()),
            });
            res.regions.push(HitRegion {
                area: remove,
                target: Target::ChipRemove(item.label.clone()),
            });
        }
        res
    }
}
