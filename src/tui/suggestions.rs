//! The dropdown of suggestions, floating over the area below the input.

use std::sync::Arc;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::anchor::Position;
use crate::controller::Controller;
use crate::theme::ColorTheme;
use crate::tui::Size;
use crate::tui::chips::ChipItem;
use crate::tui::widget::{BoxRender, ChipBoxWidget, HitRegion, Target};
use crate::ChipBoxOptions;

const MIN_WIDTH: u16 = 8;

/// Bordered list of the current suggestion view
pub struct Suggestions {
    /// Rows, in suggestion order
    pub items: Vec<ChipItem>,
    /// Index of the highlighted row
    pub highlighted: Option<usize>,
    /// Top-left corner of the popup
    pub anchor: Position,
    /// Popup width
    pub width: Size,
    /// Maximum number of rows
    pub max_height: u16,
    /// First visible row
    pub offset: usize,
    /// Color theme
    pub theme: Arc<ColorTheme>,
    /// Thumbnail glyph of items with an image
    pub image_icon: String,
    /// Thumbnail glyph of items without one
    pub placeholder_icon: String,
}

impl Suggestions {
    /// Mirrors the suggestion view, `fallback` is used until the controller has an anchor
    pub fn update(&mut self, controller: &Controller, fallback: Position) {
        let catalog = controller.catalog();
        self.items = controller
            .suggestions()
            .iter()
            .map(|label| ChipItem {
                label: label.clone(),
                has_image: catalog.has_image(label),
            })
            .collect();
        self.highlighted = controller
            .highlighted_suggestion()
            .and_then(|h| self.items.iter().position(|i| i.label == h));
        self.anchor = controller.anchor().unwrap_or(fallback);
    }

    /// Moves the offset so that the highlighted row is one of `rows` visible rows
    fn scroll(&mut self, rows: usize) {
        if let Some(h) = self.highlighted {
            if h < self.offset {
                self.offset = h;
            } else if h >= self.offset + rows {
                self.offset = h + 1 - rows;
            }
        }
        self.offset = self.offset.min(self.items.len().saturating_sub(rows));
    }
}

impl ChipBoxWidget for Suggestions {
    fn from_options(options: &ChipBoxOptions, theme: Arc<ColorTheme>) -> Self {
        let width = Size::try_from(options.dropdown_width.as_str()).unwrap_or_else(|e| {
            warn!("invalid dropdown width: {e}");
            Size::Fixed(40)
        });
        Self {
            items: Vec::new(),
            highlighted: None,
            anchor: Position::default(),
            width,
            max_height: options.dropdown_height.max(1),
            offset: 0,
            theme,
            image_icon: options.image_icon.clone(),
            placeholder_icon: options.placeholder_icon.clone(),
        }
    }

    /// Renders inside `area`, the whole space the dropdown may float over
    fn render(&mut self, area: Rect, buf: &mut Buffer) -> BoxRender {
        let x = self.anchor.left.max(area.x);
        let y = self.anchor.top.max(area.y);
        if self.items.is_empty() || x >= area.right() || y >= area.bottom() {
            return BoxRender::default();
        }
        let width = self.width.resolve(area.width).max(MIN_WIDTH).min(area.right() - x);
        let rows = self
            .items
            .len()
            .min(self.max_height.into())
            .min((area.bottom() - y).saturating_sub(2).into());
        if rows == 0 {
            trace!("no room for the dropdown at {:?}", self.anchor);
            return BoxRender::default();
        }
        self.scroll(rows);

        let popup = Rect::new(x, y, width, rows as u16 + 2);
        let block = Block::bordered().border_style(self.theme.border);
        let inner = block.inner(popup);
        Clear.render(popup, buf);
        block.render(popup, buf);

        let mut res = BoxRender::default();
        for (i, item) in self.items.iter().enumerate().skip(self.offset).take(rows) {
            let row = Rect::new(inner.x, inner.y + (i - self.offset) as u16, inner.width, 1);
            let style = if self.highlighted == Some(i) {
                self.theme.suggestion.patch(self.theme.suggestion_highlight)
            } else {
                self.theme.suggestion
            };
            let icon = if item.has_image {
                &self.image_icon
            } else {
                &self.placeholder_icon
            };
            Paragraph::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(icon, style.patch(self.theme.thumbnail)),
                Span::raw(format!(" {}", item.label)),
            ]))
            .style(style)
            .render(row, buf);
            res.regions.push(HitRegion {
                area: row,
                target: Target::Suggestion(item.label.clone()),
            });
        }
        res
    }
}
