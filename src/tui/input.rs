use std::ops::Deref;
use std::sync::Arc;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_display_width::width as display_width;

use crate::tui::widget::{BoxRender, ChipBoxWidget, Target};
use crate::{ChipBoxOptions, theme::ColorTheme};

/// The text field of the search box
///
/// `cursor_pos` is a byte offset into `value` and always sits on a char boundary.
pub struct Input {
    pub prompt: String,
    pub value: String,
    pub cursor_pos: usize,
    pub placeholder: String,
    /// Whether the placeholder may be shown, i.e. nothing is selected
    pub show_placeholder: bool,
    pub theme: Arc<ColorTheme>,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            value: String::new(),
            cursor_pos: 0,
            placeholder: String::new(),
            show_placeholder: true,
            theme: Arc::new(ColorTheme::default()),
        }
    }
}

impl Input {
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }
    pub fn insert_str(&mut self, s: &str) {
        self.value.insert_str(self.cursor_pos, s);
        self.cursor_pos += s.len();
    }
    /// Deletes the char before the cursor
    pub fn delete_backward(&mut self) -> Option<char> {
        let (idx, _) = self.value[..self.cursor_pos].char_indices().next_back()?;
        self.cursor_pos = idx;
        Some(self.value.remove(idx))
    }
    /// Deletes the char under the cursor
    pub fn delete_forward(&mut self) -> Option<char> {
        if self.cursor_pos >= self.value.len() {
            return None;
        }
        Some(self.value.remove(self.cursor_pos))
    }
    pub fn move_backward(&mut self) {
        if let Some((idx, _)) = self.value[..self.cursor_pos].char_indices().next_back() {
            self.cursor_pos = idx;
        }
    }
    pub fn move_forward(&mut self) {
        if let Some(c) = self.value[self.cursor_pos..].chars().next() {
            self.cursor_pos += c.len_utf8();
        }
    }
    pub fn move_to_start(&mut self) {
        self.cursor_pos = 0;
    }
    pub fn move_to_end(&mut self) {
        self.cursor_pos = self.value.len();
    }
    pub fn delete_to_beginning(&mut self) -> String {
        let deleted: String = self.value.drain(..self.cursor_pos).collect();
        self.cursor_pos = 0;
        deleted
    }
    /// Replaces the whole value, keeping the cursor at the end
    pub fn set_value(&mut self, value: &str) {
        if self.value != value {
            self.value = value.to_owned();
            self.cursor_pos = self.value.len();
        }
    }
    /// Display column of the cursor, relative to the start of the field
    pub fn cursor_col(&self) -> u16 {
        let cols = display_width(&self.prompt) + display_width(&self.value[..self.cursor_pos]);
        cols.try_into().unwrap_or(u16::MAX)
    }
}

impl ChipBoxWidget for Input {
    fn from_options(options: &ChipBoxOptions, theme: Arc<ColorTheme>) -> Self {
        Self {
            prompt: options.prompt.clone(),
            placeholder: options.placeholder.clone(),
            theme,
            ..Default::default()
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) -> BoxRender {
        let prompt_span = Span::styled(&self.prompt, self.theme.prompt);
        let value_span = if self.value.is_empty() && self.show_placeholder {
            Span::styled(&self.placeholder, self.theme.placeholder)
        } else {
            Span::styled(&self.value, self.theme.query)
        };
        Paragraph::new(Line::from(vec![prompt_span, value_span]))
            .style(self.theme.normal)
            .render(area, buf);

        BoxRender::single(area, Target::Input)
    }
}

impl Deref for Input {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}
