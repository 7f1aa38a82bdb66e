use std::sync::Arc;

use crate::tui::chips::Chips;
use crate::tui::suggestions::Suggestions;
use crate::tui::widget::{BoxRender, ChipBoxWidget, Target};
use crate::{AnchorSource, BackspaceOutcome, Catalog, ChipBoxOptions, Controller};

use super::Event;
use super::Tui;
use super::event::Action;
use super::input::Input;
use color_eyre::eyre::{Result, bail};
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::Backend;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

/// Application state of the search box
pub struct App {
    /// The interaction state machine
    pub controller: Controller,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Whether the user finished with `accept` rather than aborting
    pub accepted: bool,

    /// Current cursor position (x, y)
    pub cursor_pos: (u16, u16),
    /// Bounding box of the input field in the last frame
    pub input_area: Rect,
    /// Area the chips flowed in during the last frame
    pub chips_area: Rect,
    /// Clickable regions of the last frame
    pub regions: BoxRender,

    /// Input field widget
    pub input: Input,
    /// Chip list widget
    pub chips: Chips,
    /// Dropdown widget
    pub suggestions: Suggestions,
    /// Color theme
    pub theme: Arc<crate::theme::ColorTheme>,

    /// Configuration options
    pub options: ChipBoxOptions,
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header_height = u16::from(self.options.header_line().is_some());
        let [header_area, rest] = Layout::vertical([Constraint::Length(header_height), Constraint::Fill(1)]).areas(area);
        if let Some(header) = self.options.header_line() {
            Paragraph::new(header).style(self.theme.header).render(header_area, buf);
        }

        self.chips.update(
            self.controller.selection(),
            self.controller.catalog(),
            self.controller.highlighted_chip(),
        );
        self.input.show_placeholder = self.controller.selection().is_empty();

        // chip lines plus the bottom border
        let box_height = self.chips.height(rest.width).min(rest.height.saturating_sub(1)).max(1) + 1;
        let [box_area, _] = Layout::vertical([Constraint::Length(box_height), Constraint::Fill(1)]).areas(rest);
        let block = Block::new()
            .borders(Borders::BOTTOM)
            .border_style(self.theme.border)
            .style(self.theme.normal);
        let inner = block.inner(box_area);
        block.render(box_area, buf);

        self.chips_area = inner;
        let mut res = self.chips.render(inner, buf);
        let mut input_area = self.chips.layout(inner).input;
        if input_area.y >= inner.bottom() {
            input_area.y = inner.bottom().saturating_sub(1);
        }
        res += self.input.render(input_area, buf);
        self.input_area = input_area;
        self.cursor_pos = (
            input_area.x + self.input.cursor_col().min(input_area.width.saturating_sub(1)),
            input_area.y,
        );

        if self.controller.dropdown_shown() {
            self.suggestions.update(&self.controller, input_area.current_anchor());
            res += self.suggestions.render(area, buf);
        }
        self.regions = res;
    }
}

impl App {
    /// Creates the application state from options, theme and catalog
    pub fn from_options(options: ChipBoxOptions, theme: Arc<crate::theme::ColorTheme>, catalog: Arc<Catalog>) -> Self {
        Self {
            controller: Controller::new(catalog),
            should_quit: false,
            accepted: false,
            cursor_pos: (0, 0),
            input_area: Rect::default(),
            chips_area: Rect::default(),
            regions: BoxRender::default(),
            input: Input::from_options(&options, theme.clone()),
            chips: Chips::from_options(&options, theme.clone()),
            suggestions: Suggestions::from_options(&options, theme.clone()),
            theme,
            options,
        }
    }

    /// Handles a TUI event
    pub fn handle_event<B: Backend>(&mut self, tui: &mut Tui<B>, event: &Event) -> Result<()>
    where
        B::Error: Send + Sync + 'static,
    {
        match event {
            Event::Render => {
                tui.draw(|f| {
                    f.render_widget(&mut *self, f.area());
                    f.set_cursor_position(self.cursor_pos);
                })?;
            }
            Event::Redraw => {
                tui.clear()?;
                tui.event_tx.send(Event::Render)?;
            }
            Event::Error(msg) => {
                tui.exit()?;
                bail!(msg.to_owned());
            }
            Event::Action(act) => {
                for evt in self.handle_action(act) {
                    tui.event_tx.send(evt)?;
                }
            }
            Event::Key(key) => {
                for evt in self.handle_key(key) {
                    tui.event_tx.send(evt)?;
                }
            }
            Event::Paste(text) => {
                self.paste(text);
                tui.event_tx.send(Event::Render)?;
            }
            Event::Mouse(mouse_event) => {
                self.handle_mouse(mouse_event);
                tui.event_tx.send(Event::Render)?;
            }
            Event::Resize => {
                tui.event_tx.send(Event::Render)?;
            }
        };

        Ok(())
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Vec<Event> {
        debug!("key event: {:?}", key);

        if let Some(act) = &self.options.keymap.get(key) {
            debug!("{act:?}");
            return act.iter().map(|a| Event::Action(a.clone())).collect();
        }
        match key.modifiers {
            KeyModifiers::CONTROL => {
                if let Char('c') = key.code {
                    return vec![Event::Action(Action::Abort)];
                }
            }
            KeyModifiers::NONE | KeyModifiers::SHIFT => {
                if let Char(c) = key.code {
                    return vec![Event::Action(Action::AddChar(c))];
                }
            }
            _ => (),
        };
        vec![]
    }

    fn handle_action(&mut self, act: &Action) -> Vec<Event> {
        use Action::*;
        let mut events = vec![];
        match act {
            Abort => {
                self.should_quit = true;
                self.accepted = false;
            }
            Accept => match self.controller.highlighted_suggestion().map(str::to_owned) {
                Some(item) if self.controller.dropdown_shown() => {
                    self.controller.select(&item);
                }
                _ => {
                    self.should_quit = true;
                    self.accepted = true;
                }
            },
            AddChar(c) => {
                self.input.insert(*c);
                self.controller.set_query(self.input.value.clone());
            }
            BackwardChar => self.input.move_backward(),
            ForwardChar => self.input.move_forward(),
            BeginningOfLine => self.input.move_to_start(),
            EndOfLine => self.input.move_to_end(),
            BackwardDeleteChar => {
                let source = match self.controller.selection().last() {
                    Some(last) => self.input_area_without(last),
                    None => self.input_area,
                };
                match self.controller.backspace(&source) {
                    BackspaceOutcome::Passthrough => {
                        if self.input.delete_backward().is_some() {
                            self.controller.set_query(self.input.value.clone());
                        }
                    }
                    outcome => trace!("backspace: {outcome:?}"),
                }
            }
            DeleteChar => {
                if self.input.delete_forward().is_some() {
                    self.controller.set_query(self.input.value.clone());
                }
            }
            UnixLineDiscard => {
                if !self.input.delete_to_beginning().is_empty() {
                    self.controller.set_query(self.input.value.clone());
                }
            }
            Cancel => {
                if self.controller.is_visible() {
                    self.controller.hide_suggestions();
                } else if self.controller.highlight().is_some() {
                    self.controller.clear_highlight();
                } else {
                    self.should_quit = true;
                    self.accepted = false;
                }
            }
            Down(n) => self.navigate(i32::from(*n)),
            Up(n) => self.navigate(-i32::from(*n)),
            Select => match self.controller.highlighted_suggestion().map(str::to_owned) {
                Some(item) if self.controller.dropdown_shown() => {
                    self.controller.select(&item);
                }
                _ => trace!("select: no visible highlighted row"),
            },
            ShowSuggestions => self.controller.click_input(&self.input_area),
            Redraw => events.push(Event::Redraw),
            Ignore => (),
        }
        self.sync_input();
        events.push(Event::Render);
        events
    }

    /// Opens the dropdown when it is closed, moves the highlight otherwise
    fn navigate(&mut self, delta: i32) {
        if self.controller.dropdown_shown() {
            self.controller.move_highlight(delta);
        } else {
            self.controller.click_input(&self.input_area);
        }
    }

    fn paste(&mut self, text: &str) {
        let text: String = text.chars().map(|c| if c.is_control() { ' ' } else { c }).collect();
        if text.is_empty() {
            return;
        }
        self.input.insert_str(&text);
        self.controller.set_query(self.input.value.clone());
    }

    fn handle_mouse(&mut self, mouse_event: &MouseEvent) {
        let target = self.regions.hit_test(mouse_event.column, mouse_event.row).cloned();
        trace!("mouse {:?} on {target:?}", mouse_event.kind);
        match (mouse_event.kind, target) {
            (MouseEventKind::Down(MouseButton::Left), Some(Target::Input)) => {
                self.controller.click_input(&self.input_area);
            }
            (MouseEventKind::Down(MouseButton::Left), Some(Target::Suggestion(item))) => {
                self.controller.select(&item);
            }
            (MouseEventKind::Down(MouseButton::Left), Some(Target::ChipRemove(item))) => {
                let source = self.input_area_without(&item);
                self.controller.remove(&item, &source);
            }
            (MouseEventKind::Moved, Some(Target::Suggestion(item))) => {
                self.controller.hover_suggestion(&item);
            }
            (MouseEventKind::ScrollDown, _) if self.controller.dropdown_shown() => {
                self.controller.move_highlight(1);
            }
            (MouseEventKind::ScrollUp, _) if self.controller.dropdown_shown() => {
                self.controller.move_highlight(-1);
            }
            _ => (),
        }
        self.sync_input();
    }

    /// Where the input field lands once the chip of `item` is gone
    fn input_area_without(&self, item: &str) -> Rect {
        let mut area = self.chips.layout_without(item, self.chips_area).input;
        area.y = area.y.min(self.chips_area.bottom().saturating_sub(1));
        area
    }

    /// Mirrors the controller's query into the text field
    fn sync_input(&mut self) {
        self.input.set_value(self.controller.query());
    }

    /// The selected items, in selection order
    pub fn results(&self) -> Vec<String> {
        self.controller.selection().to_vec()
    }
}
