use chipbox::{
    ChipBox, Position,
    prelude::*,
    tui::{Event, Target, Tui, event::Action},
};
use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::OptionExt;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;

/// A test harness driving a [`ChipBox<TestBackend>`] synchronously.
///
/// Events go through the same channel and the same `App::handle_event` as in
/// the real event loop, only the terminal subscription is missing. Every
/// handled input queues a render, so the buffer is current after each call.
pub struct TestHarness {
    /// The search box, rendering into a TestBackend
    pub chipbox: ChipBox<TestBackend>,
}

impl TestHarness {
    /// Process all pending events, including the ones queued while processing.
    pub fn tick(&mut self) -> Result<()> {
        loop {
            let mut events = Vec::new();
            while let Ok(event) = self.chipbox.tui_mut().event_rx.try_recv() {
                events.push(event);
            }
            if events.is_empty() {
                break;
            }
            for event in events {
                let (app, tui) = self.chipbox.app_and_tui();
                app.handle_event(tui, &event)?;
            }
        }
        Ok(())
    }

    /// Queue an event. Call `tick()` to process it.
    pub fn send(&mut self, event: Event) -> Result<()> {
        self.chipbox.tui_mut().event_tx.send(event)?;
        Ok(())
    }

    /// Send a key event and process it.
    pub fn key(&mut self, key: KeyEvent) -> Result<()> {
        self.send(Event::Key(key))?;
        self.tick()
    }

    /// Send a character key event.
    pub fn char(&mut self, c: char) -> Result<()> {
        self.key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    /// Type a string, one key event per character.
    pub fn type_str(&mut self, s: &str) -> Result<()> {
        for c in s.chars() {
            self.char(c)?;
        }
        Ok(())
    }

    /// Send an action and process it.
    pub fn action(&mut self, action: Action) -> Result<()> {
        self.send(Event::Action(action))?;
        self.tick()
    }

    /// Send a bracketed paste and process it.
    pub fn paste(&mut self, text: &str) -> Result<()> {
        self.send(Event::Paste(text.to_owned()))?;
        self.tick()
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) -> Result<()> {
        self.send(Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))?;
        self.tick()
    }

    /// Left click on a cell.
    pub fn click(&mut self, column: u16, row: u16) -> Result<()> {
        self.mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    /// Move the pointer over a cell.
    pub fn hover(&mut self, column: u16, row: u16) -> Result<()> {
        self.mouse(MouseEventKind::Moved, column, row)
    }

    /// Scroll the wheel over a cell, downwards if `down`.
    pub fn scroll(&mut self, column: u16, row: u16, down: bool) -> Result<()> {
        let kind = if down {
            MouseEventKind::ScrollDown
        } else {
            MouseEventKind::ScrollUp
        };
        self.mouse(kind, column, row)
    }

    /// Left click on the first cell of a region of the last frame.
    pub fn click_target(&mut self, target: &Target) -> Result<()> {
        let area = self
            .chipbox
            .app()
            .regions
            .regions
            .iter()
            .find(|r| &r.target == target)
            .map(|r| r.area)
            .ok_or_eyre("target is not on screen")?;
        self.click(area.x, area.y)
    }

    /// Render the current state into the buffer.
    pub fn render(&mut self) -> Result<()> {
        self.send(Event::Render)?;
        self.tick()
    }

    /// One line of the buffer, without trailing blanks.
    pub fn line(&self, y: u16) -> String {
        let buf = self.chipbox.tui_ref().backend().buffer();
        let line: String = (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect();
        line.trim_end().to_owned()
    }

    /// The whole buffer, one line per row.
    pub fn buffer_view(&self) -> String {
        let height = self.chipbox.tui_ref().backend().buffer().area.height;
        (0..height).map(|y| self.line(y)).collect::<Vec<_>>().join("\n")
    }

    /// The dropdown rows of the last frame, top to bottom.
    pub fn dropdown(&self) -> Vec<String> {
        self.chipbox
            .app()
            .regions
            .regions
            .iter()
            .filter_map(|r| match &r.target {
                Target::Suggestion(item) => Some(item.clone()),
                _ => None,
            })
            .collect()
    }

    /// The selected items.
    pub fn selected(&self) -> Vec<String> {
        self.chipbox.app().results()
    }

    /// The current query.
    pub fn query(&self) -> &str {
        self.chipbox.app().controller.query()
    }

    /// The last dropdown anchor pulled by the controller.
    pub fn anchor(&self) -> Option<Position> {
        self.chipbox.app().controller.anchor()
    }

    /// The exit code the binary would return, None while running.
    ///
    /// This mimics `bin/main.rs`: 130 on abort, 1 for an empty accepted
    /// selection, 0 otherwise.
    pub fn app_exit_code(&self) -> Option<i32> {
        let app = self.chipbox.app();
        if !app.should_quit {
            return None;
        }
        Some(match (app.accepted, app.results().is_empty()) {
            (false, _) => 130,
            (true, true) => 1,
            (true, false) => 0,
        })
    }
}

// ============================================================================
// Factory functions
// ============================================================================

/// Initialize a harness over `catalog` with the given options and dimensions.
///
/// Uses [`ChipBox::init`] like the binary does and [`ChipBox::init_tui_with`]
/// to inject a [`TestBackend`], then draws the first frame.
pub fn enter_sized(options: ChipBoxOptions, catalog: Catalog, width: u16, height: u16) -> Result<TestHarness> {
    let tui = Tui::new_for_test(TestBackend::new(width, height))?;
    let mut chipbox = ChipBox::<TestBackend>::init(options, catalog)?;
    chipbox.init_tui_with(tui);
    let mut harness = TestHarness { chipbox };
    harness.render()?;
    Ok(harness)
}

/// Initialize a 40x12 harness over the built-in regions.
pub fn enter(options: ChipBoxOptions) -> Result<TestHarness> {
    enter_sized(options, Catalog::regions(), 40, 12)
}

/// Parse ChipBoxOptions from CLI-style arguments.
pub fn parse_options(args: &[&str]) -> ChipBoxOptions {
    let mut full_args = vec!["chipbox"];
    full_args.extend(args);
    ChipBoxOptions::try_parse_from(full_args)
        .expect("Failed to parse options")
        .build()
}

// ============================================================================
// Macros
// ============================================================================

/// Macro for writing compact interaction tests.
///
/// ```ignore
/// box_test!(test_name, &["--opts"], {
///     @type "har";            // Type string
///     @char 'a';              // Send single character
///     @key Enter;             // Send special key
///     @ctrl 'c';              // Send a key with Ctrl
///     @action Down(1);        // Send action
///     @click 3, 1;            // Left click on a cell
///     @hover 3, 4;            // Move the pointer
///     @line 1 == "har";       // Assert a buffer line
///     @dropdown ["Haryana"];  // Assert the dropdown rows
///     @selected ["Haryana"];  // Assert the selection
///     @assert(|h| ...);       // Run an assertion closure
///     @exited 0;              // Assert the exit code
/// });
/// ```
#[macro_export]
macro_rules! box_test {
    ($name:ident, $options:expr, { $($content:tt)* }) => {
        #[test]
        fn $name() -> color_eyre::Result<()> {
            let options = $crate::common::harness::parse_options($options);
            let mut h = $crate::common::harness::enter(options)?;

            box_test!(@expand h; $($content)*);

            Ok(())
        }
    };

    (@expand $h:ident; ) => {};

    (@expand $h:ident; @char $c:expr ; $($rest:tt)*) => {
        $h.char($c)?;
        box_test!(@expand $h; $($rest)*);
    };

    (@expand $h:ident; @type $text:expr ; $($rest:tt)*) => {
        $h.type_str($text)?;
        box_test!(@expand $h; $($rest)*);
    };

    (@expand $h:ident; @paste $text:expr ; $($rest:tt)*) => {
        $h.paste($text)?;
        box_test!(@expand $h; $($rest)*);
    };

    (@expand $h:ident; @action $action:ident ; $($rest:tt)*) => {
        $h.action(chipbox::tui::event::Action::$action)?;
        box_test!(@expand $h; $($rest)*);
    };

    (@expand $h:ident; @action $action:ident ($($args:tt)*) ; $($rest:tt)*) => {
        $h.action(chipbox::tui::event::Action::$action($($args)*))?;
        box_test!(@expand $h; $($rest)*);
    };

    (@expand $h:ident; @key $key:ident ; $($rest:tt)*) => {
        $h.key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::$key,
            crossterm::event::KeyModifiers::NONE
        ))?;
        box_test!(@expand $h; $($rest)*);
    };

    (@expand $h:ident; @ctrl $key:literal ; $($rest:tt)*) => {
        $h.key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char($key),
            crossterm::event::KeyModifiers::CONTROL
        ))?;
        box_test!(@expand $h; $($rest)*);
    };

    (@expand $h:ident; @click $x:expr, $y:expr ; $($rest:tt)*) => {
        $h.click($x, $y)?;
        box_test!(@expand $h; $($rest)*);
    };

    (@expand $h:ident; @hover $x:expr, $y:expr ; $($rest:tt)*) => {
        $h.hover($x, $y)?;
        box_test!(@expand $h; $($rest)*);
    };

    (@expand $h:ident; @line $y:literal == $text:expr ; $($rest:tt)*) => {
        assert_eq!($h.line($y), $text, "line {} of\n{}", $y, $h.buffer_view());
        box_test!(@expand $h; $($rest)*);
    };

    (@expand $h:ident; @dropdown [$($item:expr),* $(,)?] ; $($rest:tt)*) => {
        assert_eq!($h.dropdown(), Vec::<String>::from([$(String::from($item)),*]));
        box_test!(@expand $h; $($rest)*);
    };

    (@expand $h:ident; @dropdown $items:ident ; $($rest:tt)*) => {
        assert_eq!($h.dropdown(), $items);
        box_test!(@expand $h; $($rest)*);
    };

    (@expand $h:ident; @selected [$($item:expr),* $(,)?] ; $($rest:tt)*) => {
        assert_eq!($h.selected(), Vec::<String>::from([$(String::from($item)),*]));
        box_test!(@expand $h; $($rest)*);
    };

    (@expand $h:ident; @dbg; $($rest:tt)*) => {
        println!("DBG buffer:\n{}", $h.buffer_view());
        box_test!(@expand $h; $($rest)*);
    };

    (@expand $h:ident; @assert ( $assertion:expr ) ; $($rest:tt)*) => {
        assert!(($assertion)(&$h));
        box_test!(@expand $h; $($rest)*);
    };

    (@expand $h:ident; @exited $code:expr ; $($rest:tt)*) => {
        assert_eq!(
            $h.app_exit_code(),
            Some($code),
            "Expected the box to exit with status code {}, but got {:?}",
            $code,
            $h.app_exit_code()
        );
        box_test!(@expand $h; $($rest)*);
    };
}
