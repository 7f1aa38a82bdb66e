//! Module containing the search box's entry point
use std::io::Stderr;
use std::sync::Arc;

use color_eyre::eyre::{self, OptionExt, Result};
use ratatui::backend::CrosstermBackend;
use tokio::{runtime::Handle, task::block_in_place};

use crate::tui::{App, Event, Size, Tui};
use crate::{Catalog, ChipBoxOptions, ChipBoxOutput, Selection, filter};

/// Main entry point for running the search box
pub struct ChipBox<Backend = CrosstermBackend<Stderr>>
where
    Backend: ratatui::backend::Backend,
    Backend::Error: Send + Sync + 'static,
{
    app: App,
    tui: Option<Tui<Backend>>,
    height: Size,
}

impl ChipBox {
    /// Run the search box over the catalog until the user accepts or aborts
    ///
    /// With `options.filter` set, the terminal is never entered: the output
    /// holds the suggestions for that query instead of a selection.
    pub fn run_with(options: ChipBoxOptions, catalog: Catalog) -> Result<ChipBoxOutput> {
        if let Some(query) = &options.filter {
            let selected = filter(&catalog, &Selection::default(), query);
            debug!("filter mode: {} suggestions for {query:?}", selected.len());
            return Ok(ChipBoxOutput {
                selected,
                query: query.clone(),
                is_abort: false,
            });
        }

        trace!("running chipbox");
        let mut chipbox = Self::init(options, catalog)?;
        chipbox.init_tui()?;
        let task = async {
            chipbox.enter()?;
            chipbox.run().await?;
            eyre::Ok(())
        };

        if let Ok(handle) = Handle::try_current() {
            block_in_place(|| handle.block_on(task))?;
        } else {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(task)?;
        }
        let output = chipbox.output();
        debug!("output: {output:?}");

        Ok(output)
    }

    /// Initialize the TUI with the default crossterm backend, but do not enter it yet
    pub fn init_tui(&mut self) -> Result<()> {
        self.tui = Some(Tui::new_with_height(self.height)?);
        Ok(())
    }
}

impl<Backend: ratatui::backend::Backend + 'static> ChipBox<Backend>
where
    Backend::Error: Send + Sync + 'static,
{
    /// Initialize the search box, without starting anything yet
    pub fn init(options: ChipBoxOptions, catalog: Catalog) -> Result<Self> {
        let height = Size::try_from(options.height.as_str())?;
        let theme = Arc::new(crate::theme::ColorTheme::init_from_options(&options));
        debug!("catalog of {} items", catalog.len());
        let app = App::from_options(options, theme, Arc::new(catalog));
        Ok(Self { app, tui: None, height })
    }

    /// Initialize the TUI with a caller-provided instance.
    ///
    /// Use this instead of [`init_tui()`](ChipBox::init_tui) when you need a
    /// non-default backend (e.g. `TestBackend` in tests).
    pub fn init_tui_with(&mut self, tui: Tui<Backend>) {
        self.tui = Some(tui);
    }

    /// Returns a shared reference to the application state.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Returns a mutable reference to the application state.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Returns a shared reference to the TUI.
    ///
    /// # Panics
    ///
    /// Panics if the TUI has not been initialized yet.
    pub fn tui_ref(&self) -> &Tui<Backend> {
        self.tui.as_ref().expect("TUI needs to be initialized before access")
    }

    /// Returns a mutable reference to the TUI.
    ///
    /// # Panics
    ///
    /// Panics if the TUI has not been initialized yet.
    pub fn tui_mut(&mut self) -> &mut Tui<Backend> {
        self.tui.as_mut().expect("TUI needs to be initialized before access")
    }

    /// Returns mutable references to both the app and the TUI simultaneously.
    ///
    /// # Panics
    ///
    /// Panics if the TUI has not been initialized yet.
    pub fn app_and_tui(&mut self) -> (&mut App, &mut Tui<Backend>) {
        (
            &mut self.app,
            self.tui.as_mut().expect("TUI needs to be initialized before access"),
        )
    }

    /// Enter the TUI and queue the first frame
    pub fn enter(&mut self) -> Result<()> {
        debug!("Entering TUI");
        let tui = self.tui.as_mut().ok_or_eyre("TUI needs to be initialized before entering")?;
        tui.enter()?;
        tui.event_tx.send(Event::Render)?;
        Ok(())
    }

    /// Process a single event.
    ///
    /// Returns `Ok(true)` if the search box should quit, `Ok(false)` to continue.
    pub async fn tick(&mut self) -> Result<bool> {
        let tui = self
            .tui
            .as_mut()
            .ok_or_eyre("TUI should be initialized before the event loop can start")?;
        let evt = tui.next().await.ok_or_eyre("Could not acquire next event")?;
        self.app.handle_event(tui, &evt)?;
        Ok(self.app.should_quit)
    }

    /// Run the event loop until the user accepts or aborts, then leave the TUI
    pub async fn run(&mut self) -> Result<()> {
        trace!("Starting event loop");
        while !self.tick().await? {}
        if let Some(tui) = self.tui.as_mut() {
            tui.exit()?;
        }
        Ok(())
    }

    /// Returns true if the user accepted or aborted
    pub fn should_quit(&self) -> bool {
        self.app.should_quit
    }

    /// Capture `self` and extract the output
    pub fn output(self) -> ChipBoxOutput {
        ChipBoxOutput {
            selected: self.app.results(),
            query: self.app.controller.query().to_owned(),
            is_abort: !self.app.accepted,
        }
    }
}
