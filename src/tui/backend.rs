use std::io::Stderr;
use std::ops::{Deref, DerefMut};
use std::sync::Once;

use color_eyre::eyre::Result;
use crossterm::cursor;
use crossterm::event::KeyEventKind;
use crossterm::event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use futures::{Stream, StreamExt as _};
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::Backend;
use ratatui::{TerminalOptions, Viewport};
use tokio::sync::mpsc::unbounded_channel;
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use super::{Event, Size};

static PANIC_HOOK_SET: Once = Once::new();

/// The terminal input subscription of one [`Tui`]
///
/// A task forwards terminal events into the event channel until the
/// subscription is dropped, which cancels and aborts it.
pub struct EventSubscription {
    task: JoinHandle<()>,
    token: CancellationToken,
}

impl EventSubscription {
    /// Subscribes to the terminal's event stream
    pub fn spawn(event_tx: UnboundedSender<Event>) -> Self {
        Self::from_stream(crossterm::event::EventStream::new(), event_tx)
    }

    /// Forwards the events of `stream` into `event_tx`
    pub fn from_stream<S>(mut stream: S, event_tx: UnboundedSender<Event>) -> Self
    where
        S: Stream<Item = std::io::Result<crossterm::event::Event>> + Send + Unpin + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let task = tokio::spawn(async move {
            loop {
                let event = tokio::select! {
                    _ = cancelled.cancelled() => break,
                    maybe_event = stream.next() => match maybe_event {
                        Some(Ok(crossterm::event::Event::Key(key))) if key.kind == KeyEventKind::Press => Event::Key(key),
                        Some(Ok(crossterm::event::Event::Mouse(mouse))) => Event::Mouse(mouse),
                        Some(Ok(crossterm::event::Event::Paste(text))) => Event::Paste(text),
                        Some(Ok(crossterm::event::Event::Resize(..))) => Event::Resize,
                        Some(Err(e)) => Event::Error(e.to_string()),
                        Some(Ok(_)) => continue,
                        None => break,
                    },
                };
                if event_tx.send(event).is_err() {
                    break;
                }
            }
            trace!("event subscription ended");
        });
        Self { task, token }
    }

    /// Whether events are still being forwarded
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled() && !self.task.is_finished()
    }

    /// A handle on the cancellation of this subscription
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.token.cancel();
        self.task.abort();
    }
}

/// Terminal user interface handler
pub struct Tui<B: Backend = CrosstermBackend<Stderr>> {
    /// The ratatui terminal instance
    pub terminal: ratatui::Terminal<B>,
    /// Terminal events, while entered
    pub subscription: Option<EventSubscription>,
    /// Receiver for TUI events
    pub event_rx: UnboundedReceiver<Event>,
    /// Sender for TUI events
    pub event_tx: UnboundedSender<Event>,
    /// Whether running in fullscreen mode
    pub is_fullscreen: bool,
}

impl Tui {
    /// Creates a new TUI on stderr with the specified height
    pub fn new_with_height(height: Size) -> Result<Self> {
        let backend = CrosstermBackend::new(std::io::stderr());
        let viewport = match height {
            Size::Percent(100) => Viewport::Fullscreen,
            size => {
                let term_height = crossterm::terminal::size()?.1;
                Viewport::Inline(size.resolve(term_height).max(1))
            }
        };
        set_panic_hook();
        Self::with_viewport(backend, viewport)
    }
}

impl<B: Backend> Tui<B>
where
    B::Error: Send + Sync + 'static,
{
    /// Creates a fullscreen TUI on any backend, without touching the terminal
    pub fn new_for_test(backend: B) -> Result<Self> {
        Self::with_viewport(backend, Viewport::Fullscreen)
    }

    fn with_viewport(backend: B, viewport: Viewport) -> Result<Self> {
        let (event_tx, event_rx) = unbounded_channel();
        let is_fullscreen = matches!(viewport, Viewport::Fullscreen);
        Ok(Self {
            terminal: ratatui::Terminal::with_options(backend, TerminalOptions { viewport })?,
            subscription: None,
            event_rx,
            event_tx,
            is_fullscreen,
        })
    }

    /// Enters the TUI by enabling raw mode and subscribing to terminal events
    pub fn enter(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(std::io::stderr(), EnableMouseCapture, EnableBracketedPaste)?;
        if self.is_fullscreen {
            crossterm::execute!(std::io::stderr(), EnterAlternateScreen)?;
        }
        self.subscribe(EventSubscription::spawn(self.event_tx.clone()));
        Ok(())
    }

    /// Replaces the current subscription, releasing the previous one
    pub fn subscribe(&mut self, subscription: EventSubscription) {
        if self.subscription.replace(subscription).is_some() {
            debug!("replaced a live event subscription");
        }
    }

    /// Exits the TUI by releasing the subscription and disabling raw mode
    pub fn exit(&mut self) -> Result<()> {
        self.subscription = None;
        if crossterm::terminal::is_raw_mode_enabled()? {
            self.flush()?;
            if !self.is_fullscreen {
                self.clear()?;
            }
            crossterm::execute!(
                std::io::stderr(),
                DisableBracketedPaste,
                DisableMouseCapture,
                cursor::Show
            )?;
            if self.is_fullscreen {
                crossterm::execute!(std::io::stderr(), LeaveAlternateScreen)?;
            }
            crossterm::terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    /// Gets the next event from the event queue
    pub async fn next(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }
}

impl<B: Backend> Deref for Tui<B> {
    type Target = ratatui::Terminal<B>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl<B: Backend> DerefMut for Tui<B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl<B: Backend> Drop for Tui<B> {
    fn drop(&mut self) {
        self.subscription = None;
        if crossterm::terminal::is_raw_mode_enabled().unwrap_or(false) {
            let _ = crossterm::execute!(
                std::io::stderr(),
                DisableBracketedPaste,
                DisableMouseCapture,
                LeaveAlternateScreen,
                cursor::Show
            );
            let _ = crossterm::terminal::disable_raw_mode();
        }
    }
}

fn set_panic_hook() {
    PANIC_HOOK_SET.call_once(|| {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            ratatui::restore(); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    });
}
