//! TUI rendering and terminal management (impure shell)

pub mod card_detail;
pub mod format;
pub mod layout;
pub mod results;
mod search_input;
pub mod status;
mod styles;
mod suggestions;

pub use card_detail::CardDetail;
pub use results::ResultsList;
pub use search_input::SearchInput;
pub use status::StatusLine;
pub use styles::{ColorConfig, Styles};
pub use suggestions::SuggestionList;

use crate::config::keybindings::KeyBindings;
use crate::integration::Dispatcher;
use crate::model::KeyAction;
use crate::state::{ApiEvent, ApplyOutcome, Command, QueryInput, Session};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

/// Input polling interval of the event loop.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Pane receiving navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Input,
    Results,
}

/// Presentation settings fixed for the lifetime of the UI.
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    /// Rows shown in the results list.
    pub display_cap: usize,
    pub colors: ColorConfig,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend. Key handling
/// and API events mutate the session; commands they produce queue up until
/// the event loop dispatches them.
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    session: Session,
    input: QueryInput,
    focus: FocusPane,
    /// Highlighted row of the suggestion dropdown.
    suggestion_cursor: Option<usize>,
    key_bindings: KeyBindings,
    styles: Styles,
    display_cap: usize,
    pending_commands: Vec<Command>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(session: Session, options: ViewOptions) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Self::with_backend(backend, session, options)
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    pub fn with_backend(backend: B, session: Session, options: ViewOptions) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            input: QueryInput::with_text(session.query()),
            session,
            focus: FocusPane::Input,
            suggestion_cursor: None,
            key_bindings: KeyBindings::default(),
            styles: Styles::with_color_config(options.colors),
            display_cap: options.display_cap.max(1),
            pending_commands: Vec::new(),
        })
    }

    /// Queue the session's startup commands and an optional initial search.
    pub fn start(&mut self, initial_query: Option<&str>) {
        self.pending_commands.extend(self.session.start());
        if let Some(query) = initial_query {
            let command = self.session.search_for(query);
            self.input.set(self.session.query());
            self.pending_commands.extend(command);
        }
    }

    /// Run the event loop until the user quits.
    ///
    /// Waits on API events and a frame tick; the tick drains terminal input
    /// without blocking. Redraws only when something changed.
    pub async fn run(
        &mut self,
        dispatcher: &Dispatcher,
        events: &mut UnboundedReceiver<ApiEvent>,
    ) -> io::Result<()> {
        self.draw()?;

        loop {
            dispatcher.dispatch_all(self.take_commands());

            tokio::select! {
                Some(event) = events.recv() => {
                    self.apply_event(event);
                    self.draw()?;
                }
                _ = tokio::time::sleep(FRAME_INTERVAL) => {
                    let mut dirty = false;
                    while event::poll(Duration::ZERO)? {
                        match event::read()? {
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                if self.handle_key(key) {
                                    return Ok(());
                                }
                                dirty = true;
                            }
                            Event::Resize(..) => dirty = true,
                            _ => {}
                        }
                    }
                    if dirty {
                        self.draw()?;
                    }
                }
            }
        }
    }

    /// Apply an API event to the session.
    pub fn apply_event(&mut self, event: ApiEvent) {
        let is_suggestions = matches!(event, ApiEvent::SuggestionsReceived { .. });
        let outcome = self.session.apply(event);
        if is_suggestions && outcome == ApplyOutcome::Accepted {
            self.suggestion_cursor = None;
        }
    }

    /// Handle a key press. Returns true when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even while typing
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Text editing takes precedence over bindings in the input pane
        if self.focus == FocusPane::Input && self.handle_input_key(key) {
            return false;
        }

        match self.key_bindings.get(key) {
            Some(action) => self.handle_action(action),
            None => false,
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        let editing = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(ch) if editing => {
                self.input.insert(ch);
                self.query_changed();
            }
            KeyCode::Backspace => {
                if self.input.backspace() {
                    self.query_changed();
                }
            }
            KeyCode::Delete => {
                if self.input.delete() {
                    self.query_changed();
                }
            }
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => return false,
        }
        true
    }

    fn handle_action(&mut self, action: KeyAction) -> bool {
        debug!(action = ?action, focus = ?self.focus, "Key action");
        match action {
            KeyAction::Quit => return true,
            KeyAction::MoveUp => {
                if self.suggestions_active() {
                    self.suggestion_cursor = match self.suggestion_cursor {
                        Some(0) | None => None,
                        Some(idx) => Some(idx - 1),
                    };
                } else {
                    self.session.select_previous();
                }
            }
            KeyAction::MoveDown => {
                if self.suggestions_active() {
                    let last = self.session.suggestions().visible_items().len() - 1;
                    self.suggestion_cursor = Some(match self.suggestion_cursor {
                        None => 0,
                        Some(idx) => (idx + 1).min(last),
                    });
                } else if self.last_visible_index() > self.session.results().selected_index() {
                    self.session.select_next();
                }
            }
            KeyAction::MoveToTop => {
                self.session.select_index(0);
            }
            KeyAction::MoveToBottom => {
                if let Some(last) = self.last_visible_index() {
                    self.session.select_index(last);
                }
            }
            KeyAction::CycleFocus => {
                self.focus = match self.focus {
                    FocusPane::Input => FocusPane::Results,
                    FocusPane::Results => FocusPane::Input,
                };
                self.suggestion_cursor = None;
            }
            KeyAction::Submit => {
                if self.focus == FocusPane::Input {
                    self.submit();
                }
            }
            KeyAction::Dismiss => {
                if self.session.suggestions().is_visible() {
                    self.session.dismiss_suggestions();
                    self.suggestion_cursor = None;
                } else if self.focus == FocusPane::Results {
                    self.focus = FocusPane::Input;
                }
            }
            KeyAction::ClearQuery => {
                if self.input.clear() {
                    self.query_changed();
                }
            }
            KeyAction::CycleGameFilter => {
                let command = self.session.cycle_game_filter();
                self.pending_commands.extend(command);
            }
        }
        false
    }

    /// Enter in the input: accept the highlighted suggestion or search the query.
    fn submit(&mut self) {
        let highlighted = self
            .suggestion_cursor
            .and_then(|idx| self.session.suggestions().visible_items().get(idx))
            .cloned();

        let command = match highlighted {
            Some(suggestion) => {
                let command = self.session.select_suggestion(&suggestion);
                self.input.set(self.session.query());
                command
            }
            None => self.session.submit(None),
        };
        self.suggestion_cursor = None;
        self.pending_commands.extend(command);
    }

    fn query_changed(&mut self) {
        let command = self.session.on_query_changed(self.input.text());
        self.suggestion_cursor = None;
        self.pending_commands.extend(command);
    }

    fn suggestions_active(&self) -> bool {
        self.focus == FocusPane::Input && self.session.suggestions().is_visible()
    }

    /// Index of the last result row on screen.
    fn last_visible_index(&self) -> Option<usize> {
        self.session
            .results()
            .len()
            .min(self.display_cap)
            .checked_sub(1)
    }

    /// Commands produced since the last call, in issue order.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending_commands)
    }

    pub fn draw(&mut self) -> io::Result<()> {
        let screen = layout::Screen {
            session: &self.session,
            input: &self.input,
            focus: self.focus,
            suggestion_cursor: self.suggestion_cursor,
            display_cap: self.display_cap,
            styles: &self.styles,
        };
        self.terminal
            .draw(|frame| layout::render_layout(frame, &screen))?;
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn input(&self) -> &QueryInput {
        &self.input
    }

    pub fn focus(&self) -> FocusPane {
        self.focus
    }

    pub fn suggestion_cursor(&self) -> Option<usize> {
        self.suggestion_cursor
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application.
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit (including on error). Logging must be initialized by the caller.
pub async fn run_app(
    session: Session,
    options: ViewOptions,
    dispatcher: Dispatcher,
    mut events: UnboundedReceiver<ApiEvent>,
    initial_query: Option<&str>,
) -> io::Result<()> {
    let mut app = TuiApp::new(session, options)?;
    app.start(initial_query);

    let result = app.run(&dispatcher, &mut events).await;

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
