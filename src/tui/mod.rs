//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values. This is the only
//! module that knows about ratatui and crossterm.
//!
//! The loop draws, drains pending terminal events, then drains actions
//! sent back by the background request task. A `SteadyBlock` cursor is
//! used because continuous redraws reset the terminal's blink timer.

pub mod component;
pub mod components;
pub mod event;
pub mod markdown;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{debug, info, warn};

use crate::api::{AskBackend, HttpBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{AnswerViewState, InputBox, InputEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic).
pub struct TuiState {
    pub base_url: String,
    pub input_box: InputBox,
    pub answer_view: AnswerViewState,
}

impl TuiState {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            input_box: InputBox::new(),
            answer_view: AnswerViewState::default(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend: Arc<dyn AskBackend> = Arc::new(HttpBackend::new(config.base_url.clone()));
    let mut app = App::new(backend);
    let mut tui = TuiState::new(config.base_url);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions coming back from the request task
    let (tx, rx) = mpsc::channel();

    let mut should_quit = false;
    while !should_quit {
        terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;

        // Process the first event, then drain everything pending before
        // the next draw.
        let first_event = poll_event_timeout(std::time::Duration::from_millis(100));
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Quit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        should_quit = true;
                    }
                }
                TuiEvent::Resize => {}
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.answer_view.handle_event(&event);
                }
                _ => {
                    // The prompt box decides whether Enter may submit, so
                    // its busy prop must be current before the event lands.
                    tui.input_box.busy = app.is_loading;
                    if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event) {
                        let effect = update(&mut app, Action::Submit(text));
                        if effect == Effect::SpawnRequest {
                            spawn_request(&app, tx.clone());
                        }
                    }
                }
            }
        }

        // Actions from the background request task
        while let Ok(action) = rx.try_recv() {
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                should_quit = true;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Fire the HTTP request for `App::prompt` on the runtime and report the
/// outcome back as an `Action`. There is no cancellation: if a second
/// request is ever forced past the busy guard, the last action to arrive
/// wins.
fn spawn_request(app: &App, tx: mpsc::Sender<Action>) {
    let backend = app.backend.clone();
    let prompt = app.prompt.clone();
    info!("Spawning /ask request ({} prompt bytes)", prompt.len());

    tokio::spawn(async move {
        let action = match backend.ask(&prompt).await {
            Ok(answer) => Action::AnswerReceived(answer),
            Err(e) => Action::RequestFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Event loop receiver dropped before the answer arrived");
        }
    });
}
