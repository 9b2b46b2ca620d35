//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or fetch results.
//!
//! ## Effect dispatch
//!
//! Fetch effects returned by `update()` are executed by spawning a tokio
//! task that calls the fetcher and sends the resolution back as an `Action`
//! over an mpsc channel. The event loop drains that channel between frames
//! and feeds each action through `update()` again, so all state mutation
//! stays on one logical thread.

mod event;
pub mod html;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use log::{debug, info, warn};
use ratatui::widgets::ListState;
use tui_scrollview::ScrollViewState;

use crate::api::{ContentFetcher, HttpFetcher};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, View};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic).
pub struct TuiState {
    pub law_list: ListState,
    pub norm_list: ListState,
    pub content_scroll: ScrollViewState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            law_list: ListState::default().with_selected(Some(0)),
            norm_list: ListState::default().with_selected(Some(0)),
            content_scroll: ScrollViewState::default(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Mouse capture for wheel scrolling; the cursor stays hidden since
        // there is no text input anywhere in the UI.
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let fetcher: Arc<dyn ContentFetcher> = Arc::new(HttpFetcher::new(config.base_url.clone()));
    info!("Using '{}' fetcher against {}", fetcher.name(), config.base_url);

    let mut app = App::new(fetcher);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for fetch resolutions from background tasks
    let (tx, rx) = mpsc::channel();

    // Startup: request the law list before the first user action.
    let effect = update(&mut app, Action::LoadLaws);
    handle_effect(&app, effect, &tx);

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    'outer: loop {
        // Spinner animation while a fetch is pending
        if app.is_loading {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short while loading (~12fps), long when idle
        let timeout = if app.is_loading {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            if matches!(event, TuiEvent::ForceQuit | TuiEvent::Quit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    break 'outer;
                }
                continue;
            }

            if let Some(action) = map_event(&app, &mut tui, &event) {
                let effect = update(&mut app, action);
                if handle_effect(&app, effect, &tx) {
                    break 'outer;
                }
            }
        }

        // Apply fetch resolutions from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if handle_effect(&app, effect, &tx) {
                break 'outer;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Executes an effect. Returns true when the loop should quit.
fn handle_effect(app: &App, effect: Effect, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::Quit => true,
        Effect::None => false,
        fetch => {
            dispatch_fetch(app.fetcher.clone(), fetch, tx.clone());
            false
        }
    }
}

/// Spawns the task for a fetch effect. The resolution comes back as an
/// `Action` carrying the effect's token; the reducer decides whether it is
/// still current when it arrives.
fn dispatch_fetch(fetcher: Arc<dyn ContentFetcher>, effect: Effect, tx: mpsc::Sender<Action>) {
    match effect {
        Effect::FetchLaws { token } => {
            info!("Spawning law list fetch (token {token})");
            tokio::spawn(async move {
                let result = fetcher.list_laws().await;
                if tx.send(Action::LawsLoaded { token, result }).is_err() {
                    warn!("Failed to deliver law list: receiver dropped");
                }
            });
        }
        Effect::FetchNorms { law, token } => {
            info!("Spawning norm list fetch for law {} (token {token})", law.id);
            tokio::spawn(async move {
                let result = fetcher.list_norms(law.id).await;
                if tx.send(Action::NormsLoaded { token, law, result }).is_err() {
                    warn!("Failed to deliver norm list: receiver dropped");
                }
            });
        }
        Effect::FetchContent { norm_id, token } => {
            info!("Spawning content fetch for norm {norm_id} (token {token})");
            tokio::spawn(async move {
                let result = fetcher.norm_content(norm_id).await;
                if tx.send(Action::ContentLoaded { token, result }).is_err() {
                    warn!("Failed to deliver norm content: receiver dropped");
                }
            });
        }
        Effect::None | Effect::Quit => {}
    }
}

/// Maps a terminal event onto a core action, depending on the active view.
/// Pure presentation concerns (selection movement, scrolling) are handled
/// here directly and produce no action.
fn map_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match &app.view {
        View::LawList => match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                move_selection(&mut tui.law_list, app.laws.len(), -1);
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                move_selection(&mut tui.law_list, app.laws.len(), 1);
                None
            }
            TuiEvent::Home => {
                if !app.laws.is_empty() {
                    tui.law_list.select(Some(0));
                }
                None
            }
            TuiEvent::End => {
                if !app.laws.is_empty() {
                    tui.law_list.select(Some(app.laws.len() - 1));
                }
                None
            }
            TuiEvent::Select => {
                let law = app.laws.get(tui.law_list.selected()?)?.clone();
                // Fresh selection for the new norm list
                tui.norm_list = ListState::default().with_selected(Some(0));
                Some(Action::SelectLaw(law))
            }
            _ => None, // Back at the top level is a no-op
        },

        View::NormList { norms, .. } => match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                move_selection(&mut tui.norm_list, norms.len(), -1);
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                move_selection(&mut tui.norm_list, norms.len(), 1);
                None
            }
            TuiEvent::Home => {
                if !norms.is_empty() {
                    tui.norm_list.select(Some(0));
                }
                None
            }
            TuiEvent::End => {
                if !norms.is_empty() {
                    tui.norm_list.select(Some(norms.len() - 1));
                }
                None
            }
            TuiEvent::Select => {
                let norm = norms.get(tui.norm_list.selected()?)?;
                tui.content_scroll.scroll_to_top();
                Some(Action::SelectNorm(norm.id))
            }
            TuiEvent::Back => Some(Action::BackToLaws),
            _ => None,
        },

        View::NormContent { .. } => match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                tui.content_scroll.scroll_up();
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                tui.content_scroll.scroll_down();
                None
            }
            TuiEvent::PageUp => {
                tui.content_scroll.scroll_page_up();
                None
            }
            TuiEvent::PageDown => {
                tui.content_scroll.scroll_page_down();
                None
            }
            TuiEvent::Home => {
                tui.content_scroll.scroll_to_top();
                None
            }
            TuiEvent::End => {
                tui.content_scroll.scroll_to_bottom();
                None
            }
            TuiEvent::Back => Some(Action::BackToNorms),
            _ => None,
        },
    }
}

/// Moves a list selection by delta, clamped to the list bounds.
fn move_selection(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, len as isize - 1) as usize;
    state.select(Some(next));
}
