// Terminal front end: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the latest `AppSnapshot` plus a
// little local state (club cursor, name entry). The app orchestrator pushes
// `UiUpdate` messages over an mpsc channel; the TUI applies them to
// `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::warn;

use draftfc_app::protocol::{AppSnapshot, ClubView, Screen, UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
#[derive(Debug, Default)]
pub struct ViewState {
    /// Latest snapshot from the app orchestrator. `None` until the first one
    /// arrives.
    pub snapshot: Option<AppSnapshot>,
    /// Index into the club grid on the club selection screen.
    pub club_cursor: usize,
    /// Whether keystrokes currently edit the participant name.
    pub name_mode: bool,
    /// Name being typed; mirrored to the app on every edit.
    pub name_buffer: String,
    /// Last rejected-command message, cleared on the next key press.
    pub notice: Option<String>,
    /// Render tick counter, drives the spinning animation.
    pub tick: u64,
}

impl ViewState {
    /// Screen currently shown. Home until the first snapshot arrives.
    pub fn screen(&self) -> Screen {
        self.snapshot.as_ref().map_or(Screen::Home, |s| s.screen)
    }

    /// Clubs on the club selection grid, empty on other screens.
    pub fn clubs(&self) -> &[ClubView] {
        self.snapshot
            .as_ref()
            .and_then(|s| s.draft.as_ref())
            .map(|d| d.clubs.as_slice())
            .unwrap_or_default()
    }

    /// Club under the cursor, if any.
    pub fn club_under_cursor(&self) -> Option<&ClubView> {
        self.clubs().get(self.club_cursor)
    }

    /// Apply a full state snapshot from the app orchestrator.
    ///
    /// Local editing state is dropped whenever the screen or the draft slot
    /// changes underneath it.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        let prev_screen = self.screen();
        let prev_slot = self
            .snapshot
            .as_ref()
            .and_then(|s| s.draft.as_ref())
            .map(|d| d.current_slot);
        let slot = snapshot.draft.as_ref().map(|d| d.current_slot);

        if snapshot.screen != prev_screen {
            self.club_cursor = 0;
            self.name_mode = false;
            self.name_buffer.clear();
        } else if slot != prev_slot {
            self.name_mode = false;
        }

        if let Some(draft) = &snapshot.draft {
            if !self.name_mode {
                self.name_buffer = draft.pending_name.clone();
            }
            if let Some(last) = draft.clubs.len().checked_sub(1) {
                self.club_cursor = self.club_cursor.min(last);
            }
        }

        self.snapshot = Some(snapshot);
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::Notice(message) => {
            state.notice = Some(message);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame for the current screen.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::title_bar::render(frame, layout.title_bar, state);

    if let Some(snapshot) = &state.snapshot {
        match snapshot.screen {
            Screen::Home => widgets::home::render(frame, layout.body, snapshot),
            Screen::ClubSelection => widgets::club_select::render(frame, layout.body, state),
            Screen::Auction => widgets::wheel::render(frame, layout.body, state),
        }
    }

    widgets::help_bar::render(frame, layout.notice, layout.help_bar, state);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: anyhow::Result<()> = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // App loop is gone
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break Err(e.into());
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                view_state.tick = view_state.tick.wrapping_add(1);
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
