// Application state and orchestration logic.
//
// The central event loop owns the game state. It applies user commands from
// the front end, schedules the wheel's settle timer, and pushes a fresh
// snapshot to the front end after every change.

use std::sync::Arc;

use rand::rngs::StdRng;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use draftfc_core::auction::{AuctionError, SettleOutcome, SpinTicket, WheelAuction};
use draftfc_core::catalog::{ClubCatalog, PlayerPool, PositionCatalog};
use draftfc_core::draft::{
    AdvanceOutcome, DraftSequencer, Participant, RetreatOutcome, ValidationError,
};

use crate::config::Config;
use crate::protocol::{
    AppSnapshot, ClubView, DraftView, RosterEntry, Screen, UiUpdate, UserCommand, WheelView,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A rejected command. The message is shown to the user as a notice.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Draft(#[from] ValidationError),

    #[error(transparent)]
    Auction(#[from] AuctionError),
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub clubs: Arc<ClubCatalog>,
    pub positions: Arc<PositionCatalog>,
    pub player_pool: Arc<dyn PlayerPool + Send + Sync>,
    pub screen: Screen,
    /// Player count chosen on the home screen.
    pub player_count: usize,
    /// Present while the club selection screen is active.
    pub sequencer: Option<DraftSequencer>,
    /// Participants from the last completed draft order.
    pub roster: Vec<Participant>,
    pub wheel: WheelAuction,
    rng: StdRng,
    /// Settle timers send the spin generation back to the event loop here.
    settle_tx: mpsc::Sender<u64>,
    /// Timer task for the spin currently in flight, if any.
    pub settle_task: Option<JoinHandle<()>>,
}

impl AppState {
    pub fn new(
        config: Config,
        clubs: Arc<ClubCatalog>,
        positions: Arc<PositionCatalog>,
        player_pool: Arc<dyn PlayerPool + Send + Sync>,
        rng: StdRng,
        settle_tx: mpsc::Sender<u64>,
    ) -> Self {
        let wheel = WheelAuction::new(positions.clone(), config.wheel.settings());
        let player_count = config.game.default_players;
        if config.game.min_players > clubs.len() {
            warn!(
                "min_players is {} but only {} clubs exist, capping the player count",
                config.game.min_players,
                clubs.len()
            );
        }
        let mut state = AppState {
            config,
            clubs,
            positions,
            player_pool,
            screen: Screen::Home,
            player_count,
            sequencer: None,
            roster: Vec::new(),
            wheel,
            rng,
            settle_tx,
            settle_task: None,
        };
        state.player_count = state
            .player_count
            .clamp(state.min_players(), state.max_players());
        state
    }

    /// Lowest selectable player count. Every player needs a distinct club, so
    /// both bounds are capped by the number of clubs.
    pub fn min_players(&self) -> usize {
        self.config.game.min_players.min(self.clubs.len())
    }

    /// Highest selectable player count.
    pub fn max_players(&self) -> usize {
        self.config
            .game
            .max_players
            .min(self.clubs.len())
            .max(self.min_players())
    }

    /// Apply a single user command.
    ///
    /// Commands that do not belong to the current screen are ignored.
    pub fn apply_command(&mut self, cmd: UserCommand) -> Result<(), CommandError> {
        match (self.screen, cmd) {
            (Screen::Home, UserCommand::IncrementPlayers) => {
                if self.player_count < self.max_players() {
                    self.player_count += 1;
                }
            }
            (Screen::Home, UserCommand::DecrementPlayers) => {
                if self.player_count > self.min_players() {
                    self.player_count -= 1;
                }
            }
            (Screen::Home, UserCommand::StartDraft) => {
                let sequencer = DraftSequencer::new(self.player_count, self.clubs.clone())?;
                info!("Starting draft with {} players", self.player_count);
                self.sequencer = Some(sequencer);
                self.roster.clear();
                self.screen = Screen::ClubSelection;
            }

            (Screen::ClubSelection, UserCommand::SelectClub(club)) => {
                if let Some(seq) = self.sequencer.as_mut() {
                    seq.select_club(club)?;
                }
            }
            (Screen::ClubSelection, UserCommand::SetName(name)) => {
                if let Some(seq) = self.sequencer.as_mut() {
                    seq.set_name(&name);
                }
            }
            (Screen::ClubSelection, UserCommand::NextPlayer) => {
                let Some(seq) = self.sequencer.as_mut() else {
                    return Ok(());
                };
                if let AdvanceOutcome::Complete { roster } = seq.advance()? {
                    info!("All {} clubs selected, moving to auction", roster.len());
                    self.roster = roster;
                    self.sequencer = None;
                    self.cancel_settle_task();
                    self.wheel.reset();
                    self.screen = Screen::Auction;
                }
            }
            (Screen::ClubSelection, UserCommand::PreviousPlayer) => {
                let Some(seq) = self.sequencer.as_mut() else {
                    return Ok(());
                };
                if seq.retreat() == RetreatOutcome::ExitToHost {
                    info!("Leaving club selection for the home screen");
                    self.sequencer = None;
                    self.screen = Screen::Home;
                }
            }

            (Screen::Auction, UserCommand::SpinWheel) => {
                let ticket = self.wheel.spin(&mut self.rng)?;
                self.schedule_settle(ticket);
            }
            (Screen::Auction, UserCommand::PickPlayer) => {
                self.wheel.pick_player(&*self.player_pool, &mut self.rng)?;
            }
            (Screen::Auction, UserCommand::ResetWheel) => {
                self.cancel_settle_task();
                self.wheel.reset();
            }
            (Screen::Auction, UserCommand::StartBidding) => {
                match self.wheel.current_card() {
                    Some(card) => {
                        info!("Start bidding pressed for {} (not implemented)", card.name)
                    }
                    None => info!("Start bidding pressed with no card showing"),
                }
            }

            (Screen::ClubSelection | Screen::Auction, UserCommand::BackToHome) => {
                info!("Returning to the home screen");
                self.cancel_settle_task();
                self.wheel.reset();
                self.sequencer = None;
                self.roster.clear();
                self.screen = Screen::Home;
            }

            (screen, cmd) => {
                debug!("Ignoring {:?} on {:?} screen", cmd, screen);
            }
        }
        Ok(())
    }

    /// Apply a settle message from a spin timer. Returns `true` if the wheel
    /// changed.
    pub fn handle_settle(&mut self, generation: u64) -> bool {
        match self.wheel.settle(generation) {
            SettleOutcome::Settled(_) => {
                self.settle_task = None;
                true
            }
            SettleOutcome::Stale => false,
        }
    }

    /// Start the timer that reports `ticket.generation` after its delay.
    fn schedule_settle(&mut self, ticket: SpinTicket) {
        self.cancel_settle_task();
        let tx = self.settle_tx.clone();
        let generation = ticket.generation;
        let delay = ticket.settle_delay;
        self.settle_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(generation).await;
        }));
    }

    /// Abort the pending settle timer, if any. A message already queued is
    /// discarded by the generation check instead.
    pub fn cancel_settle_task(&mut self) {
        if let Some(handle) = self.settle_task.take() {
            handle.abort();
        }
    }

    /// Build a snapshot of everything the front end renders.
    pub fn build_snapshot(&self) -> AppSnapshot {
        let draft = self.sequencer.as_ref().map(|seq| DraftView {
            current_slot: seq.current_slot(),
            total_slots: seq.total_slots(),
            completed: seq.completed_count(),
            progress_percent: seq.progress_percent(),
            pending_club: seq.pending_club(),
            pending_name: seq.pending_name().to_string(),
            clubs: self
                .clubs
                .all()
                .iter()
                .map(|club| ClubView {
                    id: club.id,
                    name: club.name.clone(),
                    logo: club.logo.clone(),
                    selected: seq.pending_club() == Some(club.id),
                    taken_by: seq.taken_by(club.id).map(str::to_string),
                })
                .collect(),
        });

        AppSnapshot {
            screen: self.screen,
            player_count: self.player_count,
            min_players: self.min_players(),
            max_players: self.max_players(),
            draft,
            roster: self
                .roster
                .iter()
                .map(|p| RosterEntry {
                    slot: p.slot,
                    display_name: p.display_name.clone(),
                    club: p.club,
                    club_name: self
                        .clubs
                        .by_id(p.club)
                        .map(|c| c.name.clone())
                        .unwrap_or_default(),
                })
                .collect(),
            wheel: WheelView {
                phase: self.wheel.phase(),
                rotation: self.wheel.rotation(),
                segments: self.positions.all().to_vec(),
                selected_position: self.wheel.selected_position().cloned(),
                current_card: self.wheel.current_card().cloned(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. User commands from the front end
/// 2. Settle messages from spin timers
///
/// Pushes UI updates through `ui_tx`. Returns when `Quit` arrives or the
/// command channel closes.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut settle_rx: mpsc::Receiver<u64>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");
    send_snapshot(&state, &ui_tx).await;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            Some(generation) = settle_rx.recv() => {
                if state.handle_settle(generation) {
                    send_snapshot(&state, &ui_tx).await;
                }
            }
        }
    }

    state.cancel_settle_task();
    info!("Application event loop exiting");
    Ok(())
}

/// Apply a user command and report the result to the front end.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    if let Err(e) = state.apply_command(cmd) {
        info!("Command rejected: {}", e);
        let _ = ui_tx.send(UiUpdate::Notice(e.to_string())).await;
    }
    send_snapshot(state, ui_tx).await;
}

async fn send_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx
        .send(UiUpdate::Snapshot(Box::new(state.build_snapshot())))
        .await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
