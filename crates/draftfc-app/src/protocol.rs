// Messages between the app orchestrator and the front end.
//
// The front end sends `UserCommand`s; the orchestrator answers with
// `UiUpdate`s carrying a full `AppSnapshot` after every state change, plus
// one-off notices for recoverable errors.

use draftfc_core::auction::WheelPhase;
use draftfc_core::catalog::{ClubId, PlayerCard, PositionEntry};

/// Which screen the host is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    ClubSelection,
    Auction,
}

/// Commands from the front end to the app orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    // Home
    IncrementPlayers,
    DecrementPlayers,
    StartDraft,
    // Club selection
    SelectClub(ClubId),
    SetName(String),
    NextPlayer,
    PreviousPlayer,
    // Auction
    SpinWheel,
    PickPlayer,
    ResetWheel,
    /// Placeholder for the bidding round; currently has no effect.
    StartBidding,
    BackToHome,
    Quit,
}

/// Updates pushed from the app orchestrator to the front end.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    Snapshot(Box<AppSnapshot>),
    /// Human-readable message for a recoverable error.
    Notice(String),
}

/// Everything the front end needs to draw the current screen.
#[derive(Debug, Clone)]
pub struct AppSnapshot {
    pub screen: Screen,
    pub player_count: usize,
    pub min_players: usize,
    pub max_players: usize,
    /// Present while the club selection screen is active.
    pub draft: Option<DraftView>,
    /// Participants committed by the last completed draft order.
    pub roster: Vec<RosterEntry>,
    pub wheel: WheelView,
}

#[derive(Debug, Clone)]
pub struct DraftView {
    pub current_slot: usize,
    pub total_slots: usize,
    pub completed: usize,
    pub progress_percent: f64,
    pub pending_club: Option<ClubId>,
    pub pending_name: String,
    pub clubs: Vec<ClubView>,
}

/// One club as seen from the current slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubView {
    pub id: ClubId,
    pub name: String,
    pub logo: String,
    /// The current slot's pending pick.
    pub selected: bool,
    /// Display name of the other participant holding this club.
    pub taken_by: Option<String>,
}

/// A committed participant with its club resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub slot: usize,
    pub display_name: String,
    pub club: ClubId,
    pub club_name: String,
}

#[derive(Debug, Clone)]
pub struct WheelView {
    pub phase: WheelPhase,
    pub rotation: f64,
    pub segments: Vec<PositionEntry>,
    pub selected_position: Option<PositionEntry>,
    pub current_card: Option<PlayerCard>,
}
