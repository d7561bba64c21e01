// Draft order: per-slot club and name assignment with back/forward navigation.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::{ClubCatalog, ClubId};

/// Upper bound on the number of draft slots.
pub const MAX_SLOTS: usize = 22;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Recoverable input errors. A failed operation leaves the sequencer unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please enter a name")]
    NameRequired,

    #[error("the name \"{name}\" is already taken")]
    NameTaken { name: String },

    #[error("please select a club")]
    ClubRequired,

    #[error("that club is already taken by {taken_by}")]
    ClubUnavailable { club: ClubId, taken_by: String },

    #[error("unknown club id {0}")]
    UnknownClub(ClubId),

    #[error("player count must be between 1 and {max}, got {0}", max = MAX_SLOTS)]
    InvalidSlotCount(usize),

    #[error("only {available} clubs are available for {requested} players")]
    NotEnoughClubs { requested: usize, available: usize },

    #[error("every player has already picked a club")]
    AlreadyComplete,
}

// ---------------------------------------------------------------------------
// Participant and outcomes
// ---------------------------------------------------------------------------

/// A committed draft slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// 1-based slot in the draft order.
    pub slot: usize,
    /// Trimmed display name.
    pub display_name: String,
    pub club: ClubId,
}

/// Result of a successful [`DraftSequencer::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The slot was committed and `next_slot` is now current.
    Continue { next_slot: usize },
    /// The last slot was committed. `roster` is ordered by slot.
    Complete { roster: Vec<Participant> },
}

/// Result of [`DraftSequencer::retreat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetreatOutcome {
    /// Already at the first slot; the host should leave the draft screen.
    ExitToHost,
    /// `slot` is current again, with its previous choices restored as pending.
    SteppedBack { slot: usize },
}

// ---------------------------------------------------------------------------
// DraftSequencer
// ---------------------------------------------------------------------------

/// Drives N participants through club and name selection, one slot at a time.
#[derive(Debug, Clone)]
pub struct DraftSequencer {
    clubs: Arc<ClubCatalog>,
    total_slots: usize,
    /// Always the lowest uncommitted slot, or `total_slots` once complete.
    current_slot: usize,
    committed: BTreeMap<usize, Participant>,
    pending_club: Option<ClubId>,
    /// Empty means unset.
    pending_name: String,
}

impl DraftSequencer {
    /// Create a sequencer for `total_slots` participants (1..=`MAX_SLOTS`).
    ///
    /// Every participant needs a distinct club, so the catalog must hold at
    /// least `total_slots` clubs.
    pub fn new(total_slots: usize, clubs: Arc<ClubCatalog>) -> Result<Self, ValidationError> {
        if !(1..=MAX_SLOTS).contains(&total_slots) {
            return Err(ValidationError::InvalidSlotCount(total_slots));
        }
        if total_slots > clubs.len() {
            return Err(ValidationError::NotEnoughClubs {
                requested: total_slots,
                available: clubs.len(),
            });
        }
        Ok(DraftSequencer {
            clubs,
            total_slots,
            current_slot: 1,
            committed: BTreeMap::new(),
            pending_club: None,
            pending_name: String::new(),
        })
    }

    /// Record a provisional club for the current slot.
    ///
    /// Clubs committed by other slots may still be selected here; `advance`
    /// is what rejects them. Re-selecting the pending club is a no-op.
    pub fn select_club(&mut self, club: ClubId) -> Result<(), ValidationError> {
        if self.is_complete() {
            return Err(ValidationError::AlreadyComplete);
        }
        if self.clubs.by_id(club).is_none() {
            return Err(ValidationError::UnknownClub(club));
        }
        if self.pending_club == Some(club) {
            return Ok(());
        }
        debug!("Slot {} selected club {}", self.current_slot, club);
        self.pending_club = Some(club);
        Ok(())
    }

    /// Set the pending display name. Validation happens in `advance`.
    pub fn set_name(&mut self, name: &str) {
        self.pending_name = name.to_string();
    }

    /// Validate and commit the current slot.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, ValidationError> {
        if self.is_complete() {
            return Err(ValidationError::AlreadyComplete);
        }

        let name = self.pending_name.trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.name_owner(name).is_some() {
            return Err(ValidationError::NameTaken {
                name: name.to_string(),
            });
        }
        let club = self.pending_club.ok_or(ValidationError::ClubRequired)?;
        if let Some(owner) = self.club_owner(club) {
            return Err(ValidationError::ClubUnavailable {
                club,
                taken_by: owner.display_name.clone(),
            });
        }

        let participant = Participant {
            slot: self.current_slot,
            display_name: name.to_string(),
            club,
        };
        info!(
            "Slot {}/{} committed: {} -> club {}",
            participant.slot, self.total_slots, participant.display_name, club
        );
        self.committed.insert(self.current_slot, participant);
        self.pending_club = None;
        self.pending_name.clear();

        if self.current_slot == self.total_slots {
            info!(
                "Draft order complete with {} participants",
                self.total_slots
            );
            return Ok(AdvanceOutcome::Complete {
                roster: self.roster(),
            });
        }

        self.current_slot += 1;
        Ok(AdvanceOutcome::Continue {
            next_slot: self.current_slot,
        })
    }

    /// Step back one slot, un-committing it and restoring its choices as pending.
    ///
    /// On a complete sequencer this reopens the last slot in place.
    pub fn retreat(&mut self) -> RetreatOutcome {
        let reopen = if self.is_complete() {
            self.current_slot
        } else if self.current_slot == 1 {
            return RetreatOutcome::ExitToHost;
        } else {
            self.current_slot - 1
        };

        let restored = self.committed.remove(&reopen);
        self.current_slot = reopen;
        match restored {
            Some(p) => {
                self.pending_club = Some(p.club);
                self.pending_name = p.display_name;
            }
            None => {
                self.pending_club = None;
                self.pending_name.clear();
            }
        }
        debug!("Stepped back to slot {}", reopen);
        RetreatOutcome::SteppedBack { slot: reopen }
    }

    /// Drop every participant and pending choice and return to slot 1.
    pub fn reset(&mut self) {
        self.committed.clear();
        self.current_slot = 1;
        self.pending_club = None;
        self.pending_name.clear();
    }

    /// Whether another slot already holds `club`. Advisory, for rendering.
    pub fn is_club_taken(&self, club: ClubId) -> bool {
        self.club_owner(club).is_some()
    }

    /// Display name of the other slot holding `club`, if any.
    pub fn taken_by(&self, club: ClubId) -> Option<&str> {
        self.club_owner(club).map(|p| p.display_name.as_str())
    }

    pub fn current_slot(&self) -> usize {
        self.current_slot
    }

    pub fn total_slots(&self) -> usize {
        self.total_slots
    }

    pub fn pending_club(&self) -> Option<ClubId> {
        self.pending_club
    }

    pub fn pending_name(&self) -> &str {
        &self.pending_name
    }

    pub fn is_complete(&self) -> bool {
        self.committed.len() == self.total_slots
    }

    pub fn completed_count(&self) -> usize {
        self.committed.len()
    }

    /// Share of slots committed, 0.0..=100.0.
    pub fn progress_percent(&self) -> f64 {
        self.committed.len() as f64 / self.total_slots as f64 * 100.0
    }

    pub fn participant(&self, slot: usize) -> Option<&Participant> {
        self.committed.get(&slot)
    }

    /// Committed participants ordered by slot.
    pub fn roster(&self) -> Vec<Participant> {
        self.committed.values().cloned().collect()
    }

    // -- lookups excluding the current slot --

    fn others(&self) -> impl Iterator<Item = &Participant> {
        let current = self.current_slot;
        self.committed.values().filter(move |p| p.slot != current)
    }

    fn club_owner(&self, club: ClubId) -> Option<&Participant> {
        self.others().find(|p| p.club == club)
    }

    fn name_owner(&self, trimmed: &str) -> Option<&Participant> {
        let wanted = trimmed.to_lowercase();
        self.others()
            .find(|p| p.display_name.trim().to_lowercase() == wanted)
    }
}
