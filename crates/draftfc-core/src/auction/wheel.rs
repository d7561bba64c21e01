// Position wheel and random player reveal.
//
// `spin` draws a segment immediately but only exposes it once the host calls
// `settle` with the ticket's generation after the settle delay. Every spin and
// reset bumps the generation, so a settle from an earlier spin is discarded
// instead of overwriting newer state.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::{PlayerCard, PlayerPool, PositionCatalog, PositionEntry, PositionKey};

/// Default wait between a spin and its result becoming visible.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(4000);

/// Default number of full turns added to every spin's rotation.
pub const DEFAULT_EXTRA_TURNS: u32 = 5;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuctionError {
    #[error("the wheel is already spinning")]
    SpinInProgress,

    #[error("the wheel has no positions")]
    EmptyCatalog,

    #[error("spin the wheel to select a position first")]
    NoPositionSelected,

    #[error("wait for the wheel to stop before picking a player")]
    StillSpinning,

    #[error("No players available for position {position}")]
    EmptyPool { position: PositionKey },
}

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct WheelSettings {
    pub settle_delay: Duration,
    pub extra_turns: u32,
}

impl Default for WheelSettings {
    fn default() -> Self {
        WheelSettings {
            settle_delay: DEFAULT_SETTLE_DELAY,
            extra_turns: DEFAULT_EXTRA_TURNS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WheelPhase {
    Idle,
    Spinning,
    PositionSelected,
    PlayerSelected,
}

/// Handed back by [`WheelAuction::spin`]; the host waits `settle_delay` and
/// then calls [`WheelAuction::settle`] with `generation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinTicket {
    pub generation: u64,
    /// Drawn segment index.
    pub index: usize,
    /// Final wheel rotation in degrees.
    pub rotation: f64,
    pub settle_delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleOutcome {
    Settled(PositionEntry),
    /// The ticket belongs to a spin that was reset or superseded.
    Stale,
}

// ---------------------------------------------------------------------------
// Wheel geometry
// ---------------------------------------------------------------------------

/// Angular width of one segment, in degrees.
pub fn segment_angle(segments: usize) -> f64 {
    360.0 / segments as f64
}

/// Rotation that leaves the centre of segment `index` under the pointer
/// (at the top, 0 degrees) after `turns` full turns.
pub fn rotation_for(index: usize, segments: usize, turns: u32) -> f64 {
    let seg = segment_angle(segments);
    let centre = index as f64 * seg + seg / 2.0;
    360.0 * turns as f64 + (360.0 - centre)
}

/// Segment index under the pointer for a given wheel rotation.
pub fn segment_under_pointer(rotation: f64, segments: usize) -> usize {
    let seg = segment_angle(segments);
    let angle = (360.0 - rotation.rem_euclid(360.0)).rem_euclid(360.0);
    (angle / seg).floor() as usize % segments
}

// ---------------------------------------------------------------------------
// WheelAuction
// ---------------------------------------------------------------------------

/// The spin-then-reveal flow for one auction screen.
#[derive(Debug, Clone)]
pub struct WheelAuction {
    positions: Arc<PositionCatalog>,
    settings: WheelSettings,
    phase: WheelPhase,
    selected_position: Option<PositionEntry>,
    current_card: Option<PlayerCard>,
    rotation: f64,
    /// Monotonic spin counter; settles carrying an older value are stale.
    generation: u64,
    pending_index: Option<usize>,
}

impl WheelAuction {
    pub fn new(positions: Arc<PositionCatalog>, settings: WheelSettings) -> Self {
        WheelAuction {
            positions,
            settings,
            phase: WheelPhase::Idle,
            selected_position: None,
            current_card: None,
            rotation: 0.0,
            generation: 0,
            pending_index: None,
        }
    }

    /// Start a spin. Rejected while a spin is already in flight.
    pub fn spin(&mut self, rng: &mut impl Rng) -> Result<SpinTicket, AuctionError> {
        if self.phase == WheelPhase::Spinning {
            return Err(AuctionError::SpinInProgress);
        }
        let segments = self.positions.len();
        if segments == 0 {
            return Err(AuctionError::EmptyCatalog);
        }

        let index = rng.gen_range(0..segments);
        self.generation += 1;
        self.phase = WheelPhase::Spinning;
        self.selected_position = None;
        self.current_card = None;
        self.pending_index = Some(index);
        self.rotation = rotation_for(index, segments, self.settings.extra_turns);

        info!(
            "Wheel spin started (gen: {}, segment {}, rotation {:.1})",
            self.generation, index, self.rotation
        );

        Ok(SpinTicket {
            generation: self.generation,
            index,
            rotation: self.rotation,
            settle_delay: self.settings.settle_delay,
        })
    }

    /// Apply the result of the spin identified by `generation`.
    pub fn settle(&mut self, generation: u64) -> SettleOutcome {
        if generation != self.generation || self.phase != WheelPhase::Spinning {
            debug!(
                "Discarding stale settle (gen: {}, current gen: {}, phase: {:?})",
                generation, self.generation, self.phase
            );
            return SettleOutcome::Stale;
        }

        let index = self.pending_index.take();
        let Some(entry) = index.and_then(|i| self.positions.get(i)).cloned() else {
            return SettleOutcome::Stale;
        };

        info!(
            "Wheel settled on {} ({})",
            entry.full_name,
            entry.short_name()
        );
        self.selected_position = Some(entry.clone());
        self.phase = WheelPhase::PositionSelected;
        SettleOutcome::Settled(entry)
    }

    /// Reveal a random player for the selected position.
    ///
    /// When a card is already showing and the pool holds a different player,
    /// the draw is limited to the other players so the same card never comes
    /// up twice in a row.
    pub fn pick_player(
        &mut self,
        pool: &dyn PlayerPool,
        rng: &mut impl Rng,
    ) -> Result<&PlayerCard, AuctionError> {
        if self.phase == WheelPhase::Spinning {
            return Err(AuctionError::StillSpinning);
        }
        let position = self
            .selected_position
            .as_ref()
            .ok_or(AuctionError::NoPositionSelected)?
            .key;

        let cards = pool.players_for(position);
        if cards.is_empty() {
            return Err(AuctionError::EmptyPool { position });
        }

        let candidates: Vec<&PlayerCard> = match &self.current_card {
            Some(current) => cards.iter().filter(|c| c.name != current.name).collect(),
            None => Vec::new(),
        };
        let card = if candidates.is_empty() {
            cards[rng.gen_range(0..cards.len())].clone()
        } else {
            candidates[rng.gen_range(0..candidates.len())].clone()
        };

        info!(
            "Revealed {} ({}, base ${}M)",
            card.name, position, card.base_price
        );
        self.phase = WheelPhase::PlayerSelected;
        Ok(&*self.current_card.insert(card))
    }

    /// Back to idle. Any spin still waiting to settle is invalidated.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = WheelPhase::Idle;
        self.selected_position = None;
        self.current_card = None;
        self.pending_index = None;
        self.rotation = 0.0;
    }

    pub fn phase(&self) -> WheelPhase {
        self.phase
    }

    pub fn selected_position(&self) -> Option<&PositionEntry> {
        self.selected_position.as_ref()
    }

    pub fn current_card(&self) -> Option<&PlayerCard> {
        self.current_card.as_ref()
    }

    /// Current wheel rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticPlayerPool;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wheel() -> WheelAuction {
        WheelAuction::new(
            Arc::new(PositionCatalog::builtin()),
            WheelSettings::default(),
        )
    }

    fn card(name: &str, price: u32) -> PlayerCard {
        PlayerCard {
            name: name.to_string(),
            image: format!("/cards/{}.png", name.to_lowercase()),
            base_price: price,
        }
    }

    /// Pool with the same cards under every position.
    fn pool_with(cards: Vec<PlayerCard>) -> StaticPlayerPool {
        let mut pool = StaticPlayerPool::new();
        for key in PositionKey::ALL {
            pool = pool.with(key, cards.clone());
        }
        pool
    }

    fn assert_invariants(w: &WheelAuction) {
        if w.current_card().is_some() {
            assert_eq!(w.phase(), WheelPhase::PlayerSelected);
        }
        if w.phase() == WheelPhase::PlayerSelected {
            assert!(w.selected_position().is_some());
        }
        if w.phase() == WheelPhase::Spinning {
            assert!(w.selected_position().is_none());
            assert!(w.current_card().is_none());
        }
    }

    fn settled(w: &mut WheelAuction, rng: &mut StdRng) -> PositionEntry {
        let ticket = w.spin(rng).unwrap();
        match w.settle(ticket.generation) {
            SettleOutcome::Settled(entry) => entry,
            SettleOutcome::Stale => panic!("fresh ticket should settle"),
        }
    }

    // -- geometry --

    #[test]
    fn rotation_matches_reference_formula() {
        // 9 segments of 40 degrees: segment 0 centre is 20 degrees.
        assert!((rotation_for(0, 9, 5) - (1800.0 + 340.0)).abs() < 1e-9);
        assert!((rotation_for(8, 9, 5) - (1800.0 + 20.0)).abs() < 1e-9);
    }

    #[test]
    fn pointer_lands_on_drawn_segment() {
        for segments in [1, 2, 3, 7, 9, 12] {
            for index in 0..segments {
                for turns in [0, 1, 5] {
                    let rotation = rotation_for(index, segments, turns);
                    assert_eq!(
                        segment_under_pointer(rotation, segments),
                        index,
                        "segments={segments} index={index} turns={turns}"
                    );
                }
            }
        }
    }

    // -- spin / settle --

    #[test]
    fn spin_then_settle_selects_drawn_entry() {
        let mut w = wheel();
        let mut rng = StdRng::seed_from_u64(42);
        let ticket = w.spin(&mut rng).unwrap();

        assert_eq!(w.phase(), WheelPhase::Spinning);
        assert_eq!(ticket.settle_delay, Duration::from_millis(4000));
        assert!((w.rotation() - ticket.rotation).abs() < f64::EPSILON);
        assert!(w.selected_position().is_none());
        assert_invariants(&w);

        let catalog = PositionCatalog::builtin();
        let expected = catalog.get(ticket.index).unwrap().clone();
        assert_eq!(
            w.settle(ticket.generation),
            SettleOutcome::Settled(expected.clone())
        );
        assert_eq!(w.phase(), WheelPhase::PositionSelected);
        assert_eq!(w.selected_position(), Some(&expected));
        assert_eq!(segment_under_pointer(w.rotation(), 9), ticket.index);
    }

    #[test]
    fn second_spin_while_spinning_is_rejected() {
        let mut w = wheel();
        let mut rng = StdRng::seed_from_u64(1);
        let first = w.spin(&mut rng).unwrap();
        assert_eq!(w.spin(&mut rng).unwrap_err(), AuctionError::SpinInProgress);
        assert_eq!(w.generation(), first.generation);

        assert!(matches!(
            w.settle(first.generation),
            SettleOutcome::Settled(_)
        ));
        // Only one assignment: a repeated settle is ignored.
        assert_eq!(w.settle(first.generation), SettleOutcome::Stale);
        assert_eq!(w.phase(), WheelPhase::PositionSelected);
    }

    #[test]
    fn reset_suppresses_pending_settle() {
        let mut w = wheel();
        let mut rng = StdRng::seed_from_u64(7);
        let ticket = w.spin(&mut rng).unwrap();
        w.reset();

        assert_eq!(w.settle(ticket.generation), SettleOutcome::Stale);
        assert_eq!(w.phase(), WheelPhase::Idle);
        assert!(w.selected_position().is_none());
    }

    #[test]
    fn spin_reset_spin_applies_only_latest() {
        let mut w = wheel();
        let mut rng = StdRng::seed_from_u64(9);
        let old = w.spin(&mut rng).unwrap();
        w.reset();
        let new = w.spin(&mut rng).unwrap();

        assert_eq!(w.settle(old.generation), SettleOutcome::Stale);
        assert_eq!(w.phase(), WheelPhase::Spinning);

        let catalog = PositionCatalog::builtin();
        let expected = catalog.get(new.index).unwrap().clone();
        assert_eq!(w.settle(new.generation), SettleOutcome::Settled(expected));
    }

    #[test]
    fn spin_discards_previous_card() {
        let mut w = wheel();
        let mut rng = StdRng::seed_from_u64(3);
        let pool = pool_with(vec![card("Haaland", 180), card("Kane", 110)]);
        settled(&mut w, &mut rng);
        w.pick_player(&pool, &mut rng).unwrap();
        assert_eq!(w.phase(), WheelPhase::PlayerSelected);

        w.spin(&mut rng).unwrap();
        assert!(w.current_card().is_none());
        assert!(w.selected_position().is_none());
        assert_invariants(&w);
    }

    #[test]
    fn spin_on_empty_catalog_fails() {
        let mut w = WheelAuction::new(
            Arc::new(PositionCatalog::default()),
            WheelSettings::default(),
        );
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(w.spin(&mut rng).unwrap_err(), AuctionError::EmptyCatalog);
        assert_eq!(w.phase(), WheelPhase::Idle);
    }

    #[test]
    fn spins_cover_every_segment() {
        let mut w = wheel();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = [0usize; 9];
        for _ in 0..9000 {
            let ticket = w.spin(&mut rng).unwrap();
            counts[ticket.index] += 1;
            w.reset();
        }
        for (i, c) in counts.iter().enumerate() {
            assert!(*c > 800 && *c < 1200, "segment {i} drawn {c} times");
        }
    }

    // -- pick_player --

    #[test]
    fn pick_requires_selected_position() {
        let mut w = wheel();
        let mut rng = StdRng::seed_from_u64(5);
        let pool = pool_with(vec![card("Saka", 120)]);
        assert_eq!(
            w.pick_player(&pool, &mut rng).unwrap_err(),
            AuctionError::NoPositionSelected
        );
    }

    #[test]
    fn pick_while_spinning_asks_to_wait() {
        let mut w = wheel();
        let mut rng = StdRng::seed_from_u64(5);
        let pool = pool_with(vec![card("Saka", 120)]);
        let ticket = w.spin(&mut rng).unwrap();

        let err = w.pick_player(&pool, &mut rng).unwrap_err();
        assert_eq!(err, AuctionError::StillSpinning);
        assert_eq!(
            err.to_string(),
            "wait for the wheel to stop before picking a player"
        );
        assert_eq!(w.phase(), WheelPhase::Spinning);
        assert!(w.current_card().is_none());

        // The pending spin still settles normally afterwards.
        assert!(matches!(
            w.settle(ticket.generation),
            SettleOutcome::Settled(_)
        ));
    }

    #[test]
    fn empty_pool_is_recoverable() {
        let mut w = wheel();
        let mut rng = StdRng::seed_from_u64(11);
        let entry = settled(&mut w, &mut rng);
        let position = entry.key;

        let empty = StaticPlayerPool::new();
        let err = w.pick_player(&empty, &mut rng).unwrap_err();
        assert_eq!(err, AuctionError::EmptyPool { position });
        assert_eq!(
            err.to_string(),
            format!("No players available for position {}", entry.short_name())
        );
        assert_eq!(w.phase(), WheelPhase::PositionSelected);
        assert_eq!(w.selected_position(), Some(&entry));
    }

    #[test]
    fn two_card_pool_alternates() {
        let mut w = wheel();
        let mut rng = StdRng::seed_from_u64(99);
        let pool = pool_with(vec![card("Salah", 150), card("Vinicius", 170)]);
        settled(&mut w, &mut rng);

        let mut previous = w.pick_player(&pool, &mut rng).unwrap().name.clone();
        for _ in 0..50 {
            let next = w.pick_player(&pool, &mut rng).unwrap().name.clone();
            assert_ne!(next, previous);
            previous = next;
            assert_invariants(&w);
        }
    }

    #[test]
    fn single_card_pool_may_repeat() {
        let mut w = wheel();
        let mut rng = StdRng::seed_from_u64(4);
        let pool = pool_with(vec![card("Courtois", 60)]);
        settled(&mut w, &mut rng);
        assert_eq!(w.pick_player(&pool, &mut rng).unwrap().name, "Courtois");
        assert_eq!(w.pick_player(&pool, &mut rng).unwrap().name, "Courtois");
    }

    #[test]
    fn pool_of_same_named_cards_still_terminates() {
        let mut w = wheel();
        let mut rng = StdRng::seed_from_u64(8);
        let pool = pool_with(vec![card("Twin", 10), card("Twin", 12)]);
        settled(&mut w, &mut rng);
        w.pick_player(&pool, &mut rng).unwrap();
        assert_eq!(w.pick_player(&pool, &mut rng).unwrap().name, "Twin");
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut w = wheel();
        let mut rng = StdRng::seed_from_u64(6);
        let pool = pool_with(vec![card("Rodri", 130)]);
        settled(&mut w, &mut rng);
        w.pick_player(&pool, &mut rng).unwrap();

        w.reset();
        assert_eq!(w.phase(), WheelPhase::Idle);
        assert!(w.selected_position().is_none());
        assert!(w.current_card().is_none());
        assert_eq!(w.rotation(), 0.0);
    }
}
