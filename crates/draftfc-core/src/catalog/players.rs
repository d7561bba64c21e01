// Per-position player pools and the lookup seam the auction flow reads from.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::PositionKey;

/// A player that can be revealed on the auction card.
///
/// Identity is the player's `name`: two cards with the same name are the
/// same player as far as the no-immediate-repeat rule is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCard {
    pub name: String,
    /// Card image asset reference.
    #[serde(rename = "imagePath", default)]
    pub image: String,
    /// Base auction price, in millions.
    pub base_price: u32,
}

/// Read-only lookup from a position to its pool of player cards.
pub trait PlayerPool {
    /// Cards available for `key`. A position with no data yields an empty slice.
    fn players_for(&self, key: PositionKey) -> &[PlayerCard];
}

/// In-memory pool keyed by position.
#[derive(Debug, Clone, Default)]
pub struct StaticPlayerPool {
    pools: HashMap<PositionKey, Vec<PlayerCard>>,
}

impl StaticPlayerPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pool for one position.
    pub fn insert(&mut self, key: PositionKey, cards: Vec<PlayerCard>) {
        self.pools.insert(key, cards);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, key: PositionKey, cards: Vec<PlayerCard>) -> Self {
        self.insert(key, cards);
        self
    }

    /// Load `<dir>/<stem>.json` for every position key.
    ///
    /// Each file holds a JSON array of `{ "name", "imagePath", "basePrice" }`.
    /// A missing or malformed file leaves that position empty and is logged;
    /// it never fails the load.
    pub fn load_dir(dir: &Path) -> Self {
        let mut pool = StaticPlayerPool::new();

        for key in PositionKey::ALL {
            let path = dir.join(format!("{}.json", key.file_stem()));
            let text = match std::fs::read_to_string(&path) {
                Ok(t) => t,
                Err(e) => {
                    warn!("No player pool for {} at {}: {}", key, path.display(), e);
                    continue;
                }
            };
            match serde_json::from_str::<Vec<PlayerCard>>(&text) {
                Ok(cards) => {
                    info!(
                        "Loaded {} {} cards from {}",
                        cards.len(),
                        key,
                        path.display()
                    );
                    pool.insert(key, cards);
                }
                Err(e) => {
                    warn!(
                        "Ignoring unreadable player pool {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }

        pool
    }

    /// Total number of cards across all positions.
    pub fn total_cards(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }
}

impl PlayerPool for StaticPlayerPool {
    fn players_for(&self, key: PositionKey) -> &[PlayerCard] {
        self.pools.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }
}
