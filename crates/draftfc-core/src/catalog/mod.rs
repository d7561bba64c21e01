// Read-only reference data: clubs, wheel positions, and per-position player pools.

pub mod players;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use players::{PlayerCard, PlayerPool, StaticPlayerPool};

// ---------------------------------------------------------------------------
// Clubs
// ---------------------------------------------------------------------------

/// Identifier of a club in the club catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClubId(pub u32);

impl fmt::Display for ClubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A club a participant can commit to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    /// Logo asset reference (a path relative to the asset root).
    pub logo: String,
}

/// Built-in club list: (id, name, logo).
const BUILTIN_CLUBS: &[(u32, &str, &str)] = &[
    (1, "Real Madrid", "/logos/real-madrid.png"),
    (2, "FC Barcelona", "/logos/barcelona.png"),
    (3, "Manchester United", "/logos/manutd.png"),
    (4, "Liverpool", "/logos/liverpool.png"),
    (5, "Bayern Munich", "/logos/bayern.png"),
    (6, "AC Milan", "/logos/ac-milan.png"),
    (7, "Juventus", "/logos/juventus.png"),
    (8, "Inter Milan", "/logos/inter.png"),
    (9, "Chelsea", "/logos/chelsea.png"),
    (10, "Arsenal", "/logos/arsenal.png"),
    (11, "Manchester City", "/logos/man-city.png"),
    (12, "Paris Saint-Germain", "/logos/psg.png"),
    (13, "Borussia Dortmund", "/logos/dortmund.png"),
    (14, "Atlético Madrid", "/logos/atletico.png"),
    (15, "Tottenham Hotspur", "/logos/spurs.png"),
    (16, "Ajax", "/logos/ajax.png"),
    (17, "Benfica", "/logos/benfica.png"),
    (18, "FC Porto", "/logos/porto.png"),
    (19, "AS Roma", "/logos/roma.png"),
    (20, "Napoli", "/logos/napoli.png"),
];

/// Ordered, read-only list of clubs.
#[derive(Debug, Clone, Default)]
pub struct ClubCatalog {
    clubs: Vec<Club>,
}

impl ClubCatalog {
    /// Build a catalog from an explicit club list. Display order is the list order.
    pub fn new(clubs: Vec<Club>) -> Self {
        ClubCatalog { clubs }
    }

    /// The twenty clubs shipped with the game.
    pub fn builtin() -> Self {
        let clubs = BUILTIN_CLUBS
            .iter()
            .map(|&(id, name, logo)| Club {
                id: ClubId(id),
                name: name.to_string(),
                logo: logo.to_string(),
            })
            .collect();
        ClubCatalog { clubs }
    }

    pub fn by_id(&self, id: ClubId) -> Option<&Club> {
        self.clubs.iter().find(|c| c.id == id)
    }

    pub fn all(&self) -> &[Club] {
        &self.clubs
    }

    pub fn len(&self) -> usize {
        self.clubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// The closed set of positions on the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionKey {
    Goalkeeper,
    CentreBack,
    RightBack,
    LeftBack,
    CentralMidfielder,
    AttackingMidfielder,
    LeftWinger,
    RightWinger,
    Striker,
}

impl PositionKey {
    /// Every key, in wheel order.
    pub const ALL: [PositionKey; 9] = [
        PositionKey::Goalkeeper,
        PositionKey::CentreBack,
        PositionKey::RightBack,
        PositionKey::LeftBack,
        PositionKey::CentralMidfielder,
        PositionKey::AttackingMidfielder,
        PositionKey::LeftWinger,
        PositionKey::RightWinger,
        PositionKey::Striker,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            PositionKey::Goalkeeper => "GK",
            PositionKey::CentreBack => "CB",
            PositionKey::RightBack => "RB",
            PositionKey::LeftBack => "LB",
            PositionKey::CentralMidfielder => "CM",
            PositionKey::AttackingMidfielder => "CAM",
            PositionKey::LeftWinger => "LW",
            PositionKey::RightWinger => "RW",
            PositionKey::Striker => "ST",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            PositionKey::Goalkeeper => "Goalkeeper",
            PositionKey::CentreBack => "Centre Back",
            PositionKey::RightBack => "Right Back",
            PositionKey::LeftBack => "Left Back",
            PositionKey::CentralMidfielder => "Central Midfielder",
            PositionKey::AttackingMidfielder => "Attacking Midfielder",
            PositionKey::LeftWinger => "Left Winger",
            PositionKey::RightWinger => "Right Winger",
            PositionKey::Striker => "Striker",
        }
    }

    /// Wheel segment colour as a `#RRGGBB` string.
    pub fn color(&self) -> &'static str {
        match self {
            PositionKey::Goalkeeper => "#FFD700",
            PositionKey::CentreBack => "#4CAF50",
            PositionKey::RightBack => "#2196F3",
            PositionKey::LeftBack => "#9C27B0",
            PositionKey::CentralMidfielder => "#FF9800",
            PositionKey::AttackingMidfielder => "#F44336",
            PositionKey::LeftWinger => "#00BCD4",
            PositionKey::RightWinger => "#E91E63",
            PositionKey::Striker => "#FF5722",
        }
    }

    /// File stem used for the on-disk player pool ("gk", "cam", ...).
    pub fn file_stem(&self) -> String {
        self.short_name().to_lowercase()
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// One segment of the position wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionEntry {
    pub id: u32,
    pub key: PositionKey,
    pub full_name: String,
    /// `#RRGGBB` colour of the wheel segment.
    pub color: String,
}

impl PositionEntry {
    pub fn short_name(&self) -> &'static str {
        self.key.short_name()
    }
}

/// Ordered list of wheel segments. Index order is the clockwise segment order.
#[derive(Debug, Clone, Default)]
pub struct PositionCatalog {
    entries: Vec<PositionEntry>,
}

impl PositionCatalog {
    pub fn new(entries: Vec<PositionEntry>) -> Self {
        PositionCatalog { entries }
    }

    /// All nine positions, ids 1..=9, in `PositionKey::ALL` order.
    pub fn builtin() -> Self {
        let entries = PositionKey::ALL
            .iter()
            .zip(1u32..)
            .map(|(&key, id)| PositionEntry {
                id,
                key,
                full_name: key.full_name().to_string(),
                color: key.color().to_string(),
            })
            .collect();
        PositionCatalog { entries }
    }

    pub fn by_id(&self, id: u32) -> Option<&PositionEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn by_key(&self, key: PositionKey) -> Option<&PositionEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Entry at a wheel segment index.
    pub fn get(&self, index: usize) -> Option<&PositionEntry> {
        self.entries.get(index)
    }

    pub fn all(&self) -> &[PositionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
