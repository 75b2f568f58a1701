// Player and matchup representation.

use serde::{Deserialize, Serialize};

/// Stable identifier of a registered player (the SQLite row id).
pub type PlayerId = i64;

/// A registered tournament player.
///
/// Names are not unique: two registrations with the same name are two
/// distinct players, told apart only by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Team the player chose, if any. Never validated against a roster.
    pub team: Option<String>,
    /// Rank assigned by the most recent pick-order draw (1 picks first).
    pub pick_order: Option<u32>,
}

/// Registration input. Team and pick order may be supplied up front.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub pick_order: Option<u32>,
}

impl NewPlayer {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One player's slot in a pick-order draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickAssignment {
    pub player_id: PlayerId,
    pub name: String,
    pub pick_order: u32,
}

/// A head-to-head pairing: `home` comes from bracket A, `away` from bracket B.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matchup {
    pub home: Player,
    pub away: Player,
}
