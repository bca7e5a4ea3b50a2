use serde::{Deserialize, Serialize};

/// Unique identifier for a player in the simulation.
pub type PlayerId = u64;

/// A participant whose character lives in the playfield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub is_spectator: bool,
}
