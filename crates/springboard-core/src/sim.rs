use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// Phase-boundary notifications emitted by a simulation tick.
///
/// External observers (animation, audio, tests) react to these instead of
/// inferring phase changes from the velocity sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Take-off impulse fired this tick.
    Jumped { player_id: PlayerId },
    /// Airborne character touched down this tick.
    Landed { player_id: PlayerId },
    /// Short-hop cutoff trimmed upward velocity this tick.
    JumpCut { player_id: PlayerId },
}

/// Core trait a Springboard simulation implements.
///
/// The host (game loop, test harness, replay tool) owns timing and transport;
/// the simulation only advances state one fixed tick at a time. Undecodable
/// input or state bytes are dropped, never an error.
pub trait Simulation: Send + Sync {
    /// Advance one simulation tick. Returns the phase events of this tick.
    fn update(&mut self, dt: f32) -> Vec<SimEvent>;

    /// Apply a player's encoded input sample to the pending latch.
    fn apply_input(&mut self, player_id: PlayerId, input: &[u8]);

    /// Serialize the authoritative simulation state for snapshot/broadcast.
    fn serialize_state(&self) -> Vec<u8>;

    /// Apply an authoritative state snapshot.
    fn apply_state(&mut self, state: &[u8]);

    /// Called when a player joins; spawns their character.
    fn player_joined(&mut self, player: &crate::player::Player);

    /// Called when a player leaves; despawns their character.
    fn player_left(&mut self, player_id: PlayerId);

    /// Simulation tick rate in Hz.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    /// Freeze the simulation; `update` becomes a no-op.
    fn pause(&mut self);

    /// Resume after a pause.
    fn resume(&mut self);
}

/// Generates the 4 boilerplate `Simulation` methods that are identical across
/// implementations: `serialize_state`, `apply_state`, `pause`, `resume`.
///
/// Requires the implementing struct to have `state: $StateType` and
/// `paused: bool` fields.
#[macro_export]
macro_rules! springboard_sim_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("simulation state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) {
            if let Ok(s) = rmp_serde::from_slice::<$StateType>(state) {
                self.state = s;
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }
    };
}
