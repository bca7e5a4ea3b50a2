pub mod ground;
pub mod jump;
pub mod motion;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use springboard_core::input::{ControllerInput, decode_input};
use springboard_core::player::{Player, PlayerId};
use springboard_core::sim::{SimEvent, Simulation};
use springboard_core::springboard_sim_boilerplate;

use ground::{Terrain, resolve_ground};
use jump::JumpMachine;
use motion::{CharacterBody, ControllerConfig, integrate};

/// Per-character simulation state: body plus jump phase machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    pub body: CharacterBody,
    pub jump: JumpMachine,
}

/// Serializable snapshot of the whole playfield.
///
/// Characters live in a `BTreeMap` so snapshot bytes are stable across
/// serialize/apply roundtrips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayfieldState {
    pub players: BTreeMap<PlayerId, CharacterState>,
    pub tick: u64,
}

/// The simulation loop owning every character on a terrain.
///
/// Single-threaded and tick-driven: exactly one writer mutates bodies and
/// jump state, once per `update`. Input edges are latched between ticks and
/// consumed at most once.
pub struct Playfield {
    terrain: Terrain,
    config: ControllerConfig,
    state: PlayfieldState,
    player_ids: Vec<PlayerId>,
    pending_inputs: HashMap<PlayerId, ControllerInput>,
    paused: bool,
}

impl Playfield {
    pub fn new(terrain: Terrain) -> Self {
        Self::with_config(terrain, ControllerConfig::default())
    }

    pub fn with_config(terrain: Terrain, config: ControllerConfig) -> Self {
        Self {
            terrain,
            config,
            state: PlayfieldState {
                players: BTreeMap::new(),
                tick: 0,
            },
            player_ids: Vec::new(),
            pending_inputs: HashMap::new(),
            paused: false,
        }
    }

    pub fn state(&self) -> &PlayfieldState {
        &self.state
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn character(&self, player_id: PlayerId) -> Option<&CharacterState> {
        self.state.players.get(&player_id)
    }

    /// Queue a decoded input sample directly, bypassing the wire codec.
    /// Edge flags accumulate until the next tick consumes them.
    pub fn queue_input(&mut self, player_id: PlayerId, input: ControllerInput) {
        if let Some(pending) = self.pending_inputs.get_mut(&player_id) {
            pending.absorb(&input);
        } else {
            self.pending_inputs.insert(player_id, input);
        }
    }

    fn spawn(&mut self, player_id: PlayerId) {
        self.player_ids.push(player_id);
        self.state.players.insert(
            player_id,
            CharacterState {
                body: CharacterBody::new(self.terrain.spawn_x, self.terrain.spawn_y),
                jump: JumpMachine::new(),
            },
        );
    }
}

impl Simulation for Playfield {
    fn update(&mut self, dt: f32) -> Vec<SimEvent> {
        if self.paused {
            return Vec::new();
        }

        self.state.tick += 1;
        let mut events = Vec::new();

        for &pid in &self.player_ids {
            let input = self.pending_inputs.remove(&pid).unwrap_or_default();
            let Some(ch) = self.state.players.get_mut(&pid) else {
                continue;
            };

            // Sample ground contact before the machine looks at the flag, so
            // a touchdown and its Landed phase fall on the same tick.
            resolve_ground(&mut ch.body, &self.terrain, dt);

            if input.jump_pressed {
                ch.jump.press();
            }
            if input.jump_released {
                ch.jump.release();
            }

            let frame = ch.jump.tick(ch.body.grounded);

            if frame.impulse {
                events.push(SimEvent::Jumped { player_id: pid });
            }
            if frame.cut && ch.body.vy > 0.0 {
                events.push(SimEvent::JumpCut { player_id: pid });
            }
            if frame.landed {
                events.push(SimEvent::Landed { player_id: pid });
            }

            integrate(&mut ch.body, input.move_dir, &frame, &self.config, dt);
        }

        events
    }

    springboard_sim_boilerplate!(state_type: PlayfieldState);

    fn apply_input(&mut self, player_id: PlayerId, input: &[u8]) {
        match decode_input(input) {
            Ok(sample) => self.queue_input(player_id, sample),
            Err(e) => {
                tracing::debug!("Dropping undecodable input from player {player_id}: {e}");
            },
        }
    }

    fn player_joined(&mut self, player: &Player) {
        if player.is_spectator || self.player_ids.contains(&player.id) {
            return;
        }
        self.spawn(player.id);
    }

    fn player_left(&mut self, player_id: PlayerId) {
        self.player_ids.retain(|&id| id != player_id);
        self.state.players.remove(&player_id);
        self.pending_inputs.remove(&player_id);
    }

    fn tick_rate(&self) -> f32 {
        self.config.tick_rate_hz
    }
}
