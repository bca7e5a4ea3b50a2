use serde::{Deserialize, Serialize};

use crate::jump::JumpTick;

/// Gravity acceleration (units/s^2, downward).
pub const GRAVITY: f32 = -30.0;
/// Horizontal move speed.
pub const MOVE_SPEED: f32 = 8.0;
/// Take-off velocity.
pub const JUMP_VELOCITY: f32 = 12.0;
/// Max fall speed (positive magnitude, clamped downward).
pub const TERMINAL_VELOCITY: f32 = 25.0;
/// Fraction of upward velocity kept by the short-hop cutoff.
pub const JUMP_CUT_FACTOR: f32 = 0.45;
/// Simulation tick rate in Hz.
pub const TICK_RATE_HZ: f32 = 60.0;

/// Configurable controller tuning, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub gravity: f32,
    pub move_speed: f32,
    pub jump_velocity: f32,
    pub terminal_velocity: f32,
    pub jump_cut_factor: f32,
    pub tick_rate_hz: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_speed: MOVE_SPEED,
            jump_velocity: JUMP_VELOCITY,
            terminal_velocity: TERMINAL_VELOCITY,
            jump_cut_factor: JUMP_CUT_FACTOR,
            tick_rate_hz: TICK_RATE_HZ,
        }
    }
}

impl ControllerConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is
    /// missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("SPRINGBOARD_CONFIG")
            .unwrap_or_else(|_| "config/springboard.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<ControllerConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    ControllerConfig::default()
                },
            },
            Err(_) => ControllerConfig::default(),
        }
    }
}

/// Kinematic state of one character. `y` is the feet position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterBody {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
}

impl CharacterBody {
    pub fn new(spawn_x: f32, spawn_y: f32) -> Self {
        Self {
            x: spawn_x,
            y: spawn_y,
            vx: 0.0,
            vy: 0.0,
            grounded: false,
        }
    }
}

/// Advance a body's velocity and position for one tick.
///
/// The jump machine decides phase; this only turns its `JumpTick` into
/// velocity. Gravity pulls every tick unless the take-off impulse overrides
/// the vertical component, and fall speed never exceeds `terminal_velocity`.
pub fn integrate(
    body: &mut CharacterBody,
    move_dir: f32,
    frame: &JumpTick,
    cfg: &ControllerConfig,
    dt: f32,
) {
    // Sanitize NaN/Inf from the wire.
    let move_dir = if move_dir.is_finite() { move_dir } else { 0.0 };
    body.vx = move_dir * cfg.move_speed;

    if frame.impulse {
        body.vy = cfg.jump_velocity;
        body.grounded = false;
    } else {
        if frame.cut && body.vy > 0.0 {
            body.vy *= cfg.jump_cut_factor;
        }
        body.vy += cfg.gravity * dt;
    }

    if body.vy < -cfg.terminal_velocity {
        body.vy = -cfg.terminal_velocity;
    }

    body.x += body.vx * dt;
    body.y += body.vy * dt;
}
