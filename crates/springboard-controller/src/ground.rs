use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::motion::CharacterBody;

/// Tolerance above a surface within which a slow-falling body still lands.
pub const LAND_TOLERANCE: f32 = 0.2;
/// Tolerance below a surface top within which a body snaps up onto it.
pub const SNAP_TOLERANCE: f32 = 0.1;
/// Character footprint half-width used for support queries.
pub const FOOT_HALF_WIDTH: f32 = 0.4;

/// A horizontal walkable span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub x0: f32,
    pub x1: f32,
    pub top: f32,
}

/// Ground geometry: a set of walkable surfaces plus a spawn point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub surfaces: Vec<Surface>,
    pub spawn_x: f32,
    pub spawn_y: f32,
}

impl Terrain {
    /// A single wide flat floor, for fixtures.
    pub fn flat(top: f32) -> Self {
        Self {
            surfaces: vec![Surface {
                x0: -1_000.0,
                x1: 1_000.0,
                top,
            }],
            spawn_x: 0.0,
            spawn_y: top + 2.0,
        }
    }

    /// Highest surface top under the footprint at `x`, if any.
    pub fn height_at(&self, x: f32) -> Option<f32> {
        self.surfaces
            .iter()
            .filter(|s| x + FOOT_HALF_WIDTH > s.x0 && x - FOOT_HALF_WIDTH < s.x1)
            .map(|s| s.top)
            .fold(None, |best: Option<f32>, top| {
                Some(best.map_or(top, |b| b.max(top)))
            })
    }

    /// Highest surface that can support feet at `(x, y)`: each overlapping
    /// surface is checked against the landing window independently, so a
    /// raised ledge overhead never shadows the floor beneath the body.
    pub fn support_at(&self, x: f32, y: f32, catch: f32) -> Option<f32> {
        self.surfaces
            .iter()
            .filter(|s| x + FOOT_HALF_WIDTH > s.x0 && x - FOOT_HALF_WIDTH < s.x1)
            .map(|s| s.top)
            .filter(|&top| y >= top - catch && y <= top + SNAP_TOLERANCE)
            .fold(None, |best: Option<f32>, top| {
                Some(best.map_or(top, |b| b.max(top)))
            })
    }
}

/// Number of floor runs in a generated terrain.
const NUM_RUNS: u32 = 8;

/// Generate a deterministic terrain from a seed: a long floor broken by gaps,
/// with raised ledges over some runs.
pub fn generate_terrain(seed: u64) -> Terrain {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut surfaces = Vec::new();
    let floor_top = 0.0f32;
    let mut x = 0.0f32;

    for _ in 0..NUM_RUNS {
        let run = rng.random_range(6.0..14.0);
        surfaces.push(Surface {
            x0: x,
            x1: x + run,
            top: floor_top,
        });

        if rng.random_bool(0.5) {
            let ledge_x = x + rng.random_range(1.0..run / 2.0);
            let ledge_w = rng.random_range(2.0..4.0);
            let ledge_h = rng.random_range(1.5..3.0);
            surfaces.push(Surface {
                x0: ledge_x,
                x1: ledge_x + ledge_w,
                top: floor_top + ledge_h,
            });
        }

        let gap = rng.random_range(1.5..3.0);
        x += run + gap;
    }

    Terrain {
        surfaces,
        spawn_x: 2.0,
        spawn_y: 2.0,
    }
}

/// Sample ground contact: snap a falling or resting body onto supporting
/// ground and set its grounded flag. Surfaces only support from above; a body
/// still moving upward never grounds.
pub fn resolve_ground(body: &mut CharacterBody, terrain: &Terrain, dt: f32) {
    body.grounded = false;
    if body.vy > 0.0 {
        return;
    }

    // The catch window grows with fall speed so a fast body can't tunnel
    // through the surface between two ticks.
    let catch = -body.vy * dt + LAND_TOLERANCE;
    let Some(top) = terrain.support_at(body.x, body.y, catch) else {
        return;
    };
    body.y = top;
    body.vy = 0.0;
    body.grounded = true;
}
