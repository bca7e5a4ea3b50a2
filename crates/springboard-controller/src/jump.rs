use serde::{Deserialize, Serialize};

/// Ticks between the tick that consumes a jump release and the tick the
/// short-hop cutoff lands on.
///
/// The release edge is latched, consumed by the next `tick`, and the cutoff
/// is applied exactly this many ticks later. Kept as an explicit constant so
/// observers can rely on the frame the trim happens instead of discovering it
/// empirically.
pub const JUMP_CUT_DELAY_TICKS: u8 = 1;

/// Phase of the jump cycle. Exactly one value is active per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpState {
    /// Resting on supporting ground geometry.
    Grounded,
    /// One-tick wind-up between the press and the take-off impulse.
    PrepareToJump,
    /// Take-off tick; the upward impulse fires on entry.
    Jumping,
    /// Airborne, gravity-driven.
    InFlight,
    /// One-tick touchdown phase before returning to Grounded.
    Landed,
}

/// What a single tick of the machine asks the integrator to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpTick {
    pub state: JumpState,
    /// Apply the take-off impulse this tick.
    pub impulse: bool,
    /// Apply the short-hop cutoff this tick.
    pub cut: bool,
    /// Character touched down this tick.
    pub landed: bool,
}

/// Edge-latched jump state machine, advanced once per simulation tick.
///
/// `press`/`release` only latch flags; all transitions happen in `tick`, so a
/// single press can never trigger twice within one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpMachine {
    state: JumpState,
    pressed: bool,
    released: bool,
    /// Countdown armed by a consumed release; the cutoff fires at zero.
    cut_in: Option<u8>,
}

impl Default for JumpMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl JumpMachine {
    pub fn new() -> Self {
        Self {
            state: JumpState::Grounded,
            pressed: false,
            released: false,
            cut_in: None,
        }
    }

    pub fn state(&self) -> JumpState {
        self.state
    }

    /// Jump input edge: press. Only honored from solid ground; anything else
    /// is a no-op, not an error.
    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// Jump input edge: release. Trims the jump if it is still ascending.
    pub fn release(&mut self) {
        self.released = true;
    }

    /// Advance exactly one transition, consuming latched edges at most once.
    pub fn tick(&mut self, grounded: bool) -> JumpTick {
        let pressed = std::mem::take(&mut self.pressed);
        let released = std::mem::take(&mut self.released);

        let mut impulse = false;
        let mut landed = false;
        self.state = match self.state {
            JumpState::Grounded => {
                if !grounded {
                    // Walked off a ledge; no take-off phases involved.
                    JumpState::InFlight
                } else if pressed {
                    JumpState::PrepareToJump
                } else {
                    JumpState::Grounded
                }
            },
            JumpState::PrepareToJump => {
                impulse = true;
                JumpState::Jumping
            },
            JumpState::Jumping => {
                if grounded {
                    JumpState::Jumping
                } else {
                    JumpState::InFlight
                }
            },
            JumpState::InFlight => {
                if grounded {
                    landed = true;
                    JumpState::Landed
                } else {
                    JumpState::InFlight
                }
            },
            JumpState::Landed => {
                if grounded {
                    JumpState::Grounded
                } else {
                    // Contact broke again during the touchdown tick.
                    JumpState::InFlight
                }
            },
        };

        if released {
            match self.state {
                JumpState::Jumping | JumpState::InFlight => {
                    if self.cut_in.is_none() {
                        self.cut_in = Some(JUMP_CUT_DELAY_TICKS);
                    }
                },
                JumpState::PrepareToJump => {
                    // Tap shorter than one tick: keep the release latched
                    // until the jump is actually airborne.
                    self.released = true;
                },
                _ => {},
            }
        }

        if landed {
            // Touching down discards a still-pending cutoff.
            self.cut_in = None;
        }

        let cut = match self.cut_in {
            Some(0) => {
                self.cut_in = None;
                true
            },
            Some(n) => {
                self.cut_in = Some(n - 1);
                false
            },
            None => false,
        };

        JumpTick {
            state: self.state,
            impulse,
            cut,
            landed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tick the machine `n` times with a constant grounded flag.
    fn run(machine: &mut JumpMachine, n: usize, grounded: bool) -> JumpTick {
        let mut last = machine.tick(grounded);
        for _ in 1..n {
            last = machine.tick(grounded);
        }
        last
    }

    #[test]
    fn full_jump_cycle_walks_every_state() {
        let mut m = JumpMachine::new();
        assert_eq!(m.state(), JumpState::Grounded);

        m.press();
        assert_eq!(m.tick(true).state, JumpState::PrepareToJump);

        let takeoff = m.tick(true);
        assert_eq!(takeoff.state, JumpState::Jumping);
        assert!(takeoff.impulse, "Impulse fires on entry to Jumping");

        assert_eq!(m.tick(false).state, JumpState::InFlight);
        assert_eq!(m.tick(false).state, JumpState::InFlight);

        let touchdown = m.tick(true);
        assert_eq!(touchdown.state, JumpState::Landed);
        assert!(touchdown.landed);

        assert_eq!(m.tick(true).state, JumpState::Grounded);
    }

    #[test]
    fn prepare_and_landed_last_exactly_one_tick() {
        let mut m = JumpMachine::new();
        m.press();
        assert_eq!(m.tick(true).state, JumpState::PrepareToJump);
        assert_ne!(m.tick(true).state, JumpState::PrepareToJump);

        let mut m = JumpMachine::new();
        run(&mut m, 1, false); // ledge walk-off puts it airborne
        assert_eq!(m.state(), JumpState::InFlight);
        assert_eq!(m.tick(true).state, JumpState::Landed);
        assert_eq!(m.tick(true).state, JumpState::Grounded);
    }

    #[test]
    fn press_while_airborne_is_ignored() {
        let mut m = JumpMachine::new();
        m.press();
        m.tick(true);
        m.tick(true);
        m.tick(false);
        assert_eq!(m.state(), JumpState::InFlight);

        m.press();
        let frame = m.tick(false);
        assert_eq!(frame.state, JumpState::InFlight, "Airborne press is a no-op");
        assert!(!frame.impulse);
    }

    #[test]
    fn press_consumed_at_most_once() {
        let mut m = JumpMachine::new();
        m.press();
        // Full cycle from a single press.
        m.tick(true);
        m.tick(true);
        m.tick(false);
        m.tick(true);
        m.tick(true);
        assert_eq!(m.state(), JumpState::Grounded);

        // No second wind-up without a new press.
        assert_eq!(m.tick(true).state, JumpState::Grounded);
    }

    #[test]
    fn release_cut_lands_after_documented_delay() {
        let mut m = JumpMachine::new();
        m.press();
        m.tick(true); // PrepareToJump
        m.tick(true); // Jumping
        m.release();

        // The release is consumed by the next tick; the cutoff lands
        // JUMP_CUT_DELAY_TICKS ticks after that.
        let consume = m.tick(false);
        assert!(!consume.cut);
        for _ in 1..JUMP_CUT_DELAY_TICKS {
            assert!(!m.tick(false).cut);
        }
        assert!(m.tick(false).cut, "Cutoff must land exactly on schedule");
        assert!(!m.tick(false).cut, "Cutoff fires once");
    }

    #[test]
    fn release_during_windup_still_cuts_jump() {
        let mut m = JumpMachine::new();
        m.press();
        m.release(); // tap shorter than one tick
        m.tick(true); // PrepareToJump; release stays latched
        m.tick(true); // Jumping; release consumed, countdown armed
        let mut saw_cut = false;
        for _ in 0..=u64::from(JUMP_CUT_DELAY_TICKS) {
            saw_cut |= m.tick(false).cut;
        }
        assert!(saw_cut, "A sub-tick tap must still produce a short hop");
    }

    #[test]
    fn release_on_ground_is_ignored() {
        let mut m = JumpMachine::new();
        m.release();
        let frame = m.tick(true);
        assert_eq!(frame.state, JumpState::Grounded);
        assert!(!frame.cut);
        assert!(!m.tick(true).cut);
    }

    #[test]
    fn landing_discards_pending_cut() {
        let mut m = JumpMachine::new();
        m.press();
        m.tick(true);
        m.tick(true); // Jumping
        m.tick(false); // InFlight
        m.release();
        // Touch down on the same tick the release is consumed.
        let touchdown = m.tick(true);
        assert_eq!(touchdown.state, JumpState::Landed);
        assert!(!touchdown.cut);
        assert!(!m.tick(true).cut, "No cutoff after touching down");
    }

    #[test]
    fn ledge_walk_off_goes_airborne() {
        let mut m = JumpMachine::new();
        assert_eq!(m.tick(false).state, JumpState::InFlight);
        assert_eq!(m.tick(true).state, JumpState::Landed);
        assert_eq!(m.tick(true).state, JumpState::Grounded);
    }

    #[test]
    fn jumping_holds_until_liftoff() {
        // If the body somehow reads grounded during the take-off tick's
        // aftermath, the machine waits for the contact to actually break.
        let mut m = JumpMachine::new();
        m.press();
        m.tick(true);
        m.tick(true);
        assert_eq!(m.state(), JumpState::Jumping);
        assert_eq!(m.tick(true).state, JumpState::Jumping);
        assert_eq!(m.tick(false).state, JumpState::InFlight);
    }
}
