/// Seeded random input, shaped like a player holding keys down.
///
/// All randomness comes from a seeded `StdRng` so a given seed always
/// produces the same input sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entities::InputSnapshot;

/// Longest run, in ticks, a key stays in one state.
pub const MAX_RUN: u32 = 30;

#[derive(Debug, Clone, Copy, Default)]
struct KeyRun {
    held: bool,
    remaining: u32,
}

impl KeyRun {
    fn step(&mut self, rng: &mut impl Rng, press_chance: f64) -> bool {
        if self.remaining == 0 {
            self.held = rng.gen_bool(press_chance);
            self.remaining = rng.gen_range(1..=MAX_RUN);
        }
        self.remaining -= 1;
        self.held
    }
}

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: StdRng,
    left: KeyRun,
    right: KeyRun,
    jump: KeyRun,
    fire: KeyRun,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            left: KeyRun::default(),
            right: KeyRun::default(),
            jump: KeyRun::default(),
            fire: KeyRun::default(),
        }
    }

    pub fn next_input(&mut self) -> InputSnapshot {
        InputSnapshot {
            move_left: self.left.step(&mut self.rng, 0.4),
            move_right: self.right.step(&mut self.rng, 0.4),
            jump: self.jump.step(&mut self.rng, 0.2),
            fire: self.fire.step(&mut self.rng, 0.15),
        }
    }
}

impl Iterator for Autopilot {
    type Item = InputSnapshot;

    fn next(&mut self) -> Option<InputSnapshot> {
        Some(self.next_input())
    }
}
