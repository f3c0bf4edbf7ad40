use crate::input::DirectionalInput;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

/// Seeded random driver: holds a WASD combination for a random while, then
/// picks another one. Same seed, same drive.
#[derive(Clone)]
pub struct WanderDriver {
    rng: XorShiftRng,
    current: DirectionalInput,
    hold_left: f32,
}

impl WanderDriver {
    pub fn new(seed: u64) -> WanderDriver {
        WanderDriver {
            rng: XorShiftRng::seed_from_u64(seed),
            current: DirectionalInput::NEUTRAL,
            hold_left: 0.0,
        }
    }

    pub fn next_input(&mut self, delta_time: f32) -> DirectionalInput {
        self.hold_left -= delta_time;
        if self.hold_left <= 0.0 {
            let throttle = match self.rng.gen_range(0..20) {
                0..=11 => 1.0,
                12..=16 => 0.0,
                _ => -1.0,
            };
            let turn = match self.rng.gen_range(0..4) {
                0 => -1.0,
                1 => 1.0,
                _ => 0.0,
            };
            self.current = DirectionalInput::new(turn, throttle);
            self.hold_left = self.rng.gen_range(0.3..1.5);
        }
        self.current
    }
}
