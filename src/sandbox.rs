use crate::car::{Car, CarState, WheelIndex};
use crate::config::SandboxConfig;
use crate::input::{clamp_delta, DirectionalInput};
use crate::wheel_trail::TrailSystem;
use glam::Vec3;
use log::debug;
use std::time::Duration;

/// What one tick produced, for camera follow and HUDs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TickReport {
    pub car: CarState,
    pub wheels: [Vec3; 4],
}

/// Drives the car and its trails in lockstep: the car finishes its update
/// before the trails see its wheels.
#[derive(Debug, Clone)]
pub struct Sandbox {
    config: SandboxConfig,
    car: Car,
    trails: TrailSystem,
    ticks: u64,
    elapsed: f32,
}

impl Sandbox {
    pub fn new(config: SandboxConfig) -> Sandbox {
        Sandbox {
            car: Car::new(config.car),
            trails: TrailSystem::new(config.trail),
            config,
            ticks: 0,
            elapsed: 0.0,
        }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn car(&self) -> &Car {
        &self.car
    }

    pub fn trails(&self) -> &TrailSystem {
        &self.trails
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed
    }

    pub fn tick(&mut self, delta_time: f32, input: DirectionalInput) -> TickReport {
        let dt = clamp_delta(delta_time, self.config.car.max_delta);

        let car = self.car.update(dt, input);
        let wheels = self.car.wheel_positions();
        self.trails.update(dt, &wheels, car.moving);

        self.ticks += 1;
        self.elapsed += dt;
        TickReport { car, wheels }
    }

    pub fn tick_duration(&mut self, delta_time: Duration, input: DirectionalInput) -> TickReport {
        self.tick(delta_time.as_secs_f32(), input)
    }

    /// Feeds a whole input stream at a fixed step, returning the last report.
    pub fn run<I>(&mut self, delta_time: f32, inputs: I) -> Option<TickReport>
    where
        I: IntoIterator<Item = DirectionalInput>,
    {
        inputs
            .into_iter()
            .map(|input| self.tick(delta_time, input))
            .last()
    }

    pub fn reset(&mut self) {
        self.car.reset();
        self.trails.clear();
        debug!("sandbox reset after {} ticks", self.ticks);
        self.ticks = 0;
        self.elapsed = 0.0;
    }

    pub fn dispose(&mut self) {
        self.trails.dispose();
    }

    pub fn trail_lengths(&self) -> [usize; 4] {
        let mut lengths = [0; 4];
        for wheel in WheelIndex::ALL.iter().copied() {
            lengths[wheel.index()] = self.trails.points(wheel).len();
        }
        lengths
    }
}

/// Banks variable frame time and hands it out in whole fixed-size ticks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedStep {
    step: f32,
    pending: f32,
}

impl FixedStep {
    pub fn new(step: f32) -> FixedStep {
        FixedStep { step, pending: 0.0 }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Adds one frame (clamped to `max_delta`) and returns how many ticks
    /// are now due.
    pub fn advance(&mut self, frame_time: f32, max_delta: f32) -> u32 {
        if !(self.step > 0.0) {
            return 0;
        }

        self.pending += clamp_delta(frame_time, max_delta);
        let mut due = 0;
        while self.pending >= self.step {
            self.pending -= self.step;
            due += 1;
        }
        due
    }

    pub fn reset(&mut self) {
        self.pending = 0.0;
    }
}
