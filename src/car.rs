use crate::input::{clamp_delta, DirectionalInput};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum WheelIndex {
    FrontRight,
    FrontLeft,
    BackRight,
    BackLeft,
}

impl WheelIndex {
    pub const ALL: [WheelIndex; 4] = [
        WheelIndex::FrontRight,
        WheelIndex::FrontLeft,
        WheelIndex::BackRight,
        WheelIndex::BackLeft,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Neon trail color, RGBA.
    pub fn color(self) -> [f32; 4] {
        match self {
            WheelIndex::FrontRight => [0.0, 1.0, 0.0, 1.0],
            WheelIndex::FrontLeft => [1.0, 0.0, 1.0, 1.0],
            WheelIndex::BackRight => [0.0, 1.0, 1.0, 1.0],
            WheelIndex::BackLeft => [1.0, 0.6, 0.0, 1.0],
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarConfig {
    pub max_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub turn_speed: f32,
    /// Below this speed the car counts as parked.
    pub speed_epsilon: f32,
    pub max_delta: f32,
    pub ride_height: f32,
    pub ground_height: f32,
    /// Vehicle-local, indexed by `WheelIndex`. Heading 0 faces +z, so the
    /// driver's right side is -x.
    pub wheel_anchors: [Vec3; 4],
}

impl Default for CarConfig {
    fn default() -> CarConfig {
        CarConfig {
            max_speed: 25.0,
            acceleration: 15.0,
            deceleration: 8.0,
            turn_speed: 3.0,
            speed_epsilon: 0.1,
            max_delta: 0.1,
            ride_height: 0.4,
            ground_height: 0.05,
            wheel_anchors: [
                Vec3::new(-0.8, 0.0, 1.3),
                Vec3::new(0.8, 0.0, 1.3),
                Vec3::new(-0.8, 0.0, -1.3),
                Vec3::new(0.8, 0.0, -1.3),
            ],
        }
    }
}

impl CarConfig {
    pub fn min_speed(&self) -> f32 {
        -self.max_speed / 2.0
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarState {
    pub position: Vec3,
    pub heading: f32,
    pub speed: f32,
    pub moving: bool,
}

impl CarState {
    pub fn parked_at(position: Vec3) -> CarState {
        CarState {
            position,
            heading: 0.0,
            speed: 0.0,
            moving: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Car {
    config: CarConfig,
    state: CarState,
    spawn: CarState,
}

impl Car {
    pub fn new(config: CarConfig) -> Car {
        let spawn = CarState::parked_at(Vec3::new(0.0, config.ride_height, 0.0));
        Car::with_state(config, spawn)
    }

    pub fn with_state(config: CarConfig, state: CarState) -> Car {
        Car {
            config,
            state,
            spawn: state,
        }
    }

    pub fn config(&self) -> &CarConfig {
        &self.config
    }

    pub fn state(&self) -> CarState {
        self.state
    }

    pub fn is_moving(&self) -> bool {
        self.state.moving
    }

    pub fn reset(&mut self) {
        self.state = self.spawn;
    }

    pub fn update(&mut self, delta_time: f32, input: DirectionalInput) -> CarState {
        let dt = clamp_delta(delta_time, self.config.max_delta);
        let input = input.clamped();
        let cfg = &self.config;
        let car = &mut self.state;

        if input.throttle > 0.0 {
            car.speed = (car.speed + cfg.acceleration * dt).min(cfg.max_speed);
        } else if input.throttle < 0.0 {
            car.speed = (car.speed - cfg.acceleration * dt).max(cfg.min_speed());
        } else {
            if car.speed > 0.0 {
                car.speed = (car.speed - cfg.deceleration * dt).max(0.0);
            } else if car.speed < 0.0 {
                car.speed = (car.speed + cfg.deceleration * dt).min(0.0);
            }

            if car.speed.abs() < cfg.speed_epsilon {
                car.speed = 0.0;
            }
        }
        car.speed = car.speed.clamp(cfg.min_speed(), cfg.max_speed);

        if car.speed.abs() > cfg.speed_epsilon {
            let reverse = if car.speed > 0.0 { 1.0 } else { -1.0 };
            car.heading -= input.turn * cfg.turn_speed * dt * reverse;
        }

        car.position.x += car.heading.sin() * car.speed * dt;
        car.position.z += car.heading.cos() * car.speed * dt;
        car.moving = car.speed.abs() >= cfg.speed_epsilon;

        self.state
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.state.heading.sin(), 0.0, self.state.heading.cos())
    }

    pub fn right(&self) -> Vec3 {
        Vec3::new(-self.state.heading.cos(), 0.0, self.state.heading.sin())
    }

    pub fn wheel_position(&self, wheel: WheelIndex) -> Vec3 {
        let rotation = Quat::from_rotation_y(self.state.heading);
        let p = self.state.position + rotation * self.config.wheel_anchors[wheel.index()];
        Vec3::new(p.x, self.config.ground_height, p.z)
    }

    pub fn wheel_positions(&self) -> [Vec3; 4] {
        let mut wheels = [Vec3::ZERO; 4];
        for wheel in WheelIndex::ALL.iter().copied() {
            wheels[wheel.index()] = self.wheel_position(wheel);
        }
        wheels
    }
}
