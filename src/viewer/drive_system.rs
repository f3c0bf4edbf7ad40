use crate::viewer::car_view::CarView;
use crate::viewer::trail_view::TrailView;
use crate::viewer::{to_glui, CarPose};
use glui::mecs::*;
use log::{info, warn};
use neontrail::{
    ConfigWatcher, DriveKey, DriveRecorder, FixedStep, KeyState, Sandbox, SandboxConfig,
};
use std::path::Path;
use std::time::Duration;

const LAST_DRIVE: &str = "last_drive.json";
const SAVED_DRIVE: &str = "drive.json";

/// Feeds keyboard input into the sandbox and pushes the results to the scene.
pub struct DriveSystem {
    sandbox: Sandbox,
    keys: KeyState,
    recorder: DriveRecorder,
    clock: FixedStep,
    watcher: Option<ConfigWatcher>,
    car: Entity,
    car_view: CarView,
    trail_view: TrailView,
}

impl System for DriveSystem {
    fn update(&mut self, delta_time: Duration, world: &mut StaticWorld) {
        self.reload_config();

        let input = self.keys.movement_input();
        let dt = delta_time.as_secs_f32();
        let due = self.clock.advance(dt, self.sandbox.config().car.max_delta);
        for _ in 0..due {
            self.recorder.record(input);
            self.sandbox.tick(self.clock.step(), input);
        }

        let car = self.sandbox.car();
        let state = car.state();
        let wheels = car.wheel_positions();
        let trail_points = self.sandbox.trails().total_points();
        if let Some(pose) = world.component_mut::<CarPose>(self.car) {
            pose.position = to_glui(state.position);
            pose.forward = to_glui(car.forward());
            pose.right = to_glui(car.right());
            pose.speed = state.speed;
            pose.trail_points = trail_points;
        }

        self.car_view.place(world, &state, &wheels, dt);
        self.trail_view.sync(self.sandbox.trails(), world);
    }

    fn window_event(&mut self, event: &GlutinWindowEvent, world: &mut StaticWorld) -> bool {
        if let GlutinWindowEvent::KeyboardInput { input, .. } = event {
            let press = input.state == GlutinElementState::Pressed;
            if let Some(key) = input.virtual_keycode {
                match key {
                    GlutinKey::W => self.keys.set(DriveKey::Forward, press),
                    GlutinKey::S => self.keys.set(DriveKey::Back, press),
                    GlutinKey::A => self.keys.set(DriveKey::Left, press),
                    GlutinKey::D => self.keys.set(DriveKey::Right, press),
                    GlutinKey::R if !press => {
                        self.sandbox.reset();
                        self.recorder.clear();
                        self.clock.reset();
                        self.trail_view.sync(self.sandbox.trails(), world);
                    }
                    GlutinKey::P if !press => self.save_drive(SAVED_DRIVE),
                    _ => {}
                }
            }
        }
        if let GlutinWindowEvent::Focused(false) = event {
            self.keys.release_all();
        }

        false
    }
}

impl DriveSystem {
    pub fn new(
        world: &mut StaticWorld,
        config: SandboxConfig,
        config_path: Option<&Path>,
        tick_seconds: f32,
    ) -> DriveSystem {
        let watcher = config_path.and_then(|path| match ConfigWatcher::new(path) {
            Ok(w) => Some(w),
            Err(e) => {
                warn!("not watching {}: {}", path.display(), e);
                None
            }
        });

        let car = world.entity();
        world.add_component(car, CarPose::new());
        let car_view = CarView::new(world, car);
        let trail_view = TrailView::new(world);

        DriveSystem {
            sandbox: Sandbox::new(config),
            keys: KeyState::new(),
            recorder: DriveRecorder::new(tick_seconds),
            clock: FixedStep::new(tick_seconds),
            watcher,
            car,
            car_view,
            trail_view,
        }
    }

    pub fn car_entity(&self) -> Entity {
        self.car
    }

    fn reload_config(&mut self) {
        let result = match self.watcher.as_ref().and_then(|w| w.poll()) {
            Some(result) => result,
            None => return,
        };
        match result {
            Ok(config) => {
                info!("config changed, restarting the drive");
                self.sandbox.dispose();
                self.sandbox = Sandbox::new(config);
                self.recorder.clear();
                self.clock.reset();
            }
            Err(e) => warn!("keeping the old config: {}", e),
        }
    }

    fn save_drive(&self, path: &str) {
        match self.recorder.snapshot().save_json(path) {
            Ok(()) => info!("saved drive to {}", path),
            Err(e) => warn!("failed to save {}: {}", path, e),
        }
    }
}

impl Drop for DriveSystem {
    fn drop(&mut self) {
        self.save_drive(LAST_DRIVE);
        self.sandbox.dispose();
    }
}
