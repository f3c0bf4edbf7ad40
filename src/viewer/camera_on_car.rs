use crate::viewer::CarPose;

use glui::mecs::*;
use glui::tools::*;
use std::time::Duration;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum View {
    Overhead,
    Chase,
    TopDown,
}

impl View {
    pub fn cycle(self) -> Self {
        match self {
            View::Overhead => View::Chase,
            View::Chase => View::TopDown,
            View::TopDown => View::Overhead,
        }
    }
}

pub struct CamFollowCar {
    car: Entity,
    cam_entity: Entity,
    view: View,
    max_cam_speed: f32,
}

impl System for CamFollowCar {
    fn update(&mut self, delta_time: Duration, world: &mut StaticWorld) {
        let dt = delta_time.as_secs_f32();

        let pose = match world.component_mut::<CarPose>(self.car) {
            Some(pose) => *pose,
            None => return,
        };
        let p = self.cam_should_be_pos(&pose);

        let cam = match world.component_mut::<DataComponent<Camera>>(self.cam_entity) {
            Some(cam) => &mut cam.data,
            None => return,
        };

        let cam_p = cam.params.spatial.pos;
        let delta = p - cam_p;
        let d = delta.length();
        let step = (5.0 + d * 0.4 + d * d * 0.3).min(self.max_cam_speed) * dt;

        let new_pos = if d < step || d < 0.001 {
            p
        } else {
            cam_p + delta.sgn() * step
        };

        let t = cam.params.spatial.target;
        let delta = pose.position - t;
        let d = delta.length();
        let new_target = if d < step || d < 0.001 {
            pose.position
        } else {
            t + delta.sgn() * step
        };

        self.max_cam_speed = (self.max_cam_speed + 100.0 * dt).min(200.0);

        cam.params
            .look_at(new_pos, new_target, Vec3::new(0.0, 1.0, 0.0));
    }

    fn window_event(&mut self, event: &GlutinWindowEvent, _world: &mut StaticWorld) -> bool {
        if let GlutinWindowEvent::KeyboardInput { input, .. } = event {
            let press = input.state == GlutinElementState::Pressed;
            if input.virtual_keycode == Some(GlutinKey::T) && !press {
                self.view = self.view.cycle();
                self.max_cam_speed = 0.0;
            }
        }

        false
    }
}

impl CamFollowCar {
    fn cam_should_be_pos(&self, pose: &CarPose) -> Vec3 {
        let p = pose.position;
        match self.view {
            View::Overhead => p + Vec3::new(0.0, 15.0, 15.0),
            View::Chase => p + Vec3::new(0.0, 5.0, 0.0) - pose.forward * 10.0,
            View::TopDown => p + Vec3::new(0.0, 30.0, 0.0) - pose.forward * 0.5,
        }
    }

    pub fn new(car: Entity, camera: Entity, world: &mut StaticWorld) -> CamFollowCar {
        let me = CamFollowCar {
            car,
            cam_entity: camera,
            view: View::Overhead,
            max_cam_speed: 0.0,
        };

        let pose = world
            .component_mut::<CarPose>(car)
            .map(|pose| *pose)
            .unwrap_or_else(CarPose::new);
        let p = me.cam_should_be_pos(&pose);
        if let Some(cam) = world.component_mut::<DataComponent<Camera>>(camera) {
            cam.data
                .params
                .look_at(p, pose.position, Vec3::new(0.0, 1.0, 0.0));
        }
        me
    }
}
