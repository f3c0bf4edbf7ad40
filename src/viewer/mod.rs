pub mod camera_on_car;
pub mod car_view;
pub mod drive_system;
pub mod ground;
pub mod gui;
pub mod trail_view;

use glui::mecs::Component;
use glui::tools::Vec3;

/// Car pose as the other systems see it; written by `DriveSystem` after every
/// tick.
#[derive(Debug, Copy, Clone, Component)]
pub struct CarPose {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub speed: f32,
    pub trail_points: usize,
}

impl CarPose {
    pub fn new() -> CarPose {
        CarPose {
            position: Vec3::origin(),
            forward: Vec3::new(0.0, 0.0, 1.0),
            right: Vec3::new(-1.0, 0.0, 0.0),
            speed: 0.0,
            trail_points: 0,
        }
    }
}

pub fn to_glui(v: glam::Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}
