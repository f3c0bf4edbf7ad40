mod viewer;

extern crate glui;
extern crate glui_proc;

use crate::viewer::camera_on_car::CamFollowCar;
use crate::viewer::drive_system::DriveSystem;
use crate::viewer::ground::Ground;
use crate::viewer::gui::Gui;
use glui::mecs::World;
use glui::mecs::*;
use glui::tools::*;
use log::{info, warn, Level};
use neontrail::SandboxConfig;
use std::path::Path;

const CONFIG_PATH: &str = "neontrail.json";

fn main() {
    if let Err(e) = simple_logger::init_with_level(Level::Info) {
        eprintln!("logger: {}", e);
    }

    let config_path = Path::new(CONFIG_PATH);
    let (config, watched) = if config_path.exists() {
        match SandboxConfig::load_json(config_path) {
            Ok(config) => (config, Some(config_path)),
            Err(e) => {
                warn!("{}: {}, using defaults", CONFIG_PATH, e);
                (SandboxConfig::default(), Some(config_path))
            }
        }
    } else {
        info!("no {}, using defaults", CONFIG_PATH);
        (SandboxConfig::default(), None)
    };

    let mut w: World = World::new_win(Vec2::new(1024.0, 768.0), "Neon trails", Vec3::grey(0.05));

    let ds = DrawSystem::new(&mut w, NoController {});
    let camera_entity = ds.camera_entity;
    w.add_system(ds);

    let ground = Ground::new(w.as_static_mut(), 200.0);
    w.add_system(ground);

    let driver = DriveSystem::new(w.as_static_mut(), config, watched, 1.0 / 60.0);
    let car = driver.car_entity();
    w.add_system(driver);

    let cam = CamFollowCar::new(car, camera_entity, w.as_static_mut());
    w.add_system(cam);

    w.add_gui(Gui::from_car(car));

    w.run();
}
