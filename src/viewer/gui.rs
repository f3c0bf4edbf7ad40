use crate::viewer::CarPose;
use glui::gui::{gui_primitives, Align, FontSize, GridLayout, GuiBuilder, GuiDimension, Text};
use glui::mecs::{Entity, StaticWorld};
use glui::tools::Vec4;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Clone, PartialEq, Debug)]
pub struct Gui {
    pub speed: f32,
    pub trail_points: usize,
    pub car: Entity,
}

#[allow(unused_must_use)]
impl GuiBuilder for Gui {
    fn build(&self) {
        let mut disp = HashMap::new();
        disp.insert(
            "Speed: ",
            format!("{} km/h", (self.speed * 3.6 * 10.0).round() / 10.0),
        );
        disp.insert("Trail: ", format!("{} pts", self.trail_points));
        disp.insert("Keys: ", "WASD, R reset, P save, T view".to_owned());

        -GridLayout {
            row_heights: vec![GuiDimension::Units(120.0), GuiDimension::Default],
            col_widths: vec![GuiDimension::Units(320.0), GuiDimension::Default],
            ..Default::default()
        } << {
            gui_primitives::build_table_proto(
                20.0,
                &disp,
                Text {
                    align: Align::left(),
                    color: Vec4::WHITE,
                    font_size: FontSize::Em(0.75),
                    ..Default::default()
                },
                Text {
                    align: Align::left(),
                    color: Vec4::WHITE,
                    font_size: FontSize::Em(0.75),
                    ..Default::default()
                },
            );
        }
    }

    fn update(&mut self, _delta_time: Duration, world: &mut StaticWorld) {
        if let Some(pose) = world.component_mut::<CarPose>(self.car) {
            self.speed = pose.speed;
            self.trail_points = pose.trail_points;
        }
    }
}

impl Gui {
    pub fn from_car(car: Entity) -> Gui {
        Gui {
            speed: 0.0,
            trail_points: 0,
            car,
        }
    }
}
