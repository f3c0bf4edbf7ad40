use crate::viewer::to_glui;
use glui::graphics::DrawShaderSelector;
use glui::mecs::{DrawComponent, Entity, StaticWorld};
use glui::tools::mesh::{Mesh, MeshOnGPU};
use glui::tools::{Mat4, Uniform, Vec3};
use neontrail::{CarState, WheelIndex};
use std::f32::consts::PI;

const BODY_SIZE: (f32, f32, f32) = (2.2, 0.4, 4.2);
const WHEEL_RADIUS: f32 = 0.4;
const WHEEL_WIDTH: f32 = 0.25;

/// Body and wheel meshes of the car.
pub struct CarView {
    _body_mesh: MeshOnGPU,
    _wheel_mesh: MeshOnGPU,
    body: Entity,
    wheels: [Entity; 4],
    wheel_turn: f32,
}

impl CarView {
    pub fn new(world: &mut StaticWorld, body: Entity) -> CarView {
        let body_mesh = Mesh::unit_cube().upload_to_gpu();
        let wheel_mesh = Mesh::unit_cylinder(16).upload_to_gpu();

        world.add_component(body, Self::draw_component(&body_mesh));
        let wheels = [
            world.new_entity_with_component(Self::draw_component(&wheel_mesh)),
            world.new_entity_with_component(Self::draw_component(&wheel_mesh)),
            world.new_entity_with_component(Self::draw_component(&wheel_mesh)),
            world.new_entity_with_component(Self::draw_component(&wheel_mesh)),
        ];

        CarView {
            _body_mesh: body_mesh,
            _wheel_mesh: wheel_mesh,
            body,
            wheels,
            wheel_turn: 0.0,
        }
    }

    fn draw_component(mesh: &MeshOnGPU) -> DrawComponent {
        DrawComponent::from_render_seq(mesh.non_owning_render_seq(
            DrawShaderSelector::DiffusePhong,
            vec![Uniform::Vector3(
                "L".to_owned(),
                Vec3::new(1.0, 0.3, 1.0).sgn(),
            )],
        ))
    }

    pub fn place(&mut self, world: &mut StaticWorld, car: &CarState, wheels: &[glam::Vec3; 4], dt: f32) {
        self.wheel_turn += car.speed * dt / WHEEL_RADIUS;
        let (w, h, l) = BODY_SIZE;

        if let Some(body_draw) = world.component_mut::<DrawComponent>(self.body) {
            body_draw.model_matrix = Mat4::offset(to_glui(car.position))
                * Mat4::rotate_y(car.heading)
                * Mat4::scale3(Vec3::new(w, h, l) / 2.0);
        }

        for wheel in WheelIndex::ALL.iter().copied() {
            let p = wheels[wheel.index()];
            if let Some(wheel_draw) = world.component_mut::<DrawComponent>(self.wheels[wheel.index()]) {
                wheel_draw.model_matrix = Mat4::offset(Vec3::new(p.x, 0.0, p.z))
                    * Mat4::rotate_y(car.heading + PI / 2.0)
                    * Mat4::scale3(Vec3::new(WHEEL_RADIUS, WHEEL_RADIUS, WHEEL_WIDTH))
                    * Mat4::offset(Vec3::new(0.0, 1.0, 0.0))
                    * Mat4::rotate_z(self.wheel_turn);
            }
        }
    }
}
