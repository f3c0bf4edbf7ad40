use glui::graphics::{DrawShaderSelector, RenderCommand, RenderSequence};
use glui::mecs::{DrawComponent, Entity, StaticWorld};
use glui::tools::{Buffer, DrawMode, Vec3, Vec4, VertexArray};
use neontrail::{TrailSystem, WheelIndex};

struct RibbonDraw {
    entity: Entity,
    pos_buf: Buffer<Vec3>,
    clr_buf: Buffer<Vec4>,
    color: Vec4,
    revision: Option<u64>,
}

/// Uploads each wheel's ribbon whenever the trail system replaced it.
pub struct TrailView {
    ribbons: Vec<RibbonDraw>,
}

impl TrailView {
    pub fn new(world: &mut StaticWorld) -> TrailView {
        let ribbons = WheelIndex::ALL
            .iter()
            .map(|&wheel| {
                let mut render_seq = RenderSequence::new();
                render_seq.add_command(RenderCommand {
                    vao: VertexArray::new(),
                    mode: DrawMode::Triangles,
                    shader: DrawShaderSelector::Colored,
                    uniforms: vec![],
                    transparent: false,
                    instances: 1,
                    wireframe: false,
                });

                let entity = world.new_entity_with_component(DrawComponent::from_render_seq(render_seq));
                let [r, g, b, a] = wheel.color();

                RibbonDraw {
                    entity,
                    pos_buf: Buffer::new(),
                    clr_buf: Buffer::new(),
                    color: Vec4::new(r, g, b, a),
                    revision: None,
                }
            })
            .collect();

        TrailView { ribbons }
    }

    pub fn sync(&mut self, trails: &TrailSystem, world: &mut StaticWorld) {
        for (wheel, draw) in WheelIndex::ALL.iter().copied().zip(self.ribbons.iter_mut()) {
            let revision = trails.ribbon_revision(wheel);
            if draw.revision == Some(revision) {
                continue;
            }
            draw.revision = Some(revision);

            let pts = trails
                .ribbon(wheel)
                .triangle_list()
                .into_iter()
                .map(|[x, y, z]| Vec3::new(x, y, z))
                .collect::<Vec<Vec3>>();
            let clr = vec![draw.color; pts.len()];

            if let Some(draw_comp) = world.component_mut::<DrawComponent>(draw.entity) {
                let vao = &mut draw_comp.render_seq.command_mut(0).vao;
                if !pts.is_empty() {
                    draw.pos_buf.set_data(&pts);
                    draw.clr_buf.set_data(&clr);
                    vao.attrib_buffer(0, &draw.pos_buf);
                    vao.attrib_buffer(1, &draw.clr_buf);
                }
                vao.set_indices_range(0..pts.len());
            }
        }
    }
}
