use glui::graphics::{DrawShaderSelector, RenderCommand, RenderSequence};
use glui::mecs::{DrawComponent, Entity, StaticWorld, System};
use glui::tools::{Buffer, DrawMode, Mat4, Vec3, Vec4, VertexArray};

/// Dark square the trails are painted on.
#[allow(dead_code)]
pub struct Ground {
    draw: Entity,
}

impl System for Ground {}

impl Ground {
    pub fn new(world: &mut StaticWorld, size: f32) -> Ground {
        let s = size / 2.0;
        let pts = vec![
            Vec3::new(-s, 0.0, -s),
            Vec3::new(-s, 0.0, s),
            Vec3::new(s, 0.0, s),
            Vec3::new(s, 0.0, -s),
        ];
        let clr = vec![Vec4::new(0.02, 0.02, 0.03, 1.0); 4];

        let pbuf = Buffer::from_vec(&pts);
        let cbuf = Buffer::from_vec(&clr);
        let mut vao = VertexArray::new();
        vao.attrib_buffer(0, &pbuf);
        vao.attrib_buffer(1, &cbuf);

        let mut render_seq = RenderSequence::new();

        render_seq.add_buffer(pbuf.into_base_type());
        render_seq.add_buffer(cbuf.into_base_type());

        render_seq.add_command(RenderCommand {
            vao,
            mode: DrawMode::TriangleFan,
            shader: DrawShaderSelector::Colored,
            uniforms: vec![],
            transparent: false,
            instances: 1,
            wireframe: false,
        });

        let e = world.entity();
        world.add_component(
            e,
            DrawComponent {
                render_seq,
                model_matrix: Mat4::identity(),
            },
        );

        Ground { draw: e }
    }
}
