use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::uniforms::FrameUniforms;
use super::{RenderCtx, RenderTarget};
use crate::shader::{FRAME_UNIFORMS_BINDING, ProgramBindings, ShaderError, ShaderProgram};

/// One vertex of the full-screen quad: a clip-space position.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const fn v(x: f32, y: f32) -> QuadVertex {
    QuadVertex { position: [x, y] }
}

/// Two triangles covering clip space, wound counter-clockwise.
/// Vertex order is part of the attribute contract with the shader.
const QUAD_VERTICES: [QuadVertex; 6] = [
    v(-1.0, -1.0),
    v(1.0, -1.0),
    v(1.0, 1.0),
    v(1.0, 1.0),
    v(-1.0, 1.0),
    v(-1.0, -1.0),
];

/// Full-screen quad renderer.
///
/// Owns every GPU resource of the frame loop: the linked program, the static
/// vertex buffer (uploaded once, never updated), and the uniform buffer +
/// bind group when the shader declares the uniform block. Constructed once
/// at startup; construction is atomic and any shader failure propagates.
pub struct QuadRenderer {
    program: ShaderProgram,
    quad_vbo: wgpu::Buffer,
    uniform_ubo: Option<wgpu::Buffer>,
    uniform_bind_group: Option<wgpu::BindGroup>,
}

impl QuadRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let program = ShaderProgram::new(
            device,
            surface_format,
            vertex_source,
            fragment_source,
            QuadVertex::layout(),
        )?;

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // A shader that omits the uniform block gets no buffer and no bind
        // group; uploads to the absent slot become no-ops in draw().
        let (uniform_ubo, uniform_bind_group) = match program.uniform_layout() {
            Some(layout) => {
                let ubo = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("orrery frame uniforms ubo"),
                    size: u64::from(FrameUniforms::min_binding_size()),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("orrery frame uniforms bind group"),
                    layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: FRAME_UNIFORMS_BINDING,
                        resource: ubo.as_entire_binding(),
                    }],
                });
                (Some(ubo), Some(bind_group))
            }
            None => (None, None),
        };

        Ok(Self {
            program,
            quad_vbo,
            uniform_ubo,
            uniform_bind_group,
        })
    }

    /// Slots the linked shader actually declares.
    pub fn bindings(&self) -> ProgramBindings {
        self.program.bindings()
    }

    /// Uploads this frame's uniforms and issues the draw call.
    ///
    /// Exactly one 6-vertex triangle-list draw per call. The pass loads the
    /// existing contents; the quad covers every pixel, so the preceding
    /// clear is only a safety net for the first frame of a resized surface.
    pub fn draw(
        &self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        uniforms: &FrameUniforms,
    ) {
        if let Some(ubo) = &self.uniform_ubo {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(uniforms));
        }

        let mut rpass = target
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("orrery quad pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

        rpass.set_pipeline(self.program.pipeline());
        if let Some(bind_group) = &self.uniform_bind_group {
            rpass.set_bind_group(0, bind_group, &[]);
        }
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.draw(0..QUAD_VERTICES.len() as u32, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_covers_clip_space_with_two_triangles() {
        let expected: [[f32; 2]; 6] = [
            [-1.0, -1.0],
            [1.0, -1.0],
            [1.0, 1.0],
            [1.0, 1.0],
            [-1.0, 1.0],
            [-1.0, -1.0],
        ];
        let actual: Vec<[f32; 2]> = QUAD_VERTICES.iter().map(|v| v.position).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn vertex_layout_is_tightly_packed_vec2() {
        let layout = QuadVertex::layout();
        assert_eq!(layout.array_stride, 8);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x2);
    }
}
