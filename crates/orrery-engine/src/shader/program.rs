use super::error::ShaderError;
use super::stage::{StageKind, compile_stage};
use crate::render::FrameUniforms;

/// Bind group slot of the per-frame uniform block, part of the wire contract
/// between driver and shader.
pub const FRAME_UNIFORMS_GROUP: u32 = 0;
pub const FRAME_UNIFORMS_BINDING: u32 = 0;

/// Vertex input slot of the quad position attribute.
pub const POSITION_LOCATION: u32 = 0;

/// Which wire-contract slots the linked program actually declares.
///
/// A shader is allowed to omit slots it does not reference; an absent slot
/// makes the corresponding per-frame upload a silent no-op, never an error.
/// Resolved once at construction; this is a fixed record, not an open-ended
/// name map.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProgramBindings {
    /// Either stage declares the uniform block at group 0, binding 0.
    pub frame_uniforms: bool,
    /// The vertex stage consumes the position attribute at location 0.
    pub position_attribute: bool,
}

impl ProgramBindings {
    fn resolve(vertex: &naga::Module, fragment: &naga::Module) -> Self {
        Self {
            frame_uniforms: declares_frame_uniforms(vertex) || declares_frame_uniforms(fragment),
            position_attribute: consumes_position(vertex),
        }
    }
}

fn declares_frame_uniforms(module: &naga::Module) -> bool {
    module.global_variables.iter().any(|(_, var)| {
        var.space == naga::AddressSpace::Uniform
            && var.binding
                == Some(naga::ResourceBinding {
                    group: FRAME_UNIFORMS_GROUP,
                    binding: FRAME_UNIFORMS_BINDING,
                })
    })
}

fn consumes_position(module: &naga::Module) -> bool {
    module
        .entry_points
        .iter()
        .filter(|ep| ep.stage == naga::ShaderStage::Vertex)
        .any(|ep| {
            ep.function.arguments.iter().any(|arg| {
                if binding_is_position(arg.binding.as_ref()) {
                    return true;
                }
                // Inputs may also arrive as one struct argument with
                // per-member bindings.
                match &module.types[arg.ty].inner {
                    naga::TypeInner::Struct { members, .. } => members
                        .iter()
                        .any(|m| binding_is_position(m.binding.as_ref())),
                    _ => false,
                }
            })
        })
}

fn binding_is_position(binding: Option<&naga::Binding>) -> bool {
    matches!(
        binding,
        Some(naga::Binding::Location { location, .. }) if *location == POSITION_LOCATION
    )
}

/// A linked, ready-to-draw shader program.
///
/// Owns the render pipeline and the resolved binding record. Either fully
/// linked with all slots resolved, or construction returned an error; no
/// partially-usable value exists.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    uniform_layout: Option<wgpu::BindGroupLayout>,
    bindings: ProgramBindings,
}

impl ShaderProgram {
    /// Compiles both stages, links them against `surface_format`, and
    /// resolves the wire-contract bindings.
    ///
    /// `vertex_layout` describes the single vertex buffer the pipeline will
    /// be drawn with. A failed stage never reaches the link step.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        vertex_source: &str,
        fragment_source: &str,
        vertex_layout: wgpu::VertexBufferLayout<'_>,
    ) -> Result<Self, ShaderError> {
        let vertex = compile_stage(vertex_source, StageKind::Vertex)?;
        let fragment = compile_stage(fragment_source, StageKind::Fragment)?;

        let bindings = ProgramBindings::resolve(&vertex.module, &fragment.module);

        link(
            device,
            surface_format,
            vertex_source,
            fragment_source,
            bindings,
            vertex_layout,
        )
    }

    /// The linked pipeline.
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// Layout of the uniform bind group, present only when the shader
    /// declares the uniform block.
    pub fn uniform_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.uniform_layout.as_ref()
    }

    pub fn bindings(&self) -> ProgramBindings {
        self.bindings
    }
}

/// Combines two compiled stages into a pipeline.
///
/// wgpu reports inter-stage interface mismatches as validation errors during
/// pipeline creation; an error scope turns them into a `Link` result instead
/// of the device-level error callback. The stage modules are dropped once
/// the pipeline holds them, mirroring a release-after-link policy.
fn link(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
    vertex_source: &str,
    fragment_source: &str,
    bindings: ProgramBindings,
    vertex_layout: wgpu::VertexBufferLayout<'_>,
) -> Result<ShaderProgram, ShaderError> {
    let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let vs_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("orrery vertex stage"),
        source: wgpu::ShaderSource::Wgsl(vertex_source.into()),
    });
    let fs_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("orrery fragment stage"),
        source: wgpu::ShaderSource::Wgsl(fragment_source.into()),
    });

    // The uniform layout exists only when some stage declares the block;
    // otherwise the pipeline layout has no bind groups at all.
    let uniform_layout = bindings.frame_uniforms.then(|| {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("orrery frame uniforms bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: FRAME_UNIFORMS_BINDING,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(FrameUniforms::min_binding_size()),
                },
                count: None,
            }],
        })
    });

    let bind_group_layouts: Vec<&wgpu::BindGroupLayout> = uniform_layout.iter().collect();

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("orrery pipeline layout"),
        bind_group_layouts: &bind_group_layouts,
        immediate_size: 0,
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("orrery quad pipeline"),
        layout: Some(&pipeline_layout),

        vertex: wgpu::VertexState {
            module: &vs_module,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[vertex_layout],
        },

        fragment: Some(wgpu::FragmentState {
            module: &fs_module,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                // Opaque scene: the shader owns every pixel, no blending.
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        // No depth or stencil attachment exists anywhere in this driver.
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),

        multiview_mask: None,
        cache: None,
    });

    if let Some(error) = pollster::block_on(error_scope.pop()) {
        return Err(ShaderError::Link {
            diagnostic: error.to_string(),
        });
    }

    Ok(ShaderProgram {
        pipeline,
        uniform_layout,
        bindings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex_module(src: &str) -> naga::Module {
        compile_stage(src, StageKind::Vertex).unwrap().module
    }

    fn fragment_module(src: &str) -> naga::Module {
        compile_stage(src, StageKind::Fragment).unwrap().module
    }

    const PLAIN_VERTEX: &str = r"
        @vertex
        fn vs_main(@builtin(vertex_index) i: u32) -> @builtin(position) vec4<f32> {
            return vec4<f32>(0.0, 0.0, 0.0, 1.0);
        }
    ";

    const POSITION_VERTEX: &str = r"
        @vertex
        fn vs_main(@location(0) position: vec2<f32>) -> @builtin(position) vec4<f32> {
            return vec4<f32>(position, 0.0, 1.0);
        }
    ";

    const STRUCT_VERTEX: &str = r"
        struct VertexIn {
            @location(0) position: vec2<f32>,
        }
        @vertex
        fn vs_main(in: VertexIn) -> @builtin(position) vec4<f32> {
            return vec4<f32>(in.position, 0.0, 1.0);
        }
    ";

    const PLAIN_FRAGMENT: &str = r"
        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(0.0, 0.0, 0.0, 1.0);
        }
    ";

    const UNIFORM_FRAGMENT: &str = r"
        struct FrameUniforms {
            camera: mat4x4<f32>,
            resolution: vec2<f32>,
            time: i32,
        }
        @group(0) @binding(0) var<uniform> frame: FrameUniforms;

        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(frame.resolution, 0.0, 1.0);
        }
    ";

    // ── frame uniforms slot ───────────────────────────────────────────────

    #[test]
    fn uniform_block_presence_is_detected() {
        let bindings = ProgramBindings::resolve(
            &vertex_module(POSITION_VERTEX),
            &fragment_module(UNIFORM_FRAGMENT),
        );
        assert!(bindings.frame_uniforms);
    }

    #[test]
    fn omitted_uniform_block_resolves_as_absent() {
        let bindings = ProgramBindings::resolve(
            &vertex_module(POSITION_VERTEX),
            &fragment_module(PLAIN_FRAGMENT),
        );
        assert!(!bindings.frame_uniforms);
    }

    // ── position attribute slot ───────────────────────────────────────────

    #[test]
    fn position_attribute_is_detected() {
        let bindings = ProgramBindings::resolve(
            &vertex_module(POSITION_VERTEX),
            &fragment_module(PLAIN_FRAGMENT),
        );
        assert!(bindings.position_attribute);
    }

    #[test]
    fn position_attribute_inside_input_struct_is_detected() {
        let bindings = ProgramBindings::resolve(
            &vertex_module(STRUCT_VERTEX),
            &fragment_module(PLAIN_FRAGMENT),
        );
        assert!(bindings.position_attribute);
    }

    #[test]
    fn builtin_only_vertex_resolves_position_as_absent() {
        let bindings = ProgramBindings::resolve(
            &vertex_module(PLAIN_VERTEX),
            &fragment_module(PLAIN_FRAGMENT),
        );
        assert!(!bindings.position_attribute);
    }
}
