use hero_core::ParticleField;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) view: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) resolution: [f32; 2],
    pub(crate) point_size: f32,
    pub(crate) opacity: f32,
    pub(crate) fog_density: f32,
    pub(crate) _pad: [f32; 3],
}

pub(crate) struct PointResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

/// Per-instance attribute buffers. Colors are written once; positions are
/// rewritten whenever the field is marked dirty.
pub(crate) struct PointGeometry {
    pub(crate) positions: wgpu::Buffer,
    pub(crate) colors: wgpu::Buffer,
    pub(crate) count: u32,
}

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
const VEC3_STRIDE: wgpu::BufferAddress = std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress;

pub(crate) fn create_point_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    sample_count: u32,
) -> PointResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("points_shader"),
        source: wgpu::ShaderSource::Wgsl(hero_core::PARTICLES_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("points_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("points_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("points_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: VEC3_STRIDE,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &POSITION_ATTRS,
                },
                wgpu::VertexBufferLayout {
                    array_stride: VEC3_STRIDE,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &COLOR_ATTRS,
                },
            ],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("points_uniforms"),
        size: std::mem::size_of::<PointUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("points_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    PointResources {
        pipeline,
        uniform_buffer,
        bind_group,
    }
}

pub(crate) fn create_geometry(device: &wgpu::Device, field: &ParticleField) -> PointGeometry {
    let mut positions = Vec::with_capacity(field.len());
    field.positions_into(&mut positions);
    let colors = field.linear_colors();
    let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("points_positions"),
        contents: bytemuck::cast_slice(&positions),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    });
    let colors = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("points_colors"),
        contents: bytemuck::cast_slice(&colors),
        usage: wgpu::BufferUsages::VERTEX,
    });
    PointGeometry {
        positions,
        colors,
        count: field.len() as u32,
    }
}
