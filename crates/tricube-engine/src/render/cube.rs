use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::scene::{CubeDraw, FrameRecord, RenderState, Shading};

use super::mesh::{CUBE_INDEX_COUNT, CubeVertex, unit_cube};
use super::{RenderCtx, RenderTarget};

/// Per-frame uniform block; layout matches `Globals` in `cube.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct Globals {
    pub projection: [[f32; 4]; 4],
    pub light_dir: [f32; 4],
    pub light_diffuse: [f32; 4],
    pub ambient: [f32; 4],
    /// x: lighting enabled, y: flat shading.
    pub flags: [u32; 4],
}

impl Globals {
    pub(crate) fn new(state: &RenderState) -> Self {
        let mut globals = Self::zeroed();
        globals.projection = glam::Mat4::IDENTITY.to_cols_array_2d();

        if let Some(light) = state.lighting {
            globals.light_dir = light.direction.extend(0.0).to_array();
            globals.light_diffuse = light.diffuse.to_array();
            globals.ambient = light.global_ambient.to_array();
            globals.flags[0] = 1;
        }
        globals.flags[1] = u32::from(state.shading == Shading::Flat);

        globals
    }
}

/// One cube instance: model-view columns, material color, edge length.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct CubeInstance {
    pub model_view: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub size: f32,
}

impl CubeInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32,
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

impl From<&CubeDraw> for CubeInstance {
    fn from(draw: &CubeDraw) -> Self {
        Self {
            model_view: draw.model_view.to_cols_array_2d(),
            color: draw.material.ambient_diffuse.to_array(),
            size: draw.size,
        }
    }
}

/// Draws the cubes of a [`FrameRecord`] in one instanced call.
///
/// Pipeline state (lighting, shading, depth test) is fixed at construction.
pub struct CubeRenderer {
    pipeline: wgpu::RenderPipeline,
    globals: Globals,
    globals_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    mesh_vbo: wgpu::Buffer,
    mesh_ibo: wgpu::Buffer,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    depth_format: Option<wgpu::TextureFormat>,
    warned_missing_depth: bool,
}

impl CubeRenderer {
    /// Builds the pipeline. `depth_format` is `None` when depth testing is off.
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
        state: &RenderState,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tricube cube shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/cube.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tricube cube bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<Globals>() as u64),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tricube cube pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tricube cube pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[CubeVertex::layout(), CubeInstance::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // No culling, counter-clockwise front faces.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
                format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        let globals = Globals::new(state);
        let globals_ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tricube globals ubo"),
            contents: bytemuck::bytes_of(&globals),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tricube cube bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_ubo.as_entire_binding(),
            }],
        });

        let (vertices, indices) = unit_cube();
        let mesh_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tricube cube vbo"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let mesh_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tricube cube ibo"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline,
            globals,
            globals_ubo,
            bind_group,
            mesh_vbo,
            mesh_ibo,
            instance_vbo: None,
            instance_capacity: 0,
            depth_format,
            warned_missing_depth: false,
        }
    }

    /// Clears the target and draws every cube of `frame`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame: &FrameRecord) {
        let instances: Vec<CubeInstance> = frame.cubes.iter().map(CubeInstance::from).collect();

        self.globals.projection = ctx.projection.to_cols_array_2d();
        ctx.queue.write_buffer(&self.globals_ubo, 0, bytemuck::bytes_of(&self.globals));

        if !instances.is_empty() {
            self.ensure_instance_capacity(ctx, instances.len());
            if let Some(vbo) = self.instance_vbo.as_ref() {
                ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&instances));
            }
        }

        let depth_stencil_attachment = match (self.depth_format, target.depth_view) {
            (Some(format), Some(view)) => Some(wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: if frame.clear_depth {
                        wgpu::LoadOp::Clear(1.0)
                    } else {
                        wgpu::LoadOp::Load
                    },
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: format.has_stencil_aspect().then_some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(0),
                    store: wgpu::StoreOp::Store,
                }),
            }),
            _ => None,
        };

        let depth_ready = self.depth_format.is_none() || depth_stencil_attachment.is_some();
        if !depth_ready && !self.warned_missing_depth {
            log::warn!("CubeRenderer: depth testing enabled but no depth buffer bound; cubes skipped");
            self.warned_missing_depth = true;
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tricube scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(frame.clear_color.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let Some(viewport) = ctx.viewport else { return };
        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        if instances.is_empty() || !depth_ready {
            return;
        }

        rpass.set_viewport(
            viewport.x as f32,
            viewport.y as f32,
            viewport.width as f32,
            viewport.height as f32,
            0.0,
            1.0,
        );
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.mesh_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(self.mesh_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..CUBE_INDEX_COUNT as u32, 0, 0..instances.len() as u32);
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, needed: usize) {
        if self.instance_vbo.is_some() && self.instance_capacity >= needed {
            return;
        }

        let new_cap = needed.next_power_of_two().max(4);
        let size = (new_cap * std::mem::size_of::<CubeInstance>()) as u64;

        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tricube cube instance vbo"),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}
