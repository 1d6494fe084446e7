use crate::buffer::create_buffer;
use crate::context::{GpuContext, SurfaceTarget};
use crate::error::GpuError;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use spincube_common::{ClearColor, SurfaceExtent};
use spincube_render::{Cube, FrameUniforms, Renderer};

/// Depth buffer format used by the cube pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    mvp: [[f32; 4]; 4],
}

const UNIFORM_SIZE: wgpu::BufferAddress = std::mem::size_of::<Uniforms>() as wgpu::BufferAddress;
const _: () = assert!(UNIFORM_SIZE == 64);

/// Three `f32` per vertex, for both positions and colors.
const VERTEX_STRIDE: wgpu::BufferAddress = 12;

/// The one pipeline, its buffers, and the depth target for drawing the cube.
pub struct CubePass {
    pipeline: wgpu::RenderPipeline,
    position_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    vertex_count: u32,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::TextureView,
    clear_color: wgpu::Color,
}

impl CubePass {
    pub fn new(
        ctx: &GpuContext,
        color_format: wgpu::TextureFormat,
        extent: SurfaceExtent,
        cube: &Cube,
        clear: ClearColor,
    ) -> Result<Self, GpuError> {
        let device = ctx.device();

        let position_buffer =
            create_buffer(ctx, "cube_position_buffer", &cube.positions, wgpu::BufferUsages::VERTEX)?;
        let color_buffer =
            create_buffer(ctx, "cube_color_buffer", &cube.colors, wgpu::BufferUsages::VERTEX)?;

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniform_buffer"),
            size: UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(UNIFORM_SIZE),
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &uniform_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(UNIFORM_SIZE),
                }),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cube_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cube_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::CUBE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cube_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: VERTEX_STRIDE,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: VERTEX_STRIDE,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![1 => Float32x3],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let depth_texture = Self::create_depth_texture(device, extent);

        Ok(Self {
            pipeline,
            position_buffer,
            color_buffer,
            vertex_count: cube.vertex_count(),
            uniform_buffer,
            uniform_bind_group,
            depth_texture,
            clear_color: wgpu::Color {
                r: clear.r,
                g: clear.g,
                b: clear.b,
                a: clear.a,
            },
        })
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn resize(&mut self, ctx: &GpuContext, extent: SurfaceExtent) {
        self.depth_texture = Self::create_depth_texture(ctx.device(), extent);
    }

    /// Overwrite the uniform buffer with this frame's MVP.
    pub fn write_uniforms(&self, ctx: &GpuContext, mvp: Mat4) {
        ctx.queue().write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                mvp: mvp.to_cols_array_2d(),
            }),
        );
    }

    /// Record one render pass with a single draw into `view`.
    pub fn encode(&self, ctx: &GpuContext, view: &wgpu::TextureView) -> wgpu::CommandBuffer {
        let mut encoder = ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cube_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_vertex_buffer(0, self.position_buffer.slice(..));
            pass.set_vertex_buffer(1, self.color_buffer.slice(..));
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.draw(0..self.vertex_count, 0..1);
        }

        encoder.finish()
    }

    fn create_depth_texture(device: &wgpu::Device, extent: SurfaceExtent) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: extent.width,
                height: extent.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

/// Draws frames to a window surface.
pub struct WgpuRenderer {
    ctx: GpuContext,
    target: SurfaceTarget,
    pass: CubePass,
}

impl WgpuRenderer {
    pub fn new(
        ctx: GpuContext,
        target: SurfaceTarget,
        cube: &Cube,
        clear: ClearColor,
    ) -> Result<Self, GpuError> {
        let pass = CubePass::new(&ctx, target.format(), target.extent(), cube, clear)?;
        Ok(Self { ctx, target, pass })
    }

    pub fn resize(&mut self, extent: SurfaceExtent) {
        self.target.resize(&self.ctx, extent);
        self.pass.resize(&self.ctx, extent);
    }

    pub fn handle_surface_error(&self, err: &wgpu::SurfaceError) -> crate::SurfaceErrorAction {
        self.target.handle_error(&self.ctx, err)
    }
}

impl Renderer for WgpuRenderer {
    type Output = Result<(), wgpu::SurfaceError>;

    fn render(&mut self, frame: &FrameUniforms) -> Self::Output {
        self.pass.write_uniforms(&self.ctx, frame.mvp);

        let output = self.target.acquire()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let commands = self.pass.encode(&self.ctx, &view);

        self.ctx.queue().submit(std::iter::once(commands));
        output.present();
        Ok(())
    }
}
