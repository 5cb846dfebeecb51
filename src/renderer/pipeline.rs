//! WebGPU renderer: one flat-colored triangle list per frame
//!
//! Scenes are tessellated in field pixels, mapped to clip space here and
//! streamed into a single vertex buffer that grows when a frame outgrows it.

use std::fmt;

use super::scene::{RenderSink, Scene};
use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::Field;

/// Smallest vertex buffer allocated, in vertices
const MIN_VERTEX_CAPACITY: usize = 4096;

/// Error when setting up the GPU side of the renderer
#[derive(Debug)]
pub enum RenderInitError {
    /// The adapter refused to hand out a device.
    Device(wgpu::RequestDeviceError),
    /// The surface cannot be presented by this adapter.
    UnsupportedSurface,
}

impl fmt::Display for RenderInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderInitError::Device(e) => write!(f, "no GPU device: {}", e),
            RenderInitError::UnsupportedSurface => write!(f, "surface not supported by adapter"),
        }
    }
}

impl std::error::Error for RenderInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderInitError::Device(e) => Some(e),
            RenderInitError::UnsupportedSurface => None,
        }
    }
}

impl From<wgpu::RequestDeviceError> for RenderInitError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RenderInitError::Device(e)
    }
}

pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    /// Vertices the buffer can hold
    capacity: usize,
    /// Clip-space copy of the current frame, reused between frames
    staged: Vec<Vertex>,
    /// Playfield the scene coordinates are expressed in
    pub field: Field,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        field: Field,
    ) -> Result<Self, RenderInitError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("strafe-run-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let config = surface_config(&surface, adapter, width, height)
            .ok_or(RenderInitError::UnsupportedSurface)?;
        surface.configure(&device, &config);

        let pipeline = flat_pipeline(&device, config.format);
        let vertex_buffer = vertex_buffer(&device, MIN_VERTEX_CAPACITY);

        log::info!(
            "Renderer ready: {}x{} surface ({:?}) for a {}x{} field",
            width,
            height,
            config.format,
            field.width,
            field.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            capacity: MIN_VERTEX_CAPACITY,
            staged: Vec::new(),
            field,
        })
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw a triangle list given in field coordinates over the sky
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        self.stage(vertices);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let [r, g, b, a] = colors::SKY.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if !self.staged.is_empty() {
                let bytes = (self.staged.len() * std::mem::size_of::<Vertex>()) as u64;
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..bytes));
                pass.draw(0..self.staged.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Map to clip space and upload, growing the buffer if needed
    fn stage(&mut self, vertices: &[Vertex]) {
        let field = self.field;
        self.staged.clear();
        self.staged.extend(vertices.iter().map(|v| {
            let (x, y) = field_to_ndc(&field, v.position[0], v.position[1]);
            Vertex::new(x, y, v.color)
        }));

        if self.staged.len() > self.capacity {
            self.capacity = self.staged.len().next_power_of_two();
            self.vertex_buffer = vertex_buffer(&self.device, self.capacity);
            log::debug!("Vertex buffer grown to {} vertices", self.capacity);
        }
        if !self.staged.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.staged));
        }
    }
}

impl RenderSink for RenderState {
    fn present(&mut self, scene: &Scene) {
        let vertices = shapes::tessellate(scene);
        match self.render(&vertices) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = self.surface_size();
                self.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => log::error!("GPU out of memory"),
            Err(e) => log::warn!("Frame skipped: {:?}", e),
        }
    }
}

/// Adapter defaults, preferring an sRGB format and vsync
fn surface_config(
    surface: &wgpu::Surface<'static>,
    adapter: &wgpu::Adapter,
    width: u32,
    height: u32,
) -> Option<wgpu::SurfaceConfiguration> {
    let mut config = surface.get_default_config(adapter, width, height)?;
    let caps = surface.get_capabilities(adapter);
    if let Some(srgb) = caps.formats.iter().copied().find(|f| f.is_srgb()) {
        config.format = srgb;
    }
    config.present_mode = wgpu::PresentMode::AutoVsync;
    Some(config)
}

fn flat_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("flat_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("flat_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flat_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // Quads are emitted with mixed winding, so nothing is culled
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_vertices"),
        size: (capacity * std::mem::size_of::<Vertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Convert field coordinates (pixels, y down) to normalized device
/// coordinates (-1..1, y up). The field is stretched to fill the surface.
pub fn field_to_ndc(field: &Field, x: f32, y: f32) -> (f32, f32) {
    (x / field.width * 2.0 - 1.0, 1.0 - y / field.height * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_corners_map_to_clip_corners() {
        let field = Field::new(800.0, 600.0);
        assert_eq!(field_to_ndc(&field, 0.0, 0.0), (-1.0, 1.0));
        assert_eq!(field_to_ndc(&field, 800.0, 600.0), (1.0, -1.0));
        assert_eq!(field_to_ndc(&field, 400.0, 300.0), (0.0, 0.0));
    }

    #[test]
    fn test_init_error_messages() {
        let err = RenderInitError::UnsupportedSurface;
        assert_eq!(err.to_string(), "surface not supported by adapter");
        assert!(std::error::Error::source(&err).is_none());
    }
}
