use std::sync::Arc;

use winit::dpi::PhysicalSize;

use crate::coords::Viewport;
use crate::platform::{GraphicsContext, Release};
use crate::render::{CubeRenderer, RenderCtx, RenderTarget};
use crate::scene::{FrameRecord, Projection, RenderState};

use super::format::PixelFormat;
use super::surface::{GpuSurface, map_surface_error};
use super::{GpuFrame, GpuInit, RenderError, SetupError, SurfaceErrorAction, TeardownError};

/// Rendering context: the logical device, its queue and the state a
/// fixed-function context would carry (viewport, projection, pipeline).
///
/// The context draws only while current, i.e. bound to a configured surface.
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    init: GpuInit,

    binding: Option<SurfaceBinding>,
    renderer: Option<CubeRenderer>,

    viewport: Viewport,
    projection: Projection,
}

/// Surface the context is current on, with its back and depth buffers.
struct SurfaceBinding {
    surface: Arc<wgpu::Surface<'static>>,
    config: wgpu::SurfaceConfiguration,
    format: PixelFormat,
    depth_view: wgpu::TextureView,
    /// Client area size; may be zero while minimized.
    size: PhysicalSize<u32>,
}

impl GpuContext {
    /// Creates the device and queue for a surface that already has a pixel format.
    pub fn new(surface: &GpuSurface, init: &GpuInit) -> Result<Self, SetupError> {
        let format = surface
            .format()
            .ok_or_else(|| SetupError::CreateContext("surface has no pixel format".into()))?;

        let mut required_features = init.required_features;
        if format.depth_stencil == wgpu::TextureFormat::Depth32FloatStencil8 {
            required_features |= wgpu::Features::DEPTH32FLOAT_STENCIL8;
        }

        let (device, queue) = pollster::block_on(surface.adapter().request_device(&wgpu::DeviceDescriptor {
            label: Some("tricube device"),
            required_features,
            required_limits: init.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| SetupError::CreateContext(e.to_string()))?;

        Ok(Self {
            device,
            queue,
            init: init.clone(),
            binding: None,
            renderer: None,
            viewport: Viewport::full(1, 1),
            projection: Projection::default(),
        })
    }

    /// Acquires the next surface texture and creates an encoder.
    fn begin_frame(&self, binding: &SurfaceBinding) -> Result<GpuFrame, wgpu::SurfaceError> {
        let surface_texture = binding.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tricube frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }
}

impl GraphicsContext for GpuContext {
    type Surface = GpuSurface;

    fn make_current(&mut self, surface: &GpuSurface, size: PhysicalSize<u32>) -> Result<(), SetupError> {
        if self.binding.is_some() {
            return Err(SetupError::ActivateContext("context is already current".into()));
        }

        let format = surface
            .format()
            .ok_or_else(|| SetupError::ActivateContext("surface has no pixel format".into()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: format.color,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: format.present_mode,
            alpha_mode: surface.alpha_mode(self.init.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: self.init.desired_maximum_frame_latency,
        };

        let handle = surface.handle();
        handle.configure(&self.device, &config);
        let depth_view = create_depth_view(&self.device, format.depth_stencil, config.width, config.height);

        log::debug!(
            "context current on {}x{} ({:?} + {:?}, {:?})",
            config.width,
            config.height,
            format.color,
            format.depth_stencil,
            format.present_mode
        );

        self.binding = Some(SurfaceBinding {
            surface: handle,
            config,
            format,
            depth_view,
            size,
        });
        Ok(())
    }

    fn release_current(&mut self) -> Result<(), TeardownError> {
        // Releasing a context that is not current is a no-op.
        self.binding = None;
        Ok(())
    }

    /// Reconfigures the surface after a resize.
    ///
    /// wgpu does not support configuring a surface with a 0x0 size; in that case,
    /// only the recorded size is updated and configuration is deferred.
    fn resize_buffers(&mut self, size: PhysicalSize<u32>) {
        let Some(binding) = self.binding.as_mut() else { return };

        binding.size = size;
        if size.width == 0 || size.height == 0 {
            return;
        }
        if binding.config.width == size.width && binding.config.height == size.height {
            return;
        }

        binding.config.width = size.width;
        binding.config.height = size.height;
        binding.surface.configure(&self.device, &binding.config);
        binding.depth_view = create_depth_view(&self.device, binding.format.depth_stencil, size.width, size.height);
    }

    fn initialize(&mut self, state: &RenderState) -> Result<(), SetupError> {
        let binding = self
            .binding
            .as_ref()
            .ok_or_else(|| SetupError::SceneInit("no rendering context is current".into()))?;
        if self.renderer.is_some() {
            return Err(SetupError::SceneInit("pipeline already built".into()));
        }

        let depth_format = state.depth_test.then_some(binding.format.depth_stencil);
        self.renderer = Some(CubeRenderer::new(&self.device, binding.format.color, depth_format, state));
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn set_projection(&mut self, projection: &Projection) {
        self.projection = *projection;
    }

    fn draw(&mut self, frame: &FrameRecord) -> Result<(), RenderError> {
        let binding = self.binding.as_ref().ok_or(RenderError::NotCurrent)?;
        if self.renderer.is_none() {
            return Err(RenderError::NotInitialized);
        }
        if binding.size.width == 0 || binding.size.height == 0 {
            return Ok(());
        }

        let mut gpu_frame = match self.begin_frame(binding) {
            Ok(f) => f,
            Err(err) => {
                let message = err.to_string();
                return match map_surface_error(&binding.surface, &self.device, &binding.config, binding.size, err) {
                    SurfaceErrorAction::Fatal => Err(RenderError::SurfaceLost(message)),
                    action => {
                        log::debug!("frame skipped ({action:?}): {message}");
                        Ok(())
                    }
                };
            }
        };

        let viewport = self.viewport.clamped_to(binding.config.width, binding.config.height);
        let rctx = RenderCtx::new(&self.device, &self.queue, self.projection.matrix(), viewport);

        // RenderTarget borrows the encoder; dropped before submission takes it.
        if let Some(renderer) = self.renderer.as_mut() {
            let mut target = RenderTarget::new(&mut gpu_frame.encoder, &gpu_frame.view, Some(&binding.depth_view));
            renderer.render(&rctx, &mut target, frame);
        }

        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = gpu_frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();

        Ok(())
    }
}

impl Release for GpuContext {
    fn release(self) -> Result<(), TeardownError> {
        if self.binding.is_some() {
            return Err(TeardownError::DeleteContext("context is still current".into()));
        }
        Ok(())
    }
}

fn create_depth_view(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("tricube depth buffer"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
