use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::platform::Release;

use super::format::{FormatSupport, PixelFormat, PixelFormatRequest, choose_alpha_mode, choose_pixel_format};
use super::{GpuInit, SetupError, SurfaceErrorAction, TeardownError};

/// Drawing surface of a window: the wgpu surface plus the adapter that can
/// present to it.
///
/// The surface is shared with the context while the context is current; it
/// keeps the window alive until released.
pub struct GpuSurface {
    /// Instance the surface and adapter were created from.
    _instance: wgpu::Instance,
    surface: Arc<wgpu::Surface<'static>>,
    adapter: wgpu::Adapter,
    format: Option<PixelFormat>,
}

impl GpuSurface {
    /// Creates the surface for `window` and picks an adapter compatible with it.
    ///
    /// Adapter acquisition is asynchronous under wgpu; this blocks on it.
    pub fn new(window: Arc<Window>, init: &GpuInit) -> Result<Self, SetupError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| SetupError::AcquireSurface(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: init.power_preference,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| SetupError::AcquireSurface(format!("no compatible GPU adapter: {e}")))?;

        let info = adapter.get_info();
        log::info!("using adapter \"{}\" ({:?})", info.name, info.backend);

        Ok(Self {
            _instance: instance,
            surface: Arc::new(surface),
            adapter,
            format: None,
        })
    }

    /// Chooses the best pixel format the surface supports for `request`.
    pub fn choose_format(&self, request: &PixelFormatRequest, init: &GpuInit) -> Result<PixelFormat, SetupError> {
        let caps = self.capabilities();
        let support = FormatSupport {
            formats: &caps.formats,
            present_modes: &caps.present_modes,
            depth32_stencil8: self.adapter.features().contains(wgpu::Features::DEPTH32FLOAT_STENCIL8),
        };

        choose_pixel_format(support, request, init.prefer_srgb, init.present_mode)
            .map_err(SetupError::ChoosePixelFormat)
    }

    /// Assigns the pixel format. A surface takes exactly one format.
    pub fn set_format(&mut self, format: &PixelFormat) -> Result<(), SetupError> {
        if self.format.is_some() {
            return Err(SetupError::SetPixelFormat("surface already has a pixel format".into()));
        }

        let caps = self.capabilities();
        if !caps.formats.contains(&format.color) {
            return Err(SetupError::SetPixelFormat(format!(
                "{:?} is not a surface format",
                format.color
            )));
        }
        if !caps.present_modes.contains(&format.present_mode) {
            return Err(SetupError::SetPixelFormat(format!(
                "{:?} presentation is not supported",
                format.present_mode
            )));
        }

        let depth = self.adapter.get_texture_format_features(format.depth_stencil);
        if !depth.allowed_usages.contains(wgpu::TextureUsages::RENDER_ATTACHMENT) {
            return Err(SetupError::SetPixelFormat(format!(
                "{:?} cannot be used as a depth attachment",
                format.depth_stencil
            )));
        }

        self.format = Some(*format);
        Ok(())
    }

    #[inline]
    pub fn format(&self) -> Option<PixelFormat> {
        self.format
    }

    pub fn capabilities(&self) -> wgpu::SurfaceCapabilities {
        self.surface.get_capabilities(&self.adapter)
    }

    pub(crate) fn alpha_mode(&self, requested: Option<wgpu::CompositeAlphaMode>) -> wgpu::CompositeAlphaMode {
        choose_alpha_mode(&self.capabilities().alpha_modes, requested)
    }

    #[inline]
    pub(crate) fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }

    /// Shared handle for the context that binds to this surface.
    #[inline]
    pub(crate) fn handle(&self) -> Arc<wgpu::Surface<'static>> {
        Arc::clone(&self.surface)
    }
}

impl Release for GpuSurface {
    fn release(self) -> Result<(), TeardownError> {
        // Any other owner is a context that was never released.
        if Arc::strong_count(&self.surface) > 1 {
            return Err(TeardownError::ReleaseSurface(
                "surface is still bound to a rendering context".into(),
            ));
        }
        Ok(())
    }
}

/// Reconfigures the surface when the frame acquisition failure allows it.
pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.width > 0 && size.height > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}
