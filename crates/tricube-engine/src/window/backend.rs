use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::monitor::VideoModeHandle;
use winit::window::{Fullscreen, Window, WindowAttributes};

use crate::device::{
    GpuContext, GpuInit, GpuSurface, PixelFormat, PixelFormatRequest, SetupError, TeardownError,
};
use crate::platform::{Backend, DisplayModeRequest, NativeWindow, Platform, Release, WindowStyle};

/// Handle family of the winit + wgpu backend.
pub struct WinitPlatform;

impl Platform for WinitPlatform {
    type Class = WinitClass;
    type DisplayMode = VideoModeHandle;
    type Window = WinitWindow;
    type Surface = GpuSurface;
    type Context = GpuContext;
}

/// Attribute template every window of the application is created from.
pub struct WinitClass {
    name: &'static str,
    attributes: WindowAttributes,
}

impl Release for WinitClass {
    fn release(self) -> Result<(), TeardownError> {
        log::trace!("window class \"{}\" released", self.name);
        Ok(())
    }
}

/// A winit window, shared with the wgpu surface created for it.
pub struct WinitWindow {
    window: Arc<Window>,
}

impl WinitWindow {
    #[inline]
    pub fn handle(&self) -> Arc<Window> {
        Arc::clone(&self.window)
    }
}

impl NativeWindow for WinitWindow {
    fn inner_size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }

    fn show_and_focus(&mut self) {
        self.window.set_visible(true);
        self.window.focus_window();
    }

    fn leave_fullscreen(&mut self) -> Result<(), TeardownError> {
        self.window.set_fullscreen(None);
        self.window.set_cursor_visible(true);
        Ok(())
    }

    fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

impl Release for WinitWindow {
    fn release(self) -> Result<(), TeardownError> {
        let refs = Arc::strong_count(&self.window);
        if refs > 1 {
            return Err(TeardownError::DestroyWindow(format!(
                "window still has {} other owner(s)",
                refs - 1
            )));
        }
        Ok(())
    }
}

/// Setup operations backed by a live winit event loop and wgpu.
///
/// Only constructible inside event loop callbacks, where `ActiveEventLoop`
/// is available.
pub struct WinitBackend<'a> {
    event_loop: &'a ActiveEventLoop,
    gpu: &'a GpuInit,
}

impl<'a> WinitBackend<'a> {
    pub fn new(event_loop: &'a ActiveEventLoop, gpu: &'a GpuInit) -> Self {
        Self { event_loop, gpu }
    }
}

impl Backend<WinitPlatform> for WinitBackend<'_> {
    fn register_class(&mut self) -> Result<WinitClass, SetupError> {
        if self.event_loop.exiting() {
            return Err(SetupError::RegisterClass("event loop is exiting".into()));
        }

        Ok(WinitClass {
            name: "tricube",
            attributes: Window::default_attributes().with_visible(false),
        })
    }

    fn change_display_mode(&mut self, request: &DisplayModeRequest) -> Result<VideoModeHandle, SetupError> {
        let unavailable = || SetupError::DisplayModeUnavailable {
            width: request.width,
            height: request.height,
            bits: request.bits,
        };

        let monitor = self
            .event_loop
            .primary_monitor()
            .or_else(|| self.event_loop.available_monitors().next())
            .ok_or_else(unavailable)?;

        let wanted = PhysicalSize::new(request.width, request.height);
        let mode = monitor
            .video_modes()
            .filter(|m| m.size() == wanted && m.bit_depth() == u16::from(request.bits))
            .max_by_key(VideoModeHandle::refresh_rate_millihertz)
            .ok_or_else(unavailable)?;

        log::debug!("display mode {mode:?}");
        Ok(mode)
    }

    fn create_window(
        &mut self,
        class: &WinitClass,
        title: &str,
        size: PhysicalSize<u32>,
        style: WindowStyle,
        display_mode: Option<VideoModeHandle>,
    ) -> Result<WinitWindow, SetupError> {
        let attributes = class
            .attributes
            .clone()
            .with_title(title)
            .with_inner_size(size)
            .with_decorations(style.decorated)
            .with_resizable(!style.fullscreen)
            .with_fullscreen(display_mode.map(Fullscreen::Exclusive));

        let window = self
            .event_loop
            .create_window(attributes)
            .map_err(|e| SetupError::CreateWindow(e.to_string()))?;
        window.set_cursor_visible(style.cursor_visible);

        Ok(WinitWindow {
            window: Arc::new(window),
        })
    }

    fn acquire_surface(&mut self, window: &WinitWindow) -> Result<GpuSurface, SetupError> {
        GpuSurface::new(window.handle(), self.gpu)
    }

    fn choose_pixel_format(
        &mut self,
        surface: &GpuSurface,
        request: &PixelFormatRequest,
    ) -> Result<PixelFormat, SetupError> {
        surface.choose_format(request, self.gpu)
    }

    fn set_pixel_format(&mut self, surface: &mut GpuSurface, format: &PixelFormat) -> Result<(), SetupError> {
        surface.set_format(format)
    }

    fn create_context(&mut self, surface: &GpuSurface) -> Result<GpuContext, SetupError> {
        GpuContext::new(surface, self.gpu)
    }
}
