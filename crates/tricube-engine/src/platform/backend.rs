use winit::dpi::PhysicalSize;

use crate::coords::Viewport;
use crate::device::{PixelFormat, PixelFormatRequest, RenderError, SetupError, TeardownError};
use crate::scene::{FrameRecord, Projection, RenderState};

/// A handle whose release can fail without aborting teardown.
pub trait Release: Sized {
    fn release(self) -> Result<(), TeardownError>;
}

/// Native window operations used by setup, the loop and teardown.
pub trait NativeWindow: Release {
    /// Drawable (client area) size in physical pixels.
    fn inner_size(&self) -> PhysicalSize<u32>;

    /// Makes the window visible and gives it keyboard focus.
    fn show_and_focus(&mut self);

    /// Leaves the negotiated display mode and shows the cursor again.
    fn leave_fullscreen(&mut self) -> Result<(), TeardownError>;

    /// Asks the event loop for a redraw of this window.
    fn request_redraw(&self);
}

/// Stateful graphics session bound to a drawing surface.
///
/// Mirrors a fixed-function context: viewport and projection are context
/// state that persists between frames; `draw` clears, draws and presents.
pub trait GraphicsContext: Release {
    type Surface;

    /// Binds the context to `surface` and allocates the back and depth buffers.
    fn make_current(&mut self, surface: &Self::Surface, size: PhysicalSize<u32>) -> Result<(), SetupError>;

    /// Unbinds the context from its surface.
    fn release_current(&mut self) -> Result<(), TeardownError>;

    /// Resizes the back and depth buffers to a new client area.
    ///
    /// A zero-sized area (minimized window) is remembered but not applied.
    fn resize_buffers(&mut self, size: PhysicalSize<u32>);

    /// Builds the pipeline for `state`. Only valid once per context.
    fn initialize(&mut self, state: &RenderState) -> Result<(), SetupError>;

    fn set_viewport(&mut self, viewport: Viewport);

    fn set_projection(&mut self, projection: &Projection);

    /// Clears, draws `frame` and presents the back buffer.
    fn draw(&mut self, frame: &FrameRecord) -> Result<(), RenderError>;
}

/// Fullscreen display mode request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DisplayModeRequest {
    pub width: u32,
    pub height: u32,
    pub bits: u8,
}

/// Window style derived from the (possibly downgraded) fullscreen flag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WindowStyle {
    pub fullscreen: bool,
    /// Title bar and borders.
    pub decorated: bool,
    pub cursor_visible: bool,
}

impl WindowStyle {
    pub const fn for_fullscreen(fullscreen: bool) -> Self {
        Self {
            fullscreen,
            decorated: !fullscreen,
            cursor_visible: !fullscreen,
        }
    }
}

/// Family of handle types a backend produces.
///
/// Handles outlive the [`Backend`] value that created them, so the family is
/// kept separate from the acquisition API.
pub trait Platform: 'static {
    type Class: Release;
    type DisplayMode;
    type Window: NativeWindow;
    type Surface: Release;
    type Context: GraphicsContext<Surface = Self::Surface>;
}

/// Windowing/graphics API consumed by window setup, one call per setup step.
pub trait Backend<P: Platform> {
    /// Registers the window class the window is created from.
    fn register_class(&mut self) -> Result<P::Class, SetupError>;

    /// Negotiates an exclusive display mode for fullscreen.
    fn change_display_mode(&mut self, request: &DisplayModeRequest) -> Result<P::DisplayMode, SetupError>;

    /// Creates the (hidden) window with a drawable area of exactly `size`.
    fn create_window(
        &mut self,
        class: &P::Class,
        title: &str,
        size: PhysicalSize<u32>,
        style: WindowStyle,
        display_mode: Option<P::DisplayMode>,
    ) -> Result<P::Window, SetupError>;

    fn acquire_surface(&mut self, window: &P::Window) -> Result<P::Surface, SetupError>;

    fn choose_pixel_format(
        &mut self,
        surface: &P::Surface,
        request: &PixelFormatRequest,
    ) -> Result<PixelFormat, SetupError>;

    fn set_pixel_format(&mut self, surface: &mut P::Surface, format: &PixelFormat) -> Result<(), SetupError>;

    fn create_context(&mut self, surface: &P::Surface) -> Result<P::Context, SetupError>;
}
