use winit::dpi::PhysicalSize;

use crate::config::WindowConfig;
use crate::device::{PixelFormatRequest, SetupError, TeardownError};
use crate::scene::{ProjectionMode, Scene};

use super::backend::{Backend, DisplayModeRequest, GraphicsContext, NativeWindow, Platform, Release, WindowStyle};
use super::prompt::FallbackPrompt;

/// Diagnostics collected by a teardown.
///
/// Teardown never fails as a whole; each step that could not complete leaves
/// one entry here and teardown moves on.
#[derive(Debug, Default)]
pub struct TeardownReport {
    pub failures: Vec<TeardownError>,
}

impl TeardownReport {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, result: Result<(), TeardownError>) {
        if let Err(err) = result {
            log::warn!("{err}");
            self.failures.push(err);
        }
    }
}

/// Owner of the window class, window, drawing surface and rendering context.
///
/// Construction runs the setup steps in order; dropping (or [`kill`]) releases
/// whatever was acquired in reverse order: display mode, context, surface,
/// window, class. A setup that fails half way releases what it had acquired
/// before returning the error.
///
/// [`kill`]: WindowResources::kill
pub struct WindowResources<P: Platform> {
    class: Option<P::Class>,
    window: Option<P::Window>,
    surface: Option<P::Surface>,
    context: Option<P::Context>,
    /// Display mode is currently altered.
    fullscreen: bool,
}

impl<P: Platform> WindowResources<P> {
    fn empty() -> Self {
        Self {
            class: None,
            window: None,
            surface: None,
            context: None,
            fullscreen: false,
        }
    }

    /// Brings up the window and rendering context, then the scene.
    ///
    /// A fullscreen request whose display mode is unavailable is handed to
    /// `prompt`: accepting continues windowed, declining fails setup before a
    /// window exists.
    pub fn setup<B: Backend<P>>(
        backend: &mut B,
        config: &WindowConfig,
        prompt: &mut dyn FallbackPrompt,
        scene: &mut Scene,
        projection: ProjectionMode,
    ) -> Result<Self, SetupError> {
        let mut resources = Self::empty();

        match resources.acquire(backend, config, prompt, scene, projection) {
            Ok(()) => {
                log::info!(
                    "window \"{}\" ready at {}x{} ({})",
                    config.title,
                    config.width,
                    config.height,
                    if resources.fullscreen { "fullscreen" } else { "windowed" }
                );
                Ok(resources)
            }
            Err(err) => {
                log::error!("{err}");
                // `resources` drops here and releases the partial setup.
                Err(err)
            }
        }
    }

    fn acquire<B: Backend<P>>(
        &mut self,
        backend: &mut B,
        config: &WindowConfig,
        prompt: &mut dyn FallbackPrompt,
        scene: &mut Scene,
        projection: ProjectionMode,
    ) -> Result<(), SetupError> {
        let class = self.class.insert(backend.register_class()?);

        let mut fullscreen = config.fullscreen;
        let mut display_mode = None;
        if fullscreen {
            let request = DisplayModeRequest {
                width: config.width,
                height: config.height,
                bits: config.bits,
            };

            match backend.change_display_mode(&request) {
                Ok(mode) => display_mode = Some(mode),
                Err(err) => {
                    log::warn!("{err}");
                    if !prompt.offer_windowed(&request) {
                        return Err(SetupError::FullscreenDeclined {
                            width: request.width,
                            height: request.height,
                            bits: request.bits,
                        });
                    }
                    log::info!("continuing in windowed mode");
                    fullscreen = false;
                }
            }
        }

        let style = WindowStyle::for_fullscreen(fullscreen);
        let size = PhysicalSize::new(config.width, config.height);

        let window = self
            .window
            .insert(backend.create_window(class, &config.title, size, style, display_mode)?);
        self.fullscreen = style.fullscreen;

        let surface = self.surface.insert(backend.acquire_surface(window)?);

        let format = backend.choose_pixel_format(surface, &PixelFormatRequest::new(config.bits))?;
        backend.set_pixel_format(surface, &format)?;
        log::debug!("pixel format {format:?}");

        let context = self.context.insert(backend.create_context(surface)?);
        context.make_current(surface, size)?;

        window.show_and_focus();

        scene.resize(&mut *context, size.width, size.height, projection);
        scene.initialize(&mut *context)?;

        Ok(())
    }

    /// Releases everything in reverse acquisition order.
    ///
    /// Always completes; failures are logged and returned in the report.
    pub fn kill(mut self) -> TeardownReport {
        self.teardown()
    }

    fn teardown(&mut self) -> TeardownReport {
        let mut report = TeardownReport::default();

        if self.fullscreen {
            if let Some(window) = self.window.as_mut() {
                report.record(window.leave_fullscreen());
            }
            self.fullscreen = false;
        }

        if let Some(mut context) = self.context.take() {
            report.record(context.release_current());
            report.record(context.release());
        }

        if let Some(surface) = self.surface.take() {
            report.record(surface.release());
        }

        if let Some(window) = self.window.take() {
            report.record(window.release());
        }

        if let Some(class) = self.class.take() {
            report.record(class.release());
        }

        report
    }

    /// Display mode is currently altered.
    #[inline]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    #[inline]
    pub fn window(&self) -> Option<&P::Window> {
        self.window.as_ref()
    }

    #[inline]
    pub fn context(&self) -> Option<&P::Context> {
        self.context.as_ref()
    }

    #[inline]
    pub fn context_mut(&mut self) -> Option<&mut P::Context> {
        self.context.as_mut()
    }
}

impl<P: Platform> Drop for WindowResources<P> {
    fn drop(&mut self) {
        let report = self.teardown();
        if !report.is_clean() {
            log::warn!("window teardown finished with {} failure(s)", report.failures.len());
        }
    }
}
