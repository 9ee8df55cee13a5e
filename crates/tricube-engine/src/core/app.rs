use winit::dpi::PhysicalSize;

use crate::config::WindowConfig;
use crate::device::{RenderError, SetupError};
use crate::platform::{Backend, FallbackPrompt, GraphicsContext, NativeWindow, Platform, TeardownReport, WindowResources};
use crate::scene::{ProjectionMode, Scene};
use crate::time::{FrameClock, FrameStats, FrameTime};

use super::state::{Action, AppState, Event, dispatch};

/// Result of one idle-time render attempt.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FrameOutcome {
    Presented(FrameTime),
    /// Window inactive, closing, or not set up.
    Skipped,
}

/// Application controller: owns the state, the scene and the window resources.
///
/// Platform adapters feed it events and idle ticks; everything that decides
/// what happens lives in [`dispatch`], this type only carries the actions out.
pub struct Application<P: Platform> {
    config: WindowConfig,
    state: AppState,
    scene: Scene,
    resources: Option<WindowResources<P>>,

    clock: FrameClock,
    stats: FrameStats,

    /// Quit signals enqueued since the last setup.
    quit_requests: u32,
}

impl<P: Platform> Application<P> {
    pub fn new(config: WindowConfig, projection: ProjectionMode) -> Self {
        Self {
            config,
            state: AppState::new(projection),
            scene: Scene::new(),
            resources: None,
            clock: FrameClock::new(),
            stats: FrameStats::default(),
            quit_requests: 0,
        }
    }

    /// Creates the window and context and initializes a fresh scene.
    ///
    /// Any window from a previous setup is torn down first. On failure nothing
    /// stays acquired.
    pub fn setup<B: Backend<P>>(&mut self, backend: &mut B, prompt: &mut dyn FallbackPrompt) -> Result<(), SetupError> {
        if let Some(report) = self.shutdown() {
            log::debug!("previous window released ({} failure(s))", report.failures.len());
        }

        let projection = self.state.projection;
        let mut scene = Scene::new();
        let resources = WindowResources::setup(backend, &self.config, prompt, &mut scene, projection)?;

        self.state = AppState {
            fullscreen: resources.is_fullscreen(),
            focused: true,
            ..AppState::new(projection)
        };
        self.scene = scene;
        self.resources = Some(resources);
        self.quit_requests = 0;
        self.clock.reset();

        Ok(())
    }

    /// Dispatches one event and carries out the resulting action.
    ///
    /// `Action::Quit` and `Action::Default` are returned for the platform
    /// adapter to act on.
    pub fn handle_event(&mut self, event: Event) -> Action {
        let was_rendering = self.state.should_render();
        let (next, action) = dispatch(self.state, event);
        self.state = next;

        match action {
            Action::Resize { width, height } => {
                if let Some(ctx) = self.resources.as_mut().and_then(WindowResources::context_mut) {
                    ctx.resize_buffers(PhysicalSize::new(width, height));
                    self.scene.resize(ctx, width, height, self.state.projection);
                }
            }
            Action::UpdateProjection(mode) => {
                if let Some(ctx) = self.resources.as_mut().and_then(WindowResources::context_mut) {
                    self.scene.update_projection(ctx, mode);
                }
            }
            Action::Quit => {
                self.quit_requests += 1;
                log::info!("quit requested");
            }
            Action::None | Action::Default => {}
        }

        if !was_rendering && self.state.should_render() {
            self.clock.reset();
        }

        action
    }

    /// Renders one frame if the window is active.
    pub fn render_frame(&mut self) -> Result<FrameOutcome, RenderError> {
        if !self.state.should_render() {
            return Ok(FrameOutcome::Skipped);
        }
        let Some(ctx) = self.resources.as_mut().and_then(WindowResources::context_mut) else {
            return Ok(FrameOutcome::Skipped);
        };

        self.scene.display(ctx)?;

        let ft = self.clock.tick();
        if let Some(fps) = self.stats.record(&ft) {
            log::debug!("{fps:.1} fps");
        }
        Ok(FrameOutcome::Presented(ft))
    }

    /// Asks the window for a redraw if a frame would be rendered.
    pub fn request_redraw(&self) {
        if !self.state.should_render() {
            return;
        }
        if let Some(window) = self.resources.as_ref().and_then(WindowResources::window) {
            window.request_redraw();
        }
    }

    /// Tears the window down. Returns `None` when nothing was set up.
    pub fn shutdown(&mut self) -> Option<TeardownReport> {
        let report = self.resources.take()?.kill();
        self.state.fullscreen = false;
        self.state.focused = false;

        if report.is_clean() {
            log::info!("window released");
        } else {
            log::warn!("window released with {} failure(s)", report.failures.len());
        }
        Some(report)
    }

    #[inline]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    #[inline]
    pub fn resources(&self) -> Option<&WindowResources<P>> {
        self.resources.as_ref()
    }

    /// Whether a window is currently set up.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.resources.is_some()
    }

    #[inline]
    pub fn quit_requests(&self) -> u32 {
        self.quit_requests
    }

    /// Frames per second over the last reporting window.
    #[inline]
    pub fn fps(&self) -> Option<f32> {
        self.stats.fps()
    }
}
