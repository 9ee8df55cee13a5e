use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

use crate::config::AppConfig;
use crate::core::{Action, Application, ESCAPE, Event};
use crate::device::GpuInit;
use crate::platform::FullscreenFallback;

use super::backend::{WinitBackend, WinitPlatform};

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Sets the window up, pumps events until the user quits, then tears down.
    ///
    /// Returns an error if setup failed or a frame could not be presented.
    pub fn run(config: AppConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut handler = RuntimeHandler::new(config);

        event_loop
            .run_app(&mut handler)
            .context("winit event loop terminated with error")?;

        match handler.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct RuntimeHandler {
    gpu: GpuInit,
    fallback: FullscreenFallback,
    app: Application<WinitPlatform>,

    started: bool,
    /// Set by a zero-sized resize, cleared by the next non-zero one.
    minimized: bool,
    failure: Option<anyhow::Error>,
}

impl RuntimeHandler {
    fn new(config: AppConfig) -> Self {
        let AppConfig {
            window,
            gpu,
            fallback,
            projection,
        } = config;

        Self {
            gpu,
            fallback,
            app: Application::new(window, projection),
            started: false,
            minimized: false,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.failure = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for RuntimeHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        let mut backend = WinitBackend::new(event_loop, &self.gpu);
        if let Err(e) = self.app.setup(&mut backend, &mut self.fallback) {
            self.fail(event_loop, anyhow::Error::new(e).context("window setup failed"));
            return;
        }

        self.app.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let WindowEvent::RedrawRequested = event {
            if let Err(e) = self.app.render_frame() {
                self.fail(event_loop, anyhow::Error::new(e).context("frame rendering failed"));
            }
            return;
        }

        for app_event in translate_event(&event, &mut self.minimized) {
            if self.app.handle_event(app_event) == Action::Quit {
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Render continuously while active; sleep until the next event otherwise.
        if self.app.state().should_render() {
            event_loop.set_control_flow(ControlFlow::Poll);
            self.app.request_redraw();
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.app.shutdown();
    }
}

/// Maps a winit window event onto the application's events.
///
/// winit reports `Occluded` on some platforms only (not on X11), so a
/// zero-sized `Resized` also deactivates and the next non-zero one
/// reactivates. `minimized` tracks that across calls.
fn translate_event(event: &WindowEvent, minimized: &mut bool) -> impl Iterator<Item = Event> {
    let mut follow_up = None;

    let first = match event {
        WindowEvent::Resized(size) => {
            let zero = size.width == 0 || size.height == 0;
            if zero != *minimized {
                *minimized = zero;
                follow_up = Some(Event::Activate { minimized: zero });
            }
            Event::Resize {
                width: size.width,
                height: size.height,
            }
        }
        WindowEvent::Occluded(occluded) => Event::Activate { minimized: *occluded },
        WindowEvent::Focused(focused) => Event::Focus(*focused),
        WindowEvent::CloseRequested => Event::Close,
        WindowEvent::KeyboardInput { event, .. } => translate_key(event).unwrap_or(Event::Other),
        _ => Event::Other,
    };

    [Some(first), follow_up].into_iter().flatten()
}

fn translate_key(event: &KeyEvent) -> Option<Event> {
    if event.state != ElementState::Pressed {
        return None;
    }

    match &event.logical_key {
        Key::Named(NamedKey::Escape) => Some(Event::Char(ESCAPE)),
        Key::Named(NamedKey::Space) => Some(Event::Char(' ')),
        Key::Character(text) => text.chars().next().map(Event::Char),
        _ => None,
    }
}
