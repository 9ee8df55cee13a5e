//! Scripted in-memory platform: every backend call is appended to a shared
//! journal, and any step can be told to fail.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use winit::dpi::PhysicalSize;

use tricube_engine::coords::Viewport;
use tricube_engine::device::{PixelFormat, PixelFormatRequest, RenderError, SetupError, TeardownError};
use tricube_engine::platform::{
    Backend, DisplayModeRequest, GraphicsContext, NativeWindow, Platform, Release, WindowStyle,
};
use tricube_engine::scene::{FrameRecord, Projection, RenderState};

/// Steps that can be made to fail.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    RegisterClass,
    CreateWindow,
    AcquireSurface,
    ChoosePixelFormat,
    SetPixelFormat,
    CreateContext,
    MakeCurrent,
    Initialize,

    LeaveFullscreen,
    ReleaseCurrent,
    ReleaseContext,
    ReleaseSurface,
    ReleaseWindow,
    ReleaseClass,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    RegisterClass,
    ChangeDisplayMode(DisplayModeRequest),
    CreateWindow { size: PhysicalSize<u32>, style: WindowStyle, exclusive: bool },
    AcquireSurface,
    ChoosePixelFormat(PixelFormatRequest),
    SetPixelFormat,
    CreateContext,
    MakeCurrent(PhysicalSize<u32>),
    ShowAndFocus,
    ResizeBuffers(PhysicalSize<u32>),
    Initialize(RenderState),
    SetViewport(Viewport),
    SetProjection(Projection),
    Draw(FrameRecord),

    LeaveFullscreen,
    ReleaseCurrent,
    ReleaseContext,
    ReleaseSurface,
    ReleaseWindow,
    ReleaseClass,
}

#[derive(Default)]
pub struct Script {
    journal: RefCell<Vec<Call>>,
    failures: RefCell<Vec<Step>>,
    /// Display modes `change_display_mode` accepts.
    modes: RefCell<Vec<DisplayModeRequest>>,
}

impl Script {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn fail(&self, step: Step) {
        self.failures.borrow_mut().push(step);
    }

    pub fn clear_failures(&self) {
        self.failures.borrow_mut().clear();
    }

    pub fn support_mode(&self, width: u32, height: u32, bits: u8) {
        self.modes.borrow_mut().push(DisplayModeRequest { width, height, bits });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.journal.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.journal.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.journal.borrow().iter().filter(|c| pred(*c)).count()
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> Vec<FrameRecord> {
        self.journal
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Draw(frame) => Some(frame.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_viewport(&self) -> Option<Viewport> {
        self.journal.borrow().iter().rev().find_map(|c| match c {
            Call::SetViewport(v) => Some(*v),
            _ => None,
        })
    }

    pub fn last_projection(&self) -> Option<Projection> {
        self.journal.borrow().iter().rev().find_map(|c| match c {
            Call::SetProjection(p) => Some(*p),
            _ => None,
        })
    }

    /// Whether every acquired handle has been released.
    pub fn all_released(&self) -> bool {
        let acquired = self.count(|c| {
            matches!(
                c,
                Call::RegisterClass | Call::CreateWindow { .. } | Call::AcquireSurface | Call::CreateContext
            )
        });
        let released = self.count(|c| {
            matches!(
                c,
                Call::ReleaseClass | Call::ReleaseWindow | Call::ReleaseSurface | Call::ReleaseContext
            )
        });
        acquired == released
    }

    fn record(&self, call: Call) {
        self.journal.borrow_mut().push(call);
    }

    fn fails(&self, step: Step) -> bool {
        self.failures.borrow().contains(&step)
    }

    fn step(&self, step: Step, call: Call) -> Result<(), String> {
        if self.fails(step) {
            return Err(format!("{step:?} scripted to fail"));
        }
        self.record(call);
        Ok(())
    }

    fn release(&self, step: Step, call: Call) -> Result<(), String> {
        // Releases are recorded even when they report failure.
        self.record(call);
        if self.fails(step) {
            return Err(format!("{step:?} scripted to fail"));
        }
        Ok(())
    }
}

pub struct ScriptedPlatform;

impl Platform for ScriptedPlatform {
    type Class = ScriptedClass;
    type DisplayMode = DisplayModeRequest;
    type Window = ScriptedWindow;
    type Surface = ScriptedSurface;
    type Context = ScriptedContext;
}

pub struct ScriptedClass(Rc<Script>);

impl Release for ScriptedClass {
    fn release(self) -> Result<(), TeardownError> {
        self.0
            .release(Step::ReleaseClass, Call::ReleaseClass)
            .map_err(TeardownError::UnregisterClass)
    }
}

pub struct ScriptedWindow {
    script: Rc<Script>,
    pub size: PhysicalSize<u32>,
    pub style: WindowStyle,
    pub visible: bool,
    pub focused: bool,
}

impl NativeWindow for ScriptedWindow {
    fn inner_size(&self) -> PhysicalSize<u32> {
        self.size
    }

    fn show_and_focus(&mut self) {
        self.visible = true;
        self.focused = true;
        self.script.record(Call::ShowAndFocus);
    }

    fn leave_fullscreen(&mut self) -> Result<(), TeardownError> {
        self.style = WindowStyle::for_fullscreen(false);
        self.script
            .release(Step::LeaveFullscreen, Call::LeaveFullscreen)
            .map_err(TeardownError::RestoreDisplayMode)
    }

    fn request_redraw(&self) {}
}

impl Release for ScriptedWindow {
    fn release(self) -> Result<(), TeardownError> {
        self.script
            .release(Step::ReleaseWindow, Call::ReleaseWindow)
            .map_err(TeardownError::DestroyWindow)
    }
}

pub struct ScriptedSurface {
    script: Rc<Script>,
    format: Option<PixelFormat>,
}

impl Release for ScriptedSurface {
    fn release(self) -> Result<(), TeardownError> {
        self.script
            .release(Step::ReleaseSurface, Call::ReleaseSurface)
            .map_err(TeardownError::ReleaseSurface)
    }
}

pub struct ScriptedContext {
    script: Rc<Script>,
    current: bool,
    initialized: bool,
}

impl GraphicsContext for ScriptedContext {
    type Surface = ScriptedSurface;

    fn make_current(&mut self, surface: &ScriptedSurface, size: PhysicalSize<u32>) -> Result<(), SetupError> {
        if surface.format.is_none() {
            return Err(SetupError::ActivateContext("surface has no pixel format".into()));
        }
        self.script
            .step(Step::MakeCurrent, Call::MakeCurrent(size))
            .map_err(SetupError::ActivateContext)?;
        self.current = true;
        Ok(())
    }

    fn release_current(&mut self) -> Result<(), TeardownError> {
        self.current = false;
        self.script
            .release(Step::ReleaseCurrent, Call::ReleaseCurrent)
            .map_err(TeardownError::ReleaseContext)
    }

    fn resize_buffers(&mut self, size: PhysicalSize<u32>) {
        self.script.record(Call::ResizeBuffers(size));
    }

    fn initialize(&mut self, state: &RenderState) -> Result<(), SetupError> {
        if !self.current {
            return Err(SetupError::SceneInit("no rendering context is current".into()));
        }
        self.script
            .step(Step::Initialize, Call::Initialize(*state))
            .map_err(SetupError::SceneInit)?;
        self.initialized = true;
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.script.record(Call::SetViewport(viewport));
    }

    fn set_projection(&mut self, projection: &Projection) {
        self.script.record(Call::SetProjection(*projection));
    }

    fn draw(&mut self, frame: &FrameRecord) -> Result<(), RenderError> {
        if !self.current {
            return Err(RenderError::NotCurrent);
        }
        self.script.record(Call::Draw(frame.clone()));
        Ok(())
    }
}

impl Release for ScriptedContext {
    fn release(self) -> Result<(), TeardownError> {
        self.script
            .release(Step::ReleaseContext, Call::ReleaseContext)
            .map_err(TeardownError::DeleteContext)
    }
}

pub struct ScriptedBackend {
    script: Rc<Script>,
}

impl ScriptedBackend {
    pub fn new(script: &Rc<Script>) -> Self {
        Self {
            script: Rc::clone(script),
        }
    }
}

impl Backend<ScriptedPlatform> for ScriptedBackend {
    fn register_class(&mut self) -> Result<ScriptedClass, SetupError> {
        self.script
            .step(Step::RegisterClass, Call::RegisterClass)
            .map_err(SetupError::RegisterClass)?;
        Ok(ScriptedClass(Rc::clone(&self.script)))
    }

    fn change_display_mode(&mut self, request: &DisplayModeRequest) -> Result<DisplayModeRequest, SetupError> {
        self.script.record(Call::ChangeDisplayMode(*request));
        if self.script.modes.borrow().contains(request) {
            Ok(*request)
        } else {
            Err(SetupError::DisplayModeUnavailable {
                width: request.width,
                height: request.height,
                bits: request.bits,
            })
        }
    }

    fn create_window(
        &mut self,
        _class: &ScriptedClass,
        _title: &str,
        size: PhysicalSize<u32>,
        style: WindowStyle,
        display_mode: Option<DisplayModeRequest>,
    ) -> Result<ScriptedWindow, SetupError> {
        self.script
            .step(
                Step::CreateWindow,
                Call::CreateWindow {
                    size,
                    style,
                    exclusive: display_mode.is_some(),
                },
            )
            .map_err(SetupError::CreateWindow)?;

        Ok(ScriptedWindow {
            script: Rc::clone(&self.script),
            size,
            style,
            visible: false,
            focused: false,
        })
    }

    fn acquire_surface(&mut self, _window: &ScriptedWindow) -> Result<ScriptedSurface, SetupError> {
        self.script
            .step(Step::AcquireSurface, Call::AcquireSurface)
            .map_err(SetupError::AcquireSurface)?;
        Ok(ScriptedSurface {
            script: Rc::clone(&self.script),
            format: None,
        })
    }

    fn choose_pixel_format(
        &mut self,
        _surface: &ScriptedSurface,
        request: &PixelFormatRequest,
    ) -> Result<PixelFormat, SetupError> {
        self.script
            .step(Step::ChoosePixelFormat, Call::ChoosePixelFormat(*request))
            .map_err(SetupError::ChoosePixelFormat)?;
        Ok(PixelFormat {
            color: wgpu::TextureFormat::Bgra8Unorm,
            depth_stencil: wgpu::TextureFormat::Depth24PlusStencil8,
            present_mode: wgpu::PresentMode::Fifo,
        })
    }

    fn set_pixel_format(&mut self, surface: &mut ScriptedSurface, format: &PixelFormat) -> Result<(), SetupError> {
        self.script
            .step(Step::SetPixelFormat, Call::SetPixelFormat)
            .map_err(SetupError::SetPixelFormat)?;
        surface.format = Some(*format);
        Ok(())
    }

    fn create_context(&mut self, _surface: &ScriptedSurface) -> Result<ScriptedContext, SetupError> {
        self.script
            .step(Step::CreateContext, Call::CreateContext)
            .map_err(SetupError::CreateContext)?;
        Ok(ScriptedContext {
            script: Rc::clone(&self.script),
            current: false,
            initialized: false,
        })
    }
}
