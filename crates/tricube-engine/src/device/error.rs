use thiserror::Error;

/// Fatal failure while bringing up the window and rendering context.
///
/// Every setup step has its own variant so the diagnostic names the step that
/// failed.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("unable to register the window class: {0}")]
    RegisterClass(String),

    #[error("cannot run in fullscreen mode at {width}x{height} with {bits}-bit color")]
    DisplayModeUnavailable { width: u32, height: u32, bits: u8 },

    #[error("fullscreen mode {width}x{height}x{bits} unavailable and windowed mode was declined")]
    FullscreenDeclined { width: u32, height: u32, bits: u8 },

    #[error("unable to create window: {0}")]
    CreateWindow(String),

    #[error("unable to acquire a drawing surface: {0}")]
    AcquireSurface(String),

    #[error("can't find an appropriate pixel format: {0}")]
    ChoosePixelFormat(String),

    #[error("unable to set pixel format: {0}")]
    SetPixelFormat(String),

    #[error("unable to create rendering context: {0}")]
    CreateContext(String),

    #[error("unable to activate rendering context: {0}")]
    ActivateContext(String),

    #[error("scene initialization failed: {0}")]
    SceneInit(String),
}

/// Non-fatal failure during teardown.
///
/// Teardown keeps going after any of these; they are collected and logged.
#[derive(Debug, Error)]
pub enum TeardownError {
    #[error("unable to restore the display mode: {0}")]
    RestoreDisplayMode(String),

    #[error("unable to release rendering context: {0}")]
    ReleaseContext(String),

    #[error("unable to delete rendering context: {0}")]
    DeleteContext(String),

    #[error("unable to release drawing surface: {0}")]
    ReleaseSurface(String),

    #[error("unable to destroy window: {0}")]
    DestroyWindow(String),

    #[error("unable to unregister window class: {0}")]
    UnregisterClass(String),
}

/// Failure while drawing a frame.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no rendering context is current")]
    NotCurrent,

    #[error("scene has not been initialized")]
    NotInitialized,

    #[error("drawing surface is unusable: {0}")]
    SurfaceLost(String),
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}
