//! Window and rendering-context lifecycle.
//!
//! The windowing/graphics API is consumed through the [`Backend`] seam so the
//! setup sequence, its fullscreen fallback and the teardown order do not
//! depend on winit or wgpu. The winit/wgpu backend lives in `window`.

mod backend;
mod prompt;
mod resources;

pub use backend::{
    Backend, DisplayModeRequest, GraphicsContext, NativeWindow, Platform, Release, WindowStyle,
};
pub use prompt::{FallbackPrompt, FullscreenFallback, ask_windowed};
pub use resources::{TeardownReport, WindowResources};
