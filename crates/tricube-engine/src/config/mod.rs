//! Application configuration.
//!
//! Configuration is plain data with sensible defaults; the binary decides how
//! to fill it in (command-line flags today).

mod window;

pub use window::WindowConfig;

use crate::device::GpuInit;
use crate::platform::FullscreenFallback;
use crate::scene::ProjectionMode;

/// Everything the runtime needs to bring the window up.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub gpu: GpuInit,
    /// What to do when the requested fullscreen mode is unavailable.
    pub fallback: FullscreenFallback,
    /// Projection installed by the first resize.
    pub projection: ProjectionMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            gpu: GpuInit::default(),
            fallback: FullscreenFallback::Ask,
            projection: ProjectionMode::Perspective,
        }
    }
}

impl AppConfig {
    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    pub fn with_fallback(mut self, fallback: FullscreenFallback) -> Self {
        self.fallback = fallback;
        self
    }
}
