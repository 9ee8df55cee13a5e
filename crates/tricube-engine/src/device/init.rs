/// Initialization parameters for the GPU layer.
///
/// Defaults match a classic double-buffered desktop context: linear color,
/// vsync'd presentation, no optional features.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends the wgpu instance may pick from.
    pub backends: wgpu::Backends,

    pub power_preference: wgpu::PowerPreference,

    /// Prefer an sRGB surface format when two formats are otherwise equal.
    ///
    /// Off by default: scene colors are written to the back buffer unchanged.
    pub prefer_srgb: bool,

    /// Present mode used for double-buffered pixel formats.
    ///
    /// Falls back to FIFO when the surface does not support it.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
