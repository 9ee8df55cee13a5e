use glam::Mat4;

use crate::coords::Viewport;

/// Renderer-facing context: device/queue plus the context state a frame is
/// drawn with.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub projection: Mat4,
    /// Viewport clamped to the target; `None` when nothing of it is visible.
    pub viewport: Option<Viewport>,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        projection: Mat4,
        viewport: Option<Viewport>,
    ) -> Self {
        Self {
            device,
            queue,
            projection,
            viewport,
        }
    }
}

/// Target for drawing (encoder + color view + optional depth view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    pub depth_view: Option<&'a wgpu::TextureView>,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(
        encoder: &'a mut wgpu::CommandEncoder,
        color_view: &'a wgpu::TextureView,
        depth_view: Option<&'a wgpu::TextureView>,
    ) -> Self {
        Self {
            encoder,
            color_view,
            depth_view,
        }
    }
}
