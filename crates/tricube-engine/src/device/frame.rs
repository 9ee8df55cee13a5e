/// Represents a single acquired frame.
///
/// Short-lived: holding the surface texture prevents acquisition of the next
/// frame. [`GpuContext`](super::GpuContext) submits and presents it before
/// `draw` returns.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
