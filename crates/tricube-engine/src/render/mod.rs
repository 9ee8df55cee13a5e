//! GPU rendering subsystem.
//!
//! Renderers consume a scene `FrameRecord` and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is in eye space, produced by the scene's model-view stack.
//! - The vertex shader applies the installed projection (0..1 clip depth).

mod ctx;
mod cube;
mod mesh;

pub use ctx::{RenderCtx, RenderTarget};
pub use cube::CubeRenderer;
pub use mesh::{CUBE_INDEX_COUNT, CUBE_VERTEX_COUNT, CubeVertex, unit_cube};
