//! The three-cube scene.
//!
//! Responsibilities:
//! - projection modes and the fixed clip volume
//! - the fixed camera and cube placements
//! - recording a frame into a renderer-agnostic `FrameRecord`
//!
//! Nothing here touches wgpu; the scene talks to a `GraphicsContext`.

mod camera;
mod cubes;
mod frame;
mod matrix_stack;
mod projection;
mod state;

pub use camera::{Camera, SCENE_CAMERA};
pub use cubes::{CUBE_SIZE, CUBES, Scene};
pub use frame::{CubeDraw, FrameRecord};
pub use matrix_stack::MatrixStack;
pub use projection::{ClipVolume, Projection, ProjectionMode, SCENE_CLIP};
pub use state::{BLUE, GREEN, Light, Material, RenderState, Shading, YELLOW};
