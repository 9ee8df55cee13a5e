//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop, implements the platform backend on top of
//! winit and wgpu, and feeds window events to the application controller.

mod backend;
mod runtime;

pub use backend::{WinitBackend, WinitClass, WinitPlatform, WinitWindow};
pub use runtime::Runtime;
