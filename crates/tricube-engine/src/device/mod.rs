//! GPU device + surface management.
//!
//! This module is responsible for:
//! - the error types of setup, teardown and rendering
//! - pixel format negotiation against the surface capabilities
//! - the wgpu drawing surface (`GpuSurface`) and rendering context (`GpuContext`)

mod context;
mod error;
mod format;
mod frame;
mod init;
mod surface;

pub use context::GpuContext;
pub use error::{RenderError, SetupError, SurfaceErrorAction, TeardownError};
pub use format::{
    DEPTH_BITS, FormatSupport, PixelFormat, PixelFormatRequest, STENCIL_BITS, choose_alpha_mode, choose_pixel_format,
};
pub use frame::GpuFrame;
pub use init::GpuInit;
pub use surface::GpuSurface;
