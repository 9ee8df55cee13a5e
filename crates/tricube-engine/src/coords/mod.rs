//! Coordinate and color types shared between the scene and the renderer.
//!
//! Viewports are expressed in physical pixels with the origin at the
//! top-left corner of the window's client area.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
