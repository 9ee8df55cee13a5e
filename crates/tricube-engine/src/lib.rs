//! Tricube engine crate.
//!
//! Window and rendering-context lifecycle, the three-cube scene, and the
//! winit/wgpu runtime that drives them.

pub mod config;
pub mod coords;
pub mod core;
pub mod device;
pub mod logging;
pub mod platform;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;
