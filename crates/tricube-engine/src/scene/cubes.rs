use glam::Vec3;

use crate::coords::{ColorRgba, Viewport};
use crate::device::{RenderError, SetupError};
use crate::platform::GraphicsContext;

use super::camera::SCENE_CAMERA;
use super::frame::{CubeDraw, FrameRecord};
use super::matrix_stack::MatrixStack;
use super::projection::{Projection, ProjectionMode, SCENE_CLIP};
use super::state::{BLUE, GREEN, Material, RenderState, YELLOW};

/// Edge length of every cube.
pub const CUBE_SIZE: f32 = 0.5;

/// Cube placements in draw order: front-right yellow, centered blue, back-left green.
pub const CUBES: [(Vec3, Material); 3] = [
    (Vec3::new(0.3, 0.0, 1.0), YELLOW),
    (Vec3::new(0.0, 0.0, 0.0), BLUE),
    (Vec3::new(-0.3, 0.0, -1.0), GREEN),
];

/// The three-cube scene.
///
/// Holds the state a fixed-function program keeps in the context (viewport,
/// projection, model-view stack) so it can be inspected without a GPU; every
/// change is forwarded to the context as well.
#[derive(Debug)]
pub struct Scene {
    initialized: bool,
    viewport: Option<Viewport>,
    projection: Option<Projection>,
    model_view: MatrixStack,
    clear_color: ColorRgba,
    frames: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            initialized: false,
            viewport: None,
            projection: None,
            model_view: MatrixStack::new(),
            clear_color: ColorRgba::black(),
            frames: 0,
        }
    }

    /// One-time setup: one light, smooth shading, depth testing.
    pub fn initialize<C: GraphicsContext>(&mut self, ctx: &mut C) -> Result<(), SetupError> {
        if self.initialized {
            return Err(SetupError::SceneInit("scene is already initialized".into()));
        }

        ctx.initialize(&RenderState::lit())?;
        self.initialized = true;

        log::debug!("scene initialized");
        Ok(())
    }

    /// Resets the viewport to the new client area and reapplies `mode`.
    ///
    /// A zero height is treated as one.
    pub fn resize<C: GraphicsContext>(&mut self, ctx: &mut C, width: u32, height: u32, mode: ProjectionMode) {
        let viewport = Viewport::full(width, height);
        ctx.set_viewport(viewport);
        self.viewport = Some(viewport);

        self.update_projection(ctx, mode);
    }

    /// Installs the perspective frustum or the orthographic box for the scene's clip volume.
    pub fn update_projection<C: GraphicsContext>(&mut self, ctx: &mut C, mode: ProjectionMode) {
        let projection = Projection::new(mode, SCENE_CLIP);
        ctx.set_projection(&projection);
        self.projection = Some(projection);

        log::debug!("projection set to {mode:?}");
    }

    /// Draws one frame and presents it.
    pub fn display<C: GraphicsContext>(&mut self, ctx: &mut C) -> Result<(), RenderError> {
        if !self.initialized {
            return Err(RenderError::NotInitialized);
        }

        let frame = self.record_frame();
        ctx.draw(&frame)?;

        self.frames = self.frames.wrapping_add(1);
        Ok(())
    }

    /// Builds the frame's draw list: camera first, then each cube inside its
    /// own matrix scope.
    pub fn record_frame(&mut self) -> FrameRecord {
        let view = SCENE_CAMERA.view_matrix();
        self.model_view.load(view);

        let mut frame = FrameRecord::new(self.clear_color, view);

        for (offset, material) in CUBES {
            let model_view = self.model_view.scoped(|stack| {
                stack.translate(offset);
                stack.top()
            });
            frame.push(CubeDraw {
                model_view,
                material,
                size: CUBE_SIZE,
            });
        }

        frame
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Viewport installed by the last resize.
    #[inline]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Projection installed by the last resize or projection update.
    #[inline]
    pub fn projection(&self) -> Option<Projection> {
        self.projection
    }

    #[inline]
    pub fn matrix_depth(&self) -> usize {
        self.model_view.depth()
    }

    /// Frames presented so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
