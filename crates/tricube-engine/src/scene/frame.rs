use glam::Mat4;

use crate::coords::ColorRgba;

use super::state::Material;

/// One cube placement.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubeDraw {
    /// Object-to-eye transform.
    pub model_view: Mat4,
    pub material: Material,
    /// Edge length in object units.
    pub size: f32,
}

/// Everything one frame draws, in submission order.
///
/// The renderer clears, draws `cubes`, then presents.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub clear_color: ColorRgba,
    pub clear_depth: bool,
    pub view: Mat4,
    pub cubes: Vec<CubeDraw>,
}

impl FrameRecord {
    pub fn new(clear_color: ColorRgba, view: Mat4) -> Self {
        Self {
            clear_color,
            clear_depth: true,
            view,
            cubes: Vec::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, draw: CubeDraw) {
        self.cubes.push(draw);
    }
}
