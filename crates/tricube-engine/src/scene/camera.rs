use glam::{Mat4, Vec3};

/// Fixed look-at camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Camera {
    pub const fn new(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self { eye, target, up }
    }

    /// World-to-eye transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Camera slightly left of and above the cubes, looking at the origin.
pub const SCENE_CAMERA: Camera = Camera::new(Vec3::new(-0.5, 1.0, 7.0), Vec3::ZERO, Vec3::Y);
