use glam::{Mat4, Vec4};

/// Which projection shape is installed.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

impl ProjectionMode {
    /// `true` selects perspective, `false` orthographic.
    #[inline]
    pub const fn from_perspective_flag(perspective: bool) -> Self {
        if perspective {
            Self::Perspective
        } else {
            Self::Orthographic
        }
    }

    #[inline]
    pub const fn is_perspective(self) -> bool {
        matches!(self, Self::Perspective)
    }
}

/// Clip planes of a projection, in eye-space units.
///
/// `near` and `far` are positive distances along the viewing direction (-Z).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClipVolume {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl ClipVolume {
    pub const fn new(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        }
    }

    #[inline]
    pub fn as_tuple(&self) -> (f32, f32, f32, f32, f32, f32) {
        (self.left, self.right, self.bottom, self.top, self.near, self.far)
    }
}

/// The scene's clip volume: ±1 on both axes, near 5, far 100.
pub const SCENE_CLIP: ClipVolume = ClipVolume::new(-1.0, 1.0, -1.0, 1.0, 5.0, 100.0);

/// An installed projection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    Perspective(ClipVolume),
    Orthographic(ClipVolume),
}

impl Projection {
    pub const fn new(mode: ProjectionMode, clip: ClipVolume) -> Self {
        match mode {
            ProjectionMode::Perspective => Self::Perspective(clip),
            ProjectionMode::Orthographic => Self::Orthographic(clip),
        }
    }

    pub const fn mode(&self) -> ProjectionMode {
        match self {
            Self::Perspective(_) => ProjectionMode::Perspective,
            Self::Orthographic(_) => ProjectionMode::Orthographic,
        }
    }

    pub const fn clip(&self) -> &ClipVolume {
        match self {
            Self::Perspective(clip) | Self::Orthographic(clip) => clip,
        }
    }

    /// Projection matrix with a `[0, 1]` clip-space depth range.
    pub fn matrix(&self) -> Mat4 {
        match self {
            Self::Perspective(c) => frustum_rh(c),
            Self::Orthographic(c) => Mat4::orthographic_rh(c.left, c.right, c.bottom, c.top, c.near, c.far),
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(ProjectionMode::Perspective, SCENE_CLIP)
    }
}

/// Off-axis perspective frustum, right-handed, depth mapped to `[0, 1]`.
fn frustum_rh(c: &ClipVolume) -> Mat4 {
    let (l, r, b, t, n, f) = c.as_tuple();
    Mat4::from_cols(
        Vec4::new(2.0 * n / (r - l), 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * n / (t - b), 0.0, 0.0),
        Vec4::new((r + l) / (r - l), (t + b) / (t - b), f / (n - f), -1.0),
        Vec4::new(0.0, 0.0, n * f / (n - f), 0.0),
    )
}
