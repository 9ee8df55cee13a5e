use glam::Vec3;

use crate::coords::ColorRgba;

/// Surface material: one color used for both ambient and diffuse response.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub ambient_diffuse: ColorRgba,
}

impl Material {
    pub const fn new(ambient_diffuse: ColorRgba) -> Self {
        Self { ambient_diffuse }
    }
}

pub const YELLOW: Material = Material::new(ColorRgba::new(1.0, 1.0, 0.2, 1.0));
pub const BLUE: Material = Material::new(ColorRgba::new(0.2, 0.2, 1.0, 1.0));
pub const GREEN: Material = Material::new(ColorRgba::new(0.2, 1.0, 0.2, 1.0));

/// Directional light, expressed in eye space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    /// Unit vector pointing from the surface towards the light.
    pub direction: Vec3,
    pub diffuse: ColorRgba,
    /// Scene-wide ambient term, independent of the light.
    pub global_ambient: ColorRgba,
}

impl Default for Light {
    /// White light shining along the view axis from behind the viewer, with a
    /// 0.2 ambient floor.
    fn default() -> Self {
        Self {
            direction: Vec3::Z,
            diffuse: ColorRgba::white(),
            global_ambient: ColorRgba::gray(0.2),
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Shading {
    Flat,
    #[default]
    Smooth,
}

/// Pipeline state fixed at scene initialization.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderState {
    /// `None` draws unlit material colors.
    pub lighting: Option<Light>,
    pub shading: Shading,
    pub depth_test: bool,
}

impl RenderState {
    /// One light, smooth shading, depth testing.
    pub fn lit() -> Self {
        Self {
            lighting: Some(Light::default()),
            shading: Shading::Smooth,
            depth_test: true,
        }
    }
}
