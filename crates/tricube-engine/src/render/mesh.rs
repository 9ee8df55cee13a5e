use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Vertex of the unit cube: position and outward face normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl CubeVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub const CUBE_VERTEX_COUNT: usize = 24;
pub const CUBE_INDEX_COUNT: usize = 36;

/// Face normal and the two in-plane axes, ordered so `u x v == normal`.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::Y, Vec3::Z),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::Z, Vec3::X),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::Y, Vec3::X),
];

/// Cube of edge length 1 centered on the origin.
///
/// Four vertices per face so every face keeps its own normal; triangles are
/// counter-clockwise seen from outside.
pub fn unit_cube() -> ([CubeVertex; CUBE_VERTEX_COUNT], [u16; CUBE_INDEX_COUNT]) {
    let mut vertices = [CubeVertex::zeroed(); CUBE_VERTEX_COUNT];
    let mut indices = [0u16; CUBE_INDEX_COUNT];

    for (face, (normal, u, v)) in FACES.into_iter().enumerate() {
        let center = normal * 0.5;
        let corners = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];

        for (corner, (cu, cv)) in corners.into_iter().enumerate() {
            vertices[face * 4 + corner] = CubeVertex {
                position: (center + u * cu + v * cv).to_array(),
                normal: normal.to_array(),
            };
        }

        let base = (face * 4) as u16;
        indices[face * 6..face * 6 + 6].copy_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}
