//! GPU-facing vertex and uniform layouts, and mesh expansion into a triangle list.

use asset::{Mesh, ObjError};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::{VertexBufferLayout, VertexStepMode};

/// Vertex: position + normal.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
    };
}

/// Expand every face into three vertices (non-indexed triangle list).
pub fn vertices_from_mesh(mesh: &Mesh) -> Result<Vec<Vertex>, ObjError> {
    let mut out = Vec::with_capacity(mesh.faces.len() * 3);
    for triangle in mesh.triangles() {
        for corner in triangle? {
            out.push(Vertex {
                pos: corner.position,
                normal: corner.normal,
            });
        }
    }
    Ok(out)
}

/// Per-frame uniforms (16-byte aligned, mirrors `Globals` in mesh.wgsl).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub eye_pos: [f32; 4],
    pub light_pos: [f32; 4],
    pub base_color: [f32; 4],
    /// x = ambient, y = diffuse modifier, z = shininess, w unused.
    pub params: [f32; 4],
}

impl Globals {
    pub fn new(view_proj: Mat4, eye: Vec3, light: Vec3, settings: &RenderSettings) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            eye_pos: eye.extend(1.0).to_array(),
            light_pos: light.extend(1.0).to_array(),
            base_color: settings.base_color,
            params: [
                settings.ambient,
                settings.diffuse_intensity,
                settings.shininess,
                0.0,
            ],
        }
    }
}

/// Fragment stage selection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Shading {
    /// Ambient + diffuse + specular from a point light at the eye.
    #[default]
    Lit,
    /// Solid base colour, no lighting.
    Flat,
}

impl Shading {
    pub(crate) fn entry_point(self) -> &'static str {
        match self {
            Shading::Lit => "fs_lit",
            Shading::Flat => "fs_flat",
        }
    }
}

/// Material and shading parameters fixed at startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSettings {
    pub shading: Shading,
    pub diffuse_intensity: f32,
    pub ambient: f32,
    pub shininess: f32,
    pub base_color: [f32; 4],
    pub clear_color: wgpu::Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shading: Shading::Lit,
            diffuse_intensity: 1.0,
            ambient: 0.05,
            shininess: 128.0,
            base_color: [0.4, 0.75, 0.6, 1.0],
            clear_color: wgpu::Color::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset::Face;

    #[test]
    fn faces_expand_to_three_vertices_each() {
        let mesh = Mesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0.0, 0.0, 1.0], [0.0, 1.0, 0.0]],
            vec![
                Face::new([1, 2, 3], [1, 1, 1]),
                Face::new([3, 2, 1], [2, 2, 1]),
            ],
        );
        let verts = vertices_from_mesh(&mesh).expect("valid mesh");
        assert_eq!(verts.len(), 6);
        assert_eq!(verts[1].pos, [1.0, 0.0, 0.0]);
        assert_eq!(verts[3].pos, [0.0, 1.0, 0.0]);
        assert_eq!(verts[3].normal, [0.0, 1.0, 0.0]);
        assert_eq!(verts[5].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn dangling_index_fails_expansion() {
        let mesh = Mesh::new(
            vec![[0.0; 3]],
            vec![[0.0, 0.0, 1.0]],
            vec![Face::new([1, 1, 2], [1, 1, 1])],
        );
        assert!(matches!(
            vertices_from_mesh(&mesh),
            Err(ObjError::IndexOutOfRange { index: 2, .. })
        ));
    }

    #[test]
    fn uniform_layout_is_aligned() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(std::mem::size_of::<Globals>() % 16, 0);
        assert_eq!(std::mem::size_of::<Globals>(), 64 + 4 * 16);
    }

    #[test]
    fn globals_pack_settings() {
        let settings = RenderSettings {
            diffuse_intensity: 0.5,
            ..RenderSettings::default()
        };
        let g = Globals::new(Mat4::IDENTITY, Vec3::ONE, Vec3::Y, &settings);
        assert_eq!(g.params, [0.05, 0.5, 128.0, 0.0]);
        assert_eq!(g.light_pos, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(g.base_color, [0.4, 0.75, 0.6, 1.0]);
    }
}
