//! CPU-side mesh representation produced by the OBJ loader.

use crate::error::{Attribute, ObjError, ObjResult};

/// Triangle referencing positions and normals by 1-based index, as written in the file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Face {
    pub vertex_indices: [u32; 3],
    pub normal_indices: [u32; 3],
}

impl Face {
    pub fn new(vertex_indices: [u32; 3], normal_indices: [u32; 3]) -> Self {
        Self {
            vertex_indices,
            normal_indices,
        }
    }
}

/// One resolved triangle corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Corner {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Positions, normals and faces in file order. Values are in object space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<[f32; 3]>, normals: Vec<[f32; 3]>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            normals,
            faces,
        }
    }

    /// Returns `true` if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Position at a 1-based index.
    pub fn position(&self, index: u32) -> Option<[f32; 3]> {
        lookup(&self.vertices, index)
    }

    /// Normal at a 1-based index.
    pub fn normal(&self, index: u32) -> Option<[f32; 3]> {
        lookup(&self.normals, index)
    }

    /// Checks every face index against the populated lists, failing on the first
    /// violation in face order.
    pub fn validate(&self) -> ObjResult<()> {
        for face_no in 0..self.faces.len() {
            self.resolve(face_no)?;
        }
        Ok(())
    }

    /// Resolves a face into its three corners.
    ///
    /// # Panics
    /// Panics if `face_no` is not a valid position in [`Mesh::faces`].
    pub fn resolve(&self, face_no: usize) -> ObjResult<[Corner; 3]> {
        let face = &self.faces[face_no];
        let mut corners = [Corner::default(); 3];
        for (slot, corner) in corners.iter_mut().enumerate() {
            let vi = face.vertex_indices[slot];
            let ni = face.normal_indices[slot];
            corner.position = self.position(vi).ok_or(ObjError::IndexOutOfRange {
                face: face_no,
                attribute: Attribute::Position,
                index: vi,
                len: self.vertices.len(),
            })?;
            corner.normal = self.normal(ni).ok_or(ObjError::IndexOutOfRange {
                face: face_no,
                attribute: Attribute::Normal,
                index: ni,
                len: self.normals.len(),
            })?;
        }
        Ok(corners)
    }

    /// Iterate over resolved triangles in face order.
    pub fn triangles(&self) -> impl Iterator<Item = ObjResult<[Corner; 3]>> + '_ {
        (0..self.faces.len()).map(move |face_no| self.resolve(face_no))
    }
}

fn lookup(items: &[[f32; 3]], index: u32) -> Option<[f32; 3]> {
    let i = usize::try_from(index).ok()?.checked_sub(1)?;
    items.get(i).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_triangle() -> Mesh {
        Mesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0.0, 0.0, 1.0]],
            vec![Face::new([1, 2, 3], [1, 1, 1])],
        )
    }

    #[test]
    fn lookup_is_one_based() {
        let mesh = one_triangle();
        assert_eq!(mesh.position(1), Some([0.0, 0.0, 0.0]));
        assert_eq!(mesh.position(3), Some([0.0, 1.0, 0.0]));
        assert_eq!(mesh.position(0), None);
        assert_eq!(mesh.position(4), None);
        assert_eq!(mesh.normal(1), Some([0.0, 0.0, 1.0]));
    }

    #[test]
    fn resolve_produces_corners_in_face_order() {
        let mesh = one_triangle();
        let [a, b, c] = mesh.resolve(0).expect("valid face");
        assert_eq!(a.position, [0.0, 0.0, 0.0]);
        assert_eq!(b.position, [1.0, 0.0, 0.0]);
        assert_eq!(c.position, [0.0, 1.0, 0.0]);
        assert!([a, b, c].iter().all(|c| c.normal == [0.0, 0.0, 1.0]));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn out_of_range_normal_is_reported() {
        let mut mesh = one_triangle();
        mesh.faces.push(Face::new([1, 2, 3], [1, 2, 1]));
        match mesh.validate() {
            Err(ObjError::IndexOutOfRange {
                face,
                attribute,
                index,
                len,
            }) => {
                assert_eq!(face, 1);
                assert_eq!(attribute, Attribute::Normal);
                assert_eq!(index, 2);
                assert_eq!(len, 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        let results: Vec<_> = mesh.triangles().collect();
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn zero_index_is_out_of_range() {
        let mesh = Mesh::new(
            vec![[0.0; 3]],
            vec![[0.0, 1.0, 0.0]],
            vec![Face::new([0, 1, 1], [1, 1, 1])],
        );
        assert!(matches!(
            mesh.validate(),
            Err(ObjError::IndexOutOfRange {
                attribute: Attribute::Position,
                index: 0,
                ..
            })
        ));
    }

    #[test]
    fn empty_mesh_is_valid_but_empty() {
        let mesh = Mesh::default();
        assert!(mesh.is_empty());
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.triangles().count(), 0);
    }
}
