//! Minimal OBJ parser supporting positions, normals and triangular faces.
//!
//! Recognised directives:
//! - `v x y z` vertex position
//! - `vn x y z` vertex normal
//! - `f v/vt/vn v/vt/vn v/vt/vn` triangle; the texture index is skipped unparsed
//!
//! Every other directive (`vt`, `o`, `g`, `s`, `usemtl`, comments, ...) is skipped so
//! that files exported with extra data still load.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::{
    error::{ObjError, ObjResult},
    mesh::{Face, Mesh},
};

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> ObjResult<Mesh> {
    let path = path.as_ref();
    let not_found = |source| ObjError::NotFound {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(not_found)?;
    // Directories open fine on Unix and only fail on the first read.
    if !file.metadata().map_err(not_found)?.is_file() {
        return Err(not_found(io::Error::other("not a regular file")));
    }
    let mesh = load_obj_from_reader(BufReader::new(file))?;
    log::info!(
        "Loaded OBJ {}: {} vertices, {} normals, {} faces",
        path.display(),
        mesh.vertices.len(),
        mesh.normals.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
///
/// Face indices are validated once the whole input has been read; a mesh with any
/// dangling index is rejected.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> ObjResult<Mesh> {
    let mesh = parse_obj(reader)?;
    mesh.validate()?;
    Ok(mesh)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> ObjResult<Mesh> {
    load_obj_from_reader(io::Cursor::new(contents))
}

fn parse_obj<R: BufRead>(reader: R) -> ObjResult<Mesh> {
    let mut mesh = Mesh::default();

    for (line_idx, line) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line.map_err(|source| ObjError::Read {
            line: line_no,
            source,
        })?;
        let mut parts = line.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };

        match tag {
            "v" => {
                let x = parse_f32(parts.next(), line_no, "x coordinate")?;
                let y = parse_f32(parts.next(), line_no, "y coordinate")?;
                let z = parse_f32(parts.next(), line_no, "z coordinate")?;
                mesh.vertices.push([x, y, z]);
            }
            "vn" => {
                let nx = parse_f32(parts.next(), line_no, "nx coordinate")?;
                let ny = parse_f32(parts.next(), line_no, "ny coordinate")?;
                let nz = parse_f32(parts.next(), line_no, "nz coordinate")?;
                mesh.normals.push([nx, ny, nz]);
            }
            "f" => {
                let elements: Vec<&str> = parts.collect();
                if elements.len() != 3 {
                    return Err(ObjError::FaceArity {
                        line: line_no,
                        found: elements.len(),
                    });
                }
                let mut face = Face::default();
                for (slot, element) in elements.iter().enumerate() {
                    let (vi, ni) = parse_face_element(element, line_no)?;
                    face.vertex_indices[slot] = vi;
                    face.normal_indices[slot] = ni;
                }
                mesh.faces.push(face);
            }
            other => {
                log::trace!("Skipping OBJ directive '{}' on line {}", other, line_no);
            }
        }
    }

    Ok(mesh)
}

fn parse_f32(value: Option<&str>, line_no: usize, what: &'static str) -> ObjResult<f32> {
    let token = value.ok_or(ObjError::MissingField {
        line: line_no,
        what,
    })?;
    token.parse::<f32>().map_err(|source| ObjError::InvalidNumber {
        line: line_no,
        token: token.to_owned(),
        source,
    })
}

/// Splits `v/vt/vn` and returns the 1-based `(v, vn)` pair as written.
fn parse_face_element(element: &str, line_no: usize) -> ObjResult<(u32, u32)> {
    let malformed = || ObjError::MalformedFace {
        line: line_no,
        element: element.to_owned(),
    };

    let mut split = element.split('/');
    let (Some(pos), Some(_tex), Some(norm), None) =
        (split.next(), split.next(), split.next(), split.next())
    else {
        return Err(malformed());
    };
    if pos.is_empty() || norm.is_empty() {
        return Err(malformed());
    }

    Ok((parse_index(pos, line_no)?, parse_index(norm, line_no)?))
}

/// Indices are read as decimal numbers, so `3` and `3.0` are equivalent; anything
/// negative, fractional or too large is rejected.
fn parse_index(token: &str, line_no: usize) -> ObjResult<u32> {
    let invalid = || ObjError::InvalidIndex {
        line: line_no,
        token: token.to_owned(),
    };
    let value = token.parse::<f32>().map_err(|_| invalid())?;
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 || value >= u32::MAX as f32 {
        return Err(invalid());
    }
    Ok(value as u32)
}
