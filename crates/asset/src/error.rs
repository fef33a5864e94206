//! Errors produced while loading or resolving an OBJ mesh.

use std::{
    fmt, io,
    num::ParseFloatError,
    path::PathBuf,
};

use thiserror::Error;

/// Which per-face attribute an index refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Attribute {
    Position,
    Normal,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Position => f.write_str("position"),
            Attribute::Normal => f.write_str("normal"),
        }
    }
}

/// Line numbers are 1-based, face numbers are 0-based positions in [`Mesh::faces`].
///
/// [`Mesh::faces`]: crate::mesh::Mesh::faces
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("OBJ file not found or not openable: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Missing {what} on line {line}")]
    MissingField { line: usize, what: &'static str },

    #[error("Failed to parse '{token}' as a number on line {line}")]
    InvalidNumber {
        line: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("Invalid index '{token}' on line {line} (expected a non-negative integer)")]
    InvalidIndex { line: usize, token: String },

    #[error("Malformed face element '{element}' on line {line} (expected v/vt/vn)")]
    MalformedFace { line: usize, element: String },

    #[error("Face on line {line} has {found} elements; only triangles are supported")]
    FaceArity { line: usize, found: usize },

    #[error("Face {face} references {attribute} {index}, but only {len} are defined")]
    IndexOutOfRange {
        face: usize,
        attribute: Attribute,
        index: u32,
        len: usize,
    },
}

impl ObjError {
    /// `true` when the resource itself could not be opened, as opposed to bad contents.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ObjError::NotFound { .. })
    }
}

pub type ObjResult<T> = Result<T, ObjError>;
