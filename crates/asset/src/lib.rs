//! Asset loading: a minimal Wavefront OBJ reader producing an indexed triangle mesh.

pub mod error;
pub mod mesh;
pub mod obj;

pub use error::{Attribute, ObjError};
pub use mesh::{Corner, Face, Mesh};
