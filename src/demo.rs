//! Built-in demo mesh
//!
//! A four-vertex tetrahedron with one distinct color per vertex, handy for
//! smoke-testing the whole pipeline.

use crate::error::Result;
use crate::model::{DocumentInfo, Mesh};
use std::path::Path;

/// Tetrahedron vertices (millimeters)
pub const VERTICES: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [10.0, 0.0, 10.0],
    [10.0, 10.0, 0.0],
    [0.0, 10.0, 10.0],
];

/// Tetrahedron faces (1-based vertex indices)
pub const FACES: [[u32; 3]; 4] = [[1, 3, 4], [2, 3, 4], [1, 2, 4], [1, 4, 3]];

/// Vertex colors: red, blue, green, white
pub const COLORS: [[f64; 3]; 4] = [
    [255.0, 0.0, 0.0],
    [0.0, 0.0, 255.0],
    [0.0, 255.0, 0.0],
    [255.0, 255.0, 255.0],
];

/// Build the demo tetrahedron
pub fn tetrahedron() -> Result<Mesh> {
    Mesh::from_rows(&VERTICES, &FACES, Some(&COLORS[..]))
}

/// Write the demo tetrahedron to `path`
pub fn write_demo<P: AsRef<Path>>(path: P, info: &DocumentInfo) -> Result<()> {
    tetrahedron()?.write_to_file_with(info, path)
}
