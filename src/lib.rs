//! # write3mf
//!
//! Write triangle meshes to 3MF (3D Manufacturing Format) packages.
//!
//! A 3MF file is a ZIP container following the Open Packaging Conventions
//! (OPC) with an XML model document inside. This crate turns raw mesh rows
//! (vertex coordinates, 1-based triangle indices and optional per-vertex
//! RGB colors) into such a package.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Eager validation of array shapes and face references
//! - Per-vertex colors deduplicated into a single materials color group
//! - Atomic file output: the destination is replaced only by a complete package
//!
//! ## Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let vertices = [
//!     [0.0, 0.0, 0.0],
//!     [10.0, 0.0, 10.0],
//!     [10.0, 10.0, 0.0],
//!     [0.0, 10.0, 10.0],
//! ];
//! let faces = [[1u32, 3, 4], [2, 3, 4], [1, 2, 4], [1, 4, 3]];
//! let colors = [
//!     [255.0, 0.0, 0.0],
//!     [0.0, 0.0, 255.0],
//!     [0.0, 255.0, 0.0],
//!     [255.0, 255.0, 255.0],
//! ];
//!
//! write3mf::write("tetrahedron.3mf", &vertices, &faces, Some(&colors[..]))?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod demo;
pub mod error;
pub mod model;
pub mod opc;
mod validator;
mod writer;

pub use error::{Error, ErrorKind, Result};
pub use model::{
    Color, ColorPalette, ColorRange, DocumentInfo, Mesh, MetadataEntry, Triangle, Vertex,
};
pub use validator::{validate_mesh, validate_output_path};
pub use writer::{COLOR_GROUP_ID, CORE_NAMESPACE, MATERIAL_NAMESPACE, OBJECT_ID};

use std::io::{Seek, Write};
use std::path::Path;
use tracing::{debug, info};

/// Validate mesh rows and write them to a 3MF file
///
/// # Arguments
///
/// * `path` - Destination of the `.3mf` package; replaced if it exists
/// * `vertices` - One `[x, y, z]` row per vertex, in millimeters
/// * `faces` - One row of three 1-based vertex indices per triangle
/// * `colors` - Optional RGB row per vertex, in `0..=1` or `0..=255`
///
/// All validation happens before any file is touched. On error the
/// destination is left as it was.
///
/// # Example
///
/// ```no_run
/// # fn main() -> write3mf::Result<()> {
/// let vertices = [[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 10.0, 0.0]];
/// let faces = [[1u32, 2, 3]];
/// write3mf::write("triangle.3mf", &vertices, &faces, None::<&[[f64; 3]]>)?;
/// # Ok(())
/// # }
/// ```
pub fn write<P, V, F, I, C>(
    path: P,
    vertices: &[V],
    faces: &[F],
    colors: Option<&[C]>,
) -> Result<()>
where
    P: AsRef<Path>,
    V: AsRef<[f64]>,
    F: AsRef<[I]>,
    I: Copy + Into<i64>,
    C: AsRef<[f64]>,
{
    // write_to_file checks the path before anything is rendered
    let mesh = Mesh::from_rows(vertices, faces, colors)?;
    mesh.write_to_file(path)
}

impl Mesh {
    /// Render the model document (`3D/3dmodel.model`) as text
    pub fn to_model_xml(&self, info: &DocumentInfo) -> Result<String> {
        let palette = self.palette();
        if let Some(ref palette) = palette {
            debug!(
                "Color palette: {} distinct colors from {} vertices ({:?} range)",
                palette.len(),
                self.vertices().len(),
                palette.range()
            );
        }
        writer::model_xml_string(self, palette.as_ref(), info)
    }

    /// Write a 3MF package to a writer with default metadata
    ///
    /// # Example
    ///
    /// ```
    /// use std::io::Cursor;
    /// use write3mf::Mesh;
    ///
    /// # fn main() -> write3mf::Result<()> {
    /// let vertices = [[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 10.0, 0.0]];
    /// let mesh = Mesh::from_rows(&vertices, &[[1u32, 2, 3]], None::<&[[f64; 3]]>)?;
    /// let bytes = mesh.to_writer(Cursor::new(Vec::new()))?.into_inner();
    /// assert_eq!(&bytes[..2], b"PK");
    /// # Ok(())
    /// # }
    /// ```
    pub fn to_writer<W: Write + Seek>(&self, writer: W) -> Result<W> {
        self.to_writer_with(&DocumentInfo::new(), writer)
    }

    /// Write a 3MF package to a writer with the given metadata
    pub fn to_writer_with<W: Write + Seek>(&self, info: &DocumentInfo, writer: W) -> Result<W> {
        let model_xml = self.to_model_xml(info)?;
        opc::create_package(writer, &model_xml)
    }

    /// Write a 3MF package to a file path with default metadata
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write_to_file_with(&DocumentInfo::new(), path)
    }

    /// Write a 3MF package to a file path with the given metadata
    ///
    /// The path is checked before the document is rendered, and the file is
    /// replaced atomically.
    pub fn write_to_file_with<P: AsRef<Path>>(&self, info: &DocumentInfo, path: P) -> Result<()> {
        let path = path.as_ref();
        validate_output_path(path)?;

        let model_xml = self.to_model_xml(info)?;
        opc::write_package_file(path, &model_xml)?;

        info!(
            "Saved {} vertices and {} triangles to {:?} (3MF{})",
            self.vertices().len(),
            self.triangles().len(),
            path,
            if self.has_colors() { ", colored" } else { "" }
        );

        Ok(())
    }
}
