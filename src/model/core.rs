//! Core mesh types and document metadata

use crate::error::Result;
use crate::validator::validate_mesh;

use super::material::ColorPalette;

/// Description used when the caller does not supply one
pub const DEFAULT_DESCRIPTION: &str = "Mesh exported by write3mf";

/// A vertex in 3D space (millimeters)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A triangle defined by three 0-based vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    /// Index of first vertex
    pub v1: usize,
    /// Index of second vertex
    pub v2: usize,
    /// Index of third vertex
    pub v3: usize,
}

impl Triangle {
    /// Create a new triangle from 0-based indices
    pub fn new(v1: usize, v2: usize, v3: usize) -> Self {
        Self { v1, v2, v3 }
    }

    /// Convert a validated 1-based face row to 0-based indices
    ///
    /// This is the only place caller indices change convention. Every index
    /// must already be known to be at least 1.
    pub(crate) fn from_one_based(face: [i64; 3]) -> Self {
        let zero_based = |index: i64| (index - 1) as usize;
        Self::new(zero_based(face[0]), zero_based(face[1]), zero_based(face[2]))
    }

    /// The three vertex indices in order
    pub fn indices(&self) -> [usize; 3] {
        [self.v1, self.v2, self.v3]
    }
}

/// A validated triangle mesh with optional per-vertex colors
///
/// A `Mesh` can only be built through [`Mesh::from_rows`], so every face
/// references an existing vertex and colors, when present, match the
/// vertex count one-to-one.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
    colors: Option<Vec<[f64; 3]>>,
}

impl Mesh {
    /// Validate caller rows and build a mesh
    ///
    /// # Arguments
    ///
    /// * `vertices` - One `[x, y, z]` row per vertex
    /// * `faces` - One row of three 1-based vertex indices per triangle
    /// * `colors` - Optional RGB row per vertex, in `0..=1` or `0..=255`
    ///
    /// # Example
    ///
    /// ```
    /// use write3mf::Mesh;
    ///
    /// # fn main() -> write3mf::Result<()> {
    /// let vertices = [[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 10.0, 0.0]];
    /// let faces = [[1u32, 2, 3]];
    /// let mesh = Mesh::from_rows(&vertices, &faces, Some(&[[1.0, 0.0, 0.0]; 3][..]))?;
    /// assert_eq!(mesh.triangles()[0].indices(), [0, 1, 2]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_rows<V, F, I, C>(vertices: &[V], faces: &[F], colors: Option<&[C]>) -> Result<Self>
    where
        V: AsRef<[f64]>,
        F: AsRef<[I]>,
        I: Copy + Into<i64>,
        C: AsRef<[f64]>,
    {
        validate_mesh(vertices, faces, colors)?;

        let vertices = vertices
            .iter()
            .map(|row| {
                let row = row.as_ref();
                Vertex::new(row[0], row[1], row[2])
            })
            .collect();

        let triangles = faces
            .iter()
            .map(|row| {
                let row = row.as_ref();
                Triangle::from_one_based([row[0].into(), row[1].into(), row[2].into()])
            })
            .collect();

        let colors = colors.filter(|c| !c.is_empty()).map(|rows| {
            rows.iter()
                .map(|row| {
                    let row = row.as_ref();
                    [row[0], row[1], row[2]]
                })
                .collect()
        });

        Ok(Self {
            vertices,
            triangles,
            colors,
        })
    }

    /// Vertices in input order
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Triangles with 0-based indices, in input order
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Raw per-vertex colors, if any were supplied
    pub fn colors(&self) -> Option<&[[f64; 3]]> {
        self.colors.as_deref()
    }

    /// True when the mesh carries per-vertex colors
    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    /// Deduplicated palette of the per-vertex colors
    pub fn palette(&self) -> Option<ColorPalette> {
        self.colors.as_deref().map(ColorPalette::from_colors)
    }
}

/// A metadata entry on the model element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    /// Name of the metadata entry
    pub name: String,
    /// Value of the metadata entry
    pub value: String,
    /// Preservation flag (optional attribute)
    pub preserve: Option<bool>,
}

impl MetadataEntry {
    /// Create a new metadata entry
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            preserve: None,
        }
    }

    /// Create a new metadata entry with preservation flag
    pub fn new_with_preserve(
        name: impl Into<String>,
        value: impl Into<String>,
        preserve: bool,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            preserve: Some(preserve),
        }
    }
}

/// Document-level metadata written ahead of the resources
///
/// `CreationDate` and `Description` are always emitted; `extra` entries
/// follow them in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    /// Value of the `CreationDate` entry
    pub creation_date: String,
    /// Value of the `Description` entry
    pub description: String,
    /// Additional entries such as `Title` or `Designer`
    pub extra: Vec<MetadataEntry>,
}

impl DocumentInfo {
    /// Metadata stamped with today's local date
    pub fn new() -> Self {
        Self {
            creation_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            extra: Vec::new(),
        }
    }

    /// Replace the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Pin the creation date, e.g. for reproducible output
    pub fn with_creation_date(mut self, date: impl Into<String>) -> Self {
        self.creation_date = date.into();
        self
    }

    /// Append an extra metadata entry
    pub fn with_metadata(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push(MetadataEntry::new(name, value));
        self
    }

    /// All entries in document order
    pub fn entries(&self) -> Vec<MetadataEntry> {
        let mut entries = vec![
            MetadataEntry::new("CreationDate", self.creation_date.as_str()),
            MetadataEntry::new("Description", self.description.as_str()),
        ];
        entries.extend(self.extra.iter().cloned());
        entries
    }
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self::new()
    }
}
