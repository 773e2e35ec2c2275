//! Data structures for meshes written to 3MF

mod core;
mod material;

// Re-export all public types from core module
pub use core::{DEFAULT_DESCRIPTION, DocumentInfo, Mesh, MetadataEntry, Triangle, Vertex};

// Re-export all public types from material module
pub use material::{Color, ColorPalette, ColorRange};
