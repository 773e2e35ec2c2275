//! OPC (Open Packaging Conventions) handling for 3MF files
//!
//! A 3MF file is a ZIP archive following the OPC standard. The packages
//! written here always hold exactly three parts: the content types
//! descriptor, the package relationships and the model document.

mod content_types;
mod relationships;
mod writer;

pub use content_types::{MODEL_CONTENT_TYPE, RELATIONSHIPS_CONTENT_TYPE};
pub use relationships::MODEL_REL_TYPE;
pub use writer::{create_package, write_package_file};

/// Main 3D model file path within the 3MF archive
pub const MODEL_PATH: &str = "3D/3dmodel.model";

/// Content types file path
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";

/// Relationships file path
pub const RELS_PATH: &str = "_rels/.rels";

/// Archive entries in the order they are written
pub const PACKAGE_PARTS: [&str; 3] = [CONTENT_TYPES_PATH, RELS_PATH, MODEL_PATH];
