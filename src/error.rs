//! Error types for 3MF writing
//!
//! Every error carries a stable code so callers (and logs) can categorise
//! failures without matching on message text.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O and archive errors
//! - **E2xxx**: XML serialization errors
//! - **E3xxx**: Input validation errors
//!
//! ## Error Codes
//!
//! - `E1001`: I/O error creating, writing or renaming a file
//! - `E1002`: ZIP archive error
//! - `E2005`: XML writing error
//! - `E3003`: Malformed array shape (wrong column or row count, non-finite value)
//! - `E3004`: Face references a vertex that does not exist
//! - `E3005`: Output destination is not a usable file path

use std::io;
use thiserror::Error;

/// Result type for 3MF operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error category
///
/// Groups the concrete [`Error`] variants into the four failure classes a
/// caller usually needs to distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed array dimensions or values
    Shape,
    /// A face references a non-existent vertex
    Reference,
    /// Wrong kind of value for a required argument (e.g. the output path)
    Type,
    /// Failure while producing the package or writing it out
    Io,
}

/// Errors that can occur when writing 3MF files
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while writing the package
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - Destination directory does not exist
    /// - Insufficient permissions
    /// - Existing file at the destination cannot be replaced
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// ZIP archive error
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - Underlying sink failed while an entry was being compressed
    /// - Archive could not be finalized
    #[error("[E1002] ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML writing error
    ///
    /// **Error Code**: E2005
    ///
    /// **Common Causes**:
    /// - Output stream rejected the serialized XML
    #[error("[E2005] XML writing error: {0}")]
    XmlWrite(String),

    /// Malformed input array
    ///
    /// **Error Code**: E3003
    ///
    /// **Common Causes**:
    /// - A vertex, face or colour row does not have exactly 3 columns
    /// - The colour array has a different row count than the vertex array
    /// - A coordinate or colour channel is NaN or infinite
    #[error("[E3003] Shape error: {0}")]
    Shape(String),

    /// Face references a non-existent vertex
    ///
    /// **Error Code**: E3004
    ///
    /// **Suggestions**:
    /// - Face indices are 1-based: valid values are `1..=vertex_count`
    #[error("[E3004] Reference error: {0}")]
    Reference(String),

    /// Output destination is not a usable file path
    ///
    /// **Error Code**: E3005
    ///
    /// **Common Causes**:
    /// - Empty path
    /// - Path ends in a separator or `..` and has no file name
    /// - Path names an existing directory
    #[error("[E3005] Invalid output path: {0}")]
    InvalidPath(String),
}

impl Error {
    /// The category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) | Error::Zip(_) | Error::XmlWrite(_) => ErrorKind::Io,
            Error::Shape(_) => ErrorKind::Shape,
            Error::Reference(_) => ErrorKind::Reference,
            Error::InvalidPath(_) => ErrorKind::Type,
        }
    }

    /// Create a Shape error for a row with the wrong number of columns
    ///
    /// # Arguments
    /// * `array` - Name of the input array (e.g. "vertices")
    /// * `row` - 0-based row number
    /// * `columns` - Number of columns actually found
    pub fn column_count(array: &str, row: usize, columns: usize) -> Self {
        Error::Shape(format!(
            "{} row {} has {} columns, expected 3. \
             Every {} row must hold exactly three values.",
            array, row, columns, array
        ))
    }

    /// Create a Shape error for a non-finite value
    pub fn non_finite(array: &str, row: usize, column: usize, value: f64) -> Self {
        Error::Shape(format!(
            "{} row {} column {} is {}, expected a finite number",
            array, row, column, value
        ))
    }

    /// Create a Reference error for an out-of-range face index
    ///
    /// # Arguments
    /// * `face` - 0-based face row
    /// * `corner` - 0-based corner within the face
    /// * `index` - The offending 1-based index
    /// * `vertex_count` - Number of vertices in the mesh
    pub fn face_reference(face: usize, corner: usize, index: i64, vertex_count: usize) -> Self {
        Error::Reference(format!(
            "face {} corner {} references vertex {}, but the mesh has {} vertices \
             (valid 1-based indices: 1-{})",
            face, corner, index, vertex_count, vertex_count
        ))
    }

    /// Create an XmlWrite error
    ///
    /// # Arguments
    /// * `message` - Description of the writing error
    pub fn xml_write(message: String) -> Self {
        Error::XmlWrite(message)
    }
}
