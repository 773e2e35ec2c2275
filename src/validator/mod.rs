//! Input validation for mesh data
//!
//! Caller-supplied arrays are checked here before any document is built or
//! any file is touched. Faces use the caller's 1-based convention: a valid
//! index lies in `1..=vertex_count`.

use crate::error::{Error, Result};
use std::path::{Path, is_separator};

/// Validate the shape and referential integrity of caller-supplied mesh data
///
/// Checks, in order:
/// 1. every vertex row has 3 finite coordinates
/// 2. every face row has 3 indices
/// 3. every face index lies in `1..=vertices.len()`
/// 4. when `colors` is present and non-empty, it has one finite 3-channel row per vertex
///
/// An empty `colors` slice is treated the same as `None`.
pub fn validate_mesh<V, F, I, C>(vertices: &[V], faces: &[F], colors: Option<&[C]>) -> Result<()>
where
    V: AsRef<[f64]>,
    F: AsRef<[I]>,
    I: Copy + Into<i64>,
    C: AsRef<[f64]>,
{
    validate_value_rows("vertices", vertices)?;
    validate_face_shape(faces)?;
    validate_face_references(faces, vertices.len())?;

    if let Some(colors) = colors.filter(|c| !c.is_empty()) {
        if colors.len() != vertices.len() {
            return Err(Error::Shape(format!(
                "colors has {} rows but vertices has {}. \
                 Supply exactly one color per vertex, or none at all.",
                colors.len(),
                vertices.len()
            )));
        }
        validate_value_rows("colors", colors)?;
    }

    Ok(())
}

/// Validate that `path` can name the output package
///
/// This only inspects the path; nothing is created.
pub fn validate_output_path(path: &Path) -> Result<()> {
    let raw = path.as_os_str();
    if raw.is_empty() {
        return Err(Error::InvalidPath("output path is empty".to_string()));
    }

    let ends_with_separator = raw
        .to_string_lossy()
        .chars()
        .last()
        .is_some_and(is_separator);
    if ends_with_separator || path.file_name().is_none() {
        return Err(Error::InvalidPath(format!(
            "'{}' does not name a file",
            path.display()
        )));
    }

    if path.is_dir() {
        return Err(Error::InvalidPath(format!(
            "'{}' is an existing directory",
            path.display()
        )));
    }

    Ok(())
}

fn validate_value_rows<R: AsRef<[f64]>>(array: &str, rows: &[R]) -> Result<()> {
    for (row, values) in rows.iter().enumerate() {
        let values = values.as_ref();
        if values.len() != 3 {
            return Err(Error::column_count(array, row, values.len()));
        }
        if let Some((column, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(Error::non_finite(array, row, column, value));
        }
    }
    Ok(())
}

fn validate_face_shape<F, I>(faces: &[F]) -> Result<()>
where
    F: AsRef<[I]>,
{
    for (row, face) in faces.iter().enumerate() {
        let columns = face.as_ref().len();
        if columns != 3 {
            return Err(Error::column_count("faces", row, columns));
        }
    }
    Ok(())
}

fn validate_face_references<F, I>(faces: &[F], vertex_count: usize) -> Result<()>
where
    F: AsRef<[I]>,
    I: Copy + Into<i64>,
{
    let max_index = i64::try_from(vertex_count).unwrap_or(i64::MAX);

    for (row, face) in faces.iter().enumerate() {
        for (corner, &index) in face.as_ref().iter().enumerate() {
            let index: i64 = index.into();
            if index < 1 || index > max_index {
                return Err(Error::face_reference(row, corner, index, vertex_count));
            }
        }
    }
    Ok(())
}
