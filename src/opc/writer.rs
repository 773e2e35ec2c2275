//! Package writing functionality for creating 3MF files

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::content_types::CONTENT_TYPES_XML;
use super::relationships::RELS_XML;
use super::{CONTENT_TYPES_PATH, MODEL_PATH, RELS_PATH};

/// Create a 3MF package (ZIP archive) from model data
///
/// This function creates a complete 3MF file including:
/// - `[Content_Types].xml`
/// - `_rels/.rels`
/// - `3D/3dmodel.model`
///
/// # Arguments
///
/// * `writer` - The writer to write the 3MF package to
/// * `model_xml` - The XML content of the 3D model
///
/// # Returns
///
/// Returns the writer after finishing the ZIP archive
pub fn create_package<W: Write + Seek>(writer: W, model_xml: &str) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, contents) in [
        (CONTENT_TYPES_PATH, CONTENT_TYPES_XML),
        (RELS_PATH, RELS_XML),
        (MODEL_PATH, model_xml),
    ] {
        zip.start_file(name, options)?;
        zip.write_all(contents.as_bytes())?;
        debug!("Added package part {} ({} bytes)", name, contents.len());
    }

    let writer = zip.finish()?;
    Ok(writer)
}

/// Write a 3MF package to `path`, replacing any existing file
///
/// The archive is assembled in a uniquely named scratch file next to the
/// destination and renamed over it only once complete, so the destination
/// either keeps its previous contents or holds the full package. The
/// scratch file is removed on every failure path.
pub fn write_package_file(path: &Path, model_xml: &str) -> Result<()> {
    write_atomically(path, |file| {
        create_package(&mut *file, model_xml)?;
        Ok(())
    })
}

/// Run `assemble` against a scratch file and rename it over `path`
///
/// A symlinked destination is resolved first so the link's target is
/// replaced and the link itself survives. An existing destination keeps its
/// permissions.
fn write_atomically<F>(path: &Path, assemble: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let target = resolve_destination(path)?;
    let existing = match fs::metadata(&target) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(Error::Io(e)),
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".write3mf-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    let mut scratch = builder.tempfile_in(dir)?;
    debug!("Assembling package in {:?}", scratch.path());

    let assembled = assemble(scratch.as_file_mut()).and_then(|()| {
        let file = scratch.as_file();
        file.sync_all()?;
        if let Some(permissions) = existing {
            file.set_permissions(permissions)?;
        }
        Ok(())
    });
    if let Err(err) = assembled {
        discard(scratch);
        return Err(err);
    }

    scratch.persist(&target).map_err(|e| {
        discard(e.file);
        Error::Io(e.error)
    })?;

    Ok(())
}

/// Follow a symlinked destination to the file it points at
fn resolve_destination(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            let target = fs::canonicalize(path)?;
            debug!("Resolved symlinked destination {:?} to {:?}", path, target);
            Ok(target)
        }
        _ => Ok(path.to_path_buf()),
    }
}

/// Remove a scratch file, logging rather than returning a cleanup failure
fn discard(scratch: NamedTempFile) {
    let scratch_path = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        warn!("Failed to remove scratch file {:?}: {}", scratch_path, e);
    }
}
