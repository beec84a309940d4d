//! Writing the exported drawing to disk.

use crate::draw::SurfaceError;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The fixed export filename. No format negotiation is exposed; every export
/// is a PNG under this name.
pub const EXPORT_FILENAME: &str = "drawing.png";

/// Errors raised while exporting the drawing.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Encoding the pixel buffer failed.
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// The export directory or file could not be written.
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// The default export directory when the config names none.
pub fn default_directory() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Sketchboard")
}

/// Ensure the export directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());
    Ok(canonical)
}

/// Writes PNG bytes under [`EXPORT_FILENAME`] in `directory`.
///
/// An existing export is overwritten — the filename is fixed, so repeated
/// exports replace one another.
///
/// # Returns
/// Path to the written file.
pub fn save_drawing(png_data: &[u8], directory: &Path) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(directory)?;
    let file_path = directory.join(EXPORT_FILENAME);

    log::info!(
        "Saving drawing to: {} ({} bytes)",
        file_path.display(),
        png_data.len()
    );
    fs::write(&file_path, png_data)?;

    let written_size = fs::metadata(&file_path)?.len();
    log::debug!("File written: {written_size} bytes");

    Ok(file_path)
}
