use std::fs;
use std::path::Path;

use crate::error::AppError;

/// Write the document verbatim, overwriting any previous export.
pub fn write_document(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    fs::write(path, bytes).map_err(|source| AppError::Io {
        action: format!("failed to write {}", path.display()),
        source,
    })
}

/// Read the (possibly user-edited) document back before write-back.
///
/// Failure here is its own class (exit 24): continuing would push stale or
/// missing data into the database.
pub fn read_document(path: &Path) -> Result<Vec<u8>, AppError> {
    fs::read(path).map_err(|source| AppError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })
}
