use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::AppError;

/// Timestamp suffix for backup files, second resolution.
const STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Copy the database to a timestamped sibling and return the new path.
///
/// Backups accumulate; none are ever deleted by this tool. The write-back
/// step must not run unless this has succeeded (exit 42 otherwise).
pub fn backup(db_path: &Path) -> Result<PathBuf, AppError> {
    let stamp = Local::now().format(STAMP_FORMAT);
    let mut name = db_path.as_os_str().to_os_string();
    name.push(format!(".{stamp}"));
    let backup_path = PathBuf::from(name);

    fs::copy(db_path, &backup_path).map_err(|source| AppError::Backup {
        src: db_path.to_path_buf(),
        dst: backup_path.clone(),
        source,
    })?;
    Ok(backup_path)
}
