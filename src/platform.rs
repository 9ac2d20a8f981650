use std::path::PathBuf;

use crate::error::AppError;

/// Filename of the G HUB settings database.
pub const DB_FILENAME: &str = "settings.db";

/// Default directory of the G HUB settings store.
///
/// Windows: `%LOCALAPPDATA%\LGHUB`. macOS: `~/Library/Application
/// Support/lghub`. G HUB does not ship for anything else, so every other
/// platform is unsupported unless `--db` points at a database explicitly.
pub fn settings_dir() -> Result<PathBuf, AppError> {
    let dir = if cfg!(target_os = "windows") {
        dirs::data_local_dir().map(|d| d.join("LGHUB"))
    } else if cfg!(target_os = "macos") {
        dirs::config_dir().map(|d| d.join("lghub"))
    } else {
        None
    };
    dir.ok_or(AppError::PlatformUnsupported(std::env::consts::OS))
}
