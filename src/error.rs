use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a run, mapped one-to-one onto exit codes.
///
/// Each variant carries enough context (path, underlying cause) to diagnose
/// the failure from the stderr output alone.
#[derive(Debug, Error)]
pub enum AppError {
    /// No known G HUB install location on this OS.
    #[error("unsupported platform: {0}")]
    PlatformUnsupported(&'static str),

    #[error("settings database not found: {}", .0.display())]
    StorageNotFound(PathBuf),

    /// The DATA table is empty, or looking up the latest row failed.
    #[error("no usable settings record in {}", .path.display())]
    NoLatestRecord {
        path: PathBuf,
        #[source]
        source: Option<rusqlite::Error>,
    },

    #[error("database error on {}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The stored payload is not UTF-8 JSON of the expected shape.
    #[error("malformed settings payload: {0}")]
    Format(String),

    #[error("{action}")]
    Io {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load config {}: {}", .path.display(), .reason)]
    Config { path: PathBuf, reason: String },

    /// The exported document could not be read back for write-back.
    #[error("cannot read document for write-back: {}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backup failed. The database must never be overwritten without one,
    /// so this class aborts the run unconditionally.
    #[error("failed to back up {} to {}", .src.display(), .dst.display())]
    Backup {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Process exit status for this failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::PlatformUnsupported(_) => 1,
            AppError::StorageNotFound(_) => 2,
            AppError::NoLatestRecord { .. } => 3,
            AppError::Format(_) => 4,
            AppError::Storage { .. } => 5,
            AppError::Io { .. } | AppError::Config { .. } => 6,
            AppError::SourceUnreadable { .. } => 24,
            AppError::Backup { .. } => 42,
        }
    }
}
