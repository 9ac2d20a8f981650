use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension, params};

use crate::error::AppError;

// Every accessor opens its own connection and drops it before returning, so
// the file is never held between pipeline steps. G HUB may be running and
// expects to reacquire its database at any time.

fn open_read_only(path: &Path) -> Result<Connection, AppError> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| storage(path, source))
}

fn open_read_write(path: &Path) -> Result<Connection, AppError> {
    // No CREATE flag: writing must never conjure up a fresh empty database.
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| storage(path, source))
}

fn storage(path: &Path, source: rusqlite::Error) -> AppError {
    AppError::Storage {
        path: path.to_path_buf(),
        source,
    }
}

/// Highest `_id` in the DATA table, or -1 when the table is empty.
/// Callers treat anything `<= 0` as "no usable record".
pub fn latest_id(path: &Path) -> Result<i64, AppError> {
    let conn = open_read_only(path)?;
    conn.query_row("SELECT MAX(_id) FROM DATA", [], |row| {
        row.get::<_, Option<i64>>(0)
    })
    .map(|id| id.unwrap_or(-1))
    .map_err(|source| storage(path, source))
}

/// The FILE blob for the given id, or `None` when no row matches.
pub fn read_payload(path: &Path, id: i64) -> Result<Option<Vec<u8>>, AppError> {
    let conn = open_read_only(path)?;
    conn.query_row("SELECT FILE FROM DATA WHERE _id = ?1", params![id], |row| {
        row.get::<_, Vec<u8>>(0)
    })
    .optional()
    .map_err(|source| storage(path, source))
}

/// Replace the row for `id` with `payload` and the given `_date_created`.
///
/// A single REPLACE statement keeps the table populated at every point in
/// time; there is no delete-then-insert window with no current record.
pub fn write_payload(
    path: &Path,
    id: i64,
    payload: &[u8],
    created_at: &str,
) -> Result<(), AppError> {
    let conn = open_read_write(path)?;
    conn.execute(
        "REPLACE INTO DATA (_id, _date_created, FILE) VALUES (?1, ?2, ?3)",
        params![id, created_at, payload],
    )
    .map_err(|source| storage(path, source))?;
    Ok(())
}
