use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Local;

use crate::error::AppError;
use crate::{backup, files, normalize, store};

/// Whether a run stops after exporting or continues into the database.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Export,
    WriteBack,
}

/// Everything a run needs, resolved once at startup and read-only after.
pub struct RunConfig {
    pub db_path: PathBuf,
    pub export_path: PathBuf,
    /// Untouched payload copy, written before normalization when set.
    pub raw_export_path: Option<PathBuf>,
    pub mode: Mode,
    pub assume_yes: bool,
    pub verbose: bool,
    pub quiet: bool,
}

/// Run the pipeline: locate the latest record, extract, normalize, export,
/// and in write-back mode re-insert behind the backup gate.
pub fn run(config: &RunConfig) -> Result<(), AppError> {
    let id = locate_record(config)?;
    if config.verbose {
        eprintln!("Latest settings record: id {id}");
    }

    let payload =
        store::read_payload(&config.db_path, id)?.ok_or_else(|| AppError::NoLatestRecord {
            path: config.db_path.clone(),
            source: None,
        })?;

    if let Some(raw_path) = &config.raw_export_path {
        files::write_document(raw_path, &payload)?;
        if !config.quiet {
            eprintln!("Wrote raw payload to: {}", raw_path.display());
        }
    }

    let normalized = normalize::normalize(&payload)?;
    files::write_document(&config.export_path, &normalized)?;
    if !config.quiet {
        eprintln!("Exported settings to: {}", config.export_path.display());
    }

    if config.mode == Mode::Export {
        return Ok(());
    }

    if !config.assume_yes {
        await_confirmation(config)?;
    }

    // Re-read from disk so edits made during the pause are picked up.
    // The database is only touched once the backup exists.
    let document = files::read_document(&config.export_path)?;
    let backup_path = backup::backup(&config.db_path)?;
    if !config.quiet {
        eprintln!("Backed up database to: {}", backup_path.display());
    }

    let created_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    store::write_payload(&config.db_path, id, &document, &created_at)?;
    if !config.quiet {
        eprintln!("Settings written back into the database.");
    }
    Ok(())
}

/// LocateRecord state: a lookup failure counts the same as an empty table.
fn locate_record(config: &RunConfig) -> Result<i64, AppError> {
    match store::latest_id(&config.db_path) {
        Ok(id) if id > 0 => Ok(id),
        Ok(_) => Err(AppError::NoLatestRecord {
            path: config.db_path.clone(),
            source: None,
        }),
        Err(AppError::Storage { source, .. }) => Err(AppError::NoLatestRecord {
            path: config.db_path.clone(),
            source: Some(source),
        }),
        Err(other) => Err(other),
    }
}

/// Block until the user confirms. G HUB must be closed before its database
/// is replaced underneath it, and the pause is the editing window.
fn await_confirmation(config: &RunConfig) -> Result<(), AppError> {
    println!("Close G HUB now if it is running.");
    println!(
        "You may edit {} before continuing; the file is written back as-is.",
        config.export_path.display()
    );
    print!("Press Enter to continue... ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|source| AppError::Io {
            action: "failed to read confirmation from stdin".to_owned(),
            source,
        })?;
    Ok(())
}
