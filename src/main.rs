mod backup;
mod error;
mod files;
mod normalize;
mod pipeline;
mod platform;
mod store;

use clap::Parser;
use error::AppError;
use pipeline::{Mode, RunConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Fixed name of the exported document, next to the database by default.
const EXPORT_FILENAME: &str = "settings-edit.json";

/// Extract the settings JSON from Logitech G HUB's settings.db, normalize
/// it, and optionally write an edited copy back.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the G HUB SQLite DB (settings.db).
    /// Auto-detected if omitted.
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Write the exported JSON here instead of settings-edit.json
    /// next to the database.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Path to a specific configuration file.
    /// Defaults to $XDG_CONFIG_HOME/ghub-settings-edit/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also write the extracted payload untouched to a sibling file
    /// before normalizing.
    #[arg(long)]
    keep_raw: bool,

    /// After exporting, write the (possibly edited) file back into the
    /// database. Takes a backup of settings.db first.
    #[arg(short = 'w', long)]
    write_back: bool,

    /// Skip the confirmation prompt before write-back.
    #[arg(short = 'y', long)]
    yes: bool,

    /// Print each pipeline step.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress standard output.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Deserialize, Default)]
struct FileConfig {
    db_path: Option<PathBuf>,
    out_path: Option<PathBuf>,
}

fn load_file_config(explicit_path: Option<&Path>) -> Result<FileConfig, AppError> {
    let path = if let Some(p) = explicit_path {
        if !p.exists() {
            return Err(AppError::Config {
                path: p.to_path_buf(),
                reason: "file not found".into(),
            });
        }
        Some(p.to_path_buf())
    } else {
        // Search: XDG/OS config dir, then nothing
        dirs::config_dir()
            .map(|d| d.join("ghub-settings-edit/config.toml"))
            .filter(|p| p.exists())
    };

    match path {
        None => Ok(FileConfig::default()),
        Some(p) => {
            let content = fs::read_to_string(&p).map_err(|err| AppError::Config {
                path: p.clone(),
                reason: err.to_string(),
            })?;
            toml::from_str(&content).map_err(|err| AppError::Config {
                path: p,
                reason: err.to_string(),
            })
        }
    }
}

fn resolve(cli: Cli, file_cfg: FileConfig) -> Result<RunConfig, AppError> {
    // 1. Resolve db_path (CLI > Config > Platform default)
    let db_path = match cli.db.or(file_cfg.db_path) {
        Some(p) => p,
        None => platform::settings_dir()?.join(platform::DB_FILENAME),
    };

    // 2. The database must already exist; nothing here creates one.
    if !db_path.is_file() {
        return Err(AppError::StorageNotFound(db_path));
    }

    // 3. Resolve the export path (CLI > Config > next to the database)
    let export_path = cli
        .out
        .or(file_cfg.out_path)
        .unwrap_or_else(|| db_path.with_file_name(EXPORT_FILENAME));

    let raw_export_path = cli
        .keep_raw
        .then(|| export_path.with_extension("raw.json"));

    Ok(RunConfig {
        db_path,
        export_path,
        raw_export_path,
        mode: if cli.write_back {
            Mode::WriteBack
        } else {
            Mode::Export
        },
        assume_yes: cli.yes,
        verbose: cli.verbose,
        quiet: cli.quiet,
    })
}

fn report(err: &AppError) {
    eprintln!("error: {err}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let file_cfg = load_file_config(cli.config.as_deref())?;
    let config = resolve(cli, file_cfg)?;
    pipeline::run(&config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(err.exit_code())
        }
    }
}
