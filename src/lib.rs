//! # ghub-settings-edit
//!
//! A CLI tool that extracts the Logitech G HUB settings document from the
//! `settings.db` SQLite database, normalizes it, and can write an edited copy
//! back in place.
//!
//! ## What it does
//!
//! G HUB keeps its entire configuration as one JSON document stored as a blob
//! in a `DATA` table; the row with the highest `_id` is the active snapshot.
//! This tool reads that row, sorts the `cards.cards` array into a stable
//! order, and writes the result to `settings-edit.json` next to the database
//! so it can be inspected or edited.
//!
//! With `--write-back` the pipeline continues after the export: it waits for
//! confirmation (close G HUB first), re-reads the exported file so manual
//! edits are picked up, copies `settings.db` to a timestamped sibling, and
//! only then replaces the record. A failed backup aborts the run before the
//! database is touched.
//!
//! ## Usage
//!
//! ```sh
//! # Export only
//! ghub-settings-edit
//!
//! # Export, pause for editing, then write back (backup taken first)
//! ghub-settings-edit --write-back
//!
//! # Non-standard install
//! ghub-settings-edit --db /path/to/settings.db --out /tmp/settings.json
//! ```
//!
//! Preferences can be persisted in `~/.config/ghub-settings-edit/config.toml`.
//!
//! ## Compatibility
//!
//! Tracks G HUB's internal (undocumented) `settings.db` schema:
//! `DATA(_id INTEGER PRIMARY KEY, _date_created TEXT, FILE BLOB)`.
//! This tool is not affiliated with or endorsed by Logitech; it reads locally
//! stored data on your machine for personal use and backup.
