//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `reptrack_core` linkage.
//! - Print the current roster from the configured data path.

use reptrack_core::{render_text, JsonFileStore, RosterView, Tracker};
use std::path::PathBuf;

const DATA_FILE_NAME: &str = "reptrack_roster.json";

fn data_path() -> PathBuf {
    // Same resolution order as the FFI surface: explicit env override first,
    // temp-dir default otherwise.
    if let Ok(raw) = std::env::var("REPTRACK_DATA_PATH") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DATA_FILE_NAME)
}

fn main() {
    println!("reptrack_core ping={}", reptrack_core::ping());
    println!("reptrack_core version={}", reptrack_core::core_version());

    let path = data_path();
    println!("data file: {}", path.display());

    let mut tracker = Tracker::load(JsonFileStore::new(path));
    if let Some(err) = tracker.take_load_notice() {
        eprintln!("failed to load saved data, starting empty: {err}");
    }

    print!("{}", render_text(&RosterView::snapshot(&tracker)));
}
