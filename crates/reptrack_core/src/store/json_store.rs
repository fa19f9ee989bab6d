//! Storage contract, file-backed implementation and in-memory test double.
//!
//! # Responsibility
//! - Load and save the full roster document in one synchronous call.
//! - Create the data directory on first save.
//!
//! # Invariants
//! - `save` overwrites the whole document; there is no partial write, no
//!   atomic rename and no locking (single-user, last writer wins).
//! - `load` of a missing file returns an empty roster.
//! - Invalid persisted content is rejected as a parse error, never masked.

use super::{StoreError, StoreResult};
use crate::model::roster::Roster;
use log::{error, info};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Storage contract for roster persistence.
pub trait StoreBackend {
    fn load(&self) -> StoreResult<Roster>;
    fn save(&self, roster: &Roster) -> StoreResult<()>;
}

/// Allows callers to keep a handle on the backend while the tracker owns
/// only a borrow, e.g. to inspect persisted state in tests.
impl<S: StoreBackend + ?Sized> StoreBackend for &S {
    fn load(&self) -> StoreResult<Roster> {
        (**self).load()
    }

    fn save(&self, roster: &Roster) -> StoreResult<()> {
        (**self).save(roster)
    }
}

/// File-backed store holding the roster as pretty-printed UTF-8 JSON.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreBackend for JsonFileStore {
    /// Reads the backing file if present.
    ///
    /// # Side effects
    /// - Emits `store_load` events with duration and status.
    fn load(&self) -> StoreResult<Roster> {
        let started_at = Instant::now();

        if !self.path.exists() {
            info!(
                "event=store_load module=store status=ok mode=missing duration_ms={} places=0",
                started_at.elapsed().as_millis()
            );
            return Ok(Roster::new());
        }

        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(source) => {
                error!(
                    "event=store_load module=store status=error duration_ms={} error_code=store_read_failed error={}",
                    started_at.elapsed().as_millis(),
                    source
                );
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_str::<Roster>(&text) {
            Ok(roster) => {
                info!(
                    "event=store_load module=store status=ok mode=file duration_ms={} places={}",
                    started_at.elapsed().as_millis(),
                    roster.len()
                );
                Ok(roster)
            }
            Err(source) => {
                error!(
                    "event=store_load module=store status=error duration_ms={} error_code=store_parse_failed error={}",
                    started_at.elapsed().as_millis(),
                    source
                );
                Err(StoreError::Parse {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    /// Writes the full roster, creating the data directory if absent.
    ///
    /// # Side effects
    /// - Emits `store_save` events with duration and status.
    fn save(&self, roster: &Roster) -> StoreResult<()> {
        let started_at = Instant::now();

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                if let Err(source) = fs::create_dir_all(parent) {
                    error!(
                        "event=store_save module=store status=error duration_ms={} error_code=store_dir_failed error={}",
                        started_at.elapsed().as_millis(),
                        source
                    );
                    return Err(StoreError::CreateDir {
                        path: parent.to_path_buf(),
                        source,
                    });
                }
            }
        }

        let text = serde_json::to_string_pretty(roster)
            .map_err(|source| StoreError::Encode { source })?;

        match fs::write(&self.path, text) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok duration_ms={} places={}",
                    started_at.elapsed().as_millis(),
                    roster.len()
                );
                Ok(())
            }
            Err(source) => {
                error!(
                    "event=store_save module=store status=error duration_ms={} error_code=store_write_failed error={}",
                    started_at.elapsed().as_millis(),
                    source
                );
                Err(StoreError::Write {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }
}

/// In-process store for service-level tests.
///
/// Not thread-safe; intended for single-threaded test scenarios only.
pub struct MemoryStore {
    roster: RefCell<Roster>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            roster: RefCell::new(Roster::new()),
        }
    }

    /// Seeds the store with an existing roster.
    pub fn with_roster(roster: Roster) -> Self {
        Self {
            roster: RefCell::new(roster),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBackend for MemoryStore {
    fn load(&self) -> StoreResult<Roster> {
        Ok(self.roster.borrow().clone())
    }

    fn save(&self, roster: &Roster) -> StoreResult<()> {
        *self.roster.borrow_mut() = roster.clone();
        Ok(())
    }
}
