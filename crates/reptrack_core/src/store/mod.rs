//! JSON document storage for the roster.
//!
//! # Responsibility
//! - Define the storage contract used by the tracker service.
//! - Keep file-system and serialization details inside this boundary.
//!
//! # Invariants
//! - The persisted document is exactly the place-to-record mapping; no UI
//!   state ever reaches disk.
//! - A missing backing file loads as an empty roster, not an error.
//!
//! # See also
//! - DESIGN.md

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub mod json_store;

pub use json_store::{JsonFileStore, MemoryStore, StoreBackend};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error for roster load/save operations.
#[derive(Debug)]
pub enum StoreError {
    /// Backing file exists but could not be read.
    Read { path: PathBuf, source: io::Error },
    /// Backing file could not be written.
    Write { path: PathBuf, source: io::Error },
    /// Parent directory of the backing file could not be created.
    CreateDir { path: PathBuf, source: io::Error },
    /// Backing file content is not a valid roster document.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// In-memory roster could not be serialized.
    Encode { source: serde_json::Error },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read roster file `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write roster file `{}`: {source}", path.display())
            }
            Self::CreateDir { path, source } => write!(
                f,
                "failed to create data directory `{}`: {source}",
                path.display()
            ),
            Self::Parse { path, source } => write!(
                f,
                "invalid roster document `{}`: {source}",
                path.display()
            ),
            Self::Encode { source } => write!(f, "failed to encode roster document: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. }
            | Self::Write { source, .. }
            | Self::CreateDir { source, .. } => Some(source),
            Self::Parse { source, .. } | Self::Encode { source } => Some(source),
        }
    }
}
