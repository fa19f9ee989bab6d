//! Core domain logic for RepTrack.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::roster::{
    normalize_name, BlankNameError, PlaceRecord, Reputation, ReputationInputError,
    ReputationRangeError, ReputationStep, Roster,
};
pub use service::tracker_service::{Tracker, TrackerError, TrackerResult};
pub use store::{JsonFileStore, MemoryStore, StoreBackend, StoreError, StoreResult};
pub use view::{render_text, PersonView, PlaceView, RosterView};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
