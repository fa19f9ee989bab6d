//! Render-from-state view building.
//!
//! # Responsibility
//! - Project tracker state into plain-data snapshots for any surface.
//! - Keep presentation reads separate from state mutation.
//!
//! # Invariants
//! - Snapshots are pure reads; building one never mutates tracker state.
//! - A place with its people hidden exposes no person rows.

use crate::service::tracker_service::Tracker;
use crate::store::StoreBackend;

pub mod render;

pub use render::render_text;

/// Full snapshot of the tracker, rebuilt after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterView {
    pub places: Vec<PlaceView>,
}

/// One place row with its (possibly hidden) people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceView {
    pub name: String,
    pub reputation: u8,
    /// Current transient visibility flag for this place.
    pub people_visible: bool,
    /// Empty when `people_visible` is false.
    pub people: Vec<PersonView>,
}

/// One person row inside a place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonView {
    pub name: String,
    pub reputation: u8,
}

impl RosterView {
    /// Builds the snapshot for the current tracker state.
    pub fn snapshot<S: StoreBackend>(tracker: &Tracker<S>) -> Self {
        let places = tracker
            .roster()
            .iter()
            .map(|(name, record)| {
                let people_visible = tracker.people_visible(name);
                let people = if people_visible {
                    record
                        .people
                        .iter()
                        .map(|(person, rep)| PersonView {
                            name: person.clone(),
                            reputation: rep.value(),
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                PlaceView {
                    name: name.clone(),
                    reputation: record.reputation.value(),
                    people_visible,
                    people,
                }
            })
            .collect();
        Self { places }
    }
}
