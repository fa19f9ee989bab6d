//! Tracker use-case service.
//!
//! # Responsibility
//! - Own the application state: roster, visibility flags and store handle.
//! - Run every mutation as validate, mutate, persist; the caller redraws.
//!
//! # Invariants
//! - Validation failures leave roster and disk untouched.
//! - A failed save keeps the mutated in-memory roster as source of truth;
//!   there is no rollback and no retry.
//! - Visibility flags are transient and never reach the store.

use crate::model::roster::{
    normalize_name, BlankNameError, PlaceRecord, Reputation, ReputationInputError,
    ReputationStep, Roster,
};
use crate::store::{StoreBackend, StoreError};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Errors from tracker operations.
///
/// `Store` is special: when returned from a mutating operation, the in-memory
/// mutation has already been applied and only persistence failed.
#[derive(Debug)]
pub enum TrackerError {
    /// Entered name is blank after trim.
    BlankName,
    /// A place with this name already exists.
    DuplicatePlace(String),
    /// A person with this name already exists in the place.
    DuplicatePerson { place: String, person: String },
    /// Target place does not exist.
    PlaceNotFound(String),
    /// Target person does not exist in the place.
    PersonNotFound { place: String, person: String },
    /// Typed reputation input is not an integer or is out of range.
    InvalidReputation(ReputationInputError),
    /// Persistence failure; in-memory state is unchanged for loads and
    /// already mutated for saves.
    Store(StoreError),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "{}", BlankNameError),
            Self::DuplicatePlace(name) => write!(f, "place already exists: {name}"),
            Self::DuplicatePerson { place, person } => {
                write!(f, "person already exists in {place}: {person}")
            }
            Self::PlaceNotFound(name) => write!(f, "place not found: {name}"),
            Self::PersonNotFound { place, person } => {
                write!(f, "person not found in {place}: {person}")
            }
            Self::InvalidReputation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidReputation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BlankNameError> for TrackerError {
    fn from(_: BlankNameError) -> Self {
        Self::BlankName
    }
}

impl From<ReputationInputError> for TrackerError {
    fn from(value: ReputationInputError) -> Self {
        Self::InvalidReputation(value)
    }
}

impl From<StoreError> for TrackerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Owned application state: roster, per-place visibility flags and the store.
///
/// Every mutating operation persists the full roster before returning, so
/// disk tracks memory except across reported save failures.
pub struct Tracker<S: StoreBackend> {
    store: S,
    roster: Roster,
    /// Transient per-place flag; absent means "people visible".
    visibility: BTreeMap<String, bool>,
    load_notice: Option<StoreError>,
}

impl<S: StoreBackend> Tracker<S> {
    /// Builds a tracker from the store's current document.
    ///
    /// A read or parse failure is kept as a one-shot notice for the surface
    /// to report, and the tracker starts from an empty roster. Data loss on
    /// corruption is accepted: the next successful save overwrites the file.
    pub fn load(store: S) -> Self {
        let (roster, load_notice) = match store.load() {
            Ok(roster) => (roster, None),
            Err(err) => (Roster::new(), Some(err)),
        };
        Self {
            store,
            roster,
            visibility: BTreeMap::new(),
            load_notice,
        }
    }

    /// Takes the deferred load failure, if any, for user-visible reporting.
    pub fn take_load_notice(&mut self) -> Option<StoreError> {
        self.load_notice.take()
    }

    /// Read access to the current roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Returns whether a place's people are currently rendered.
    pub fn people_visible(&self, place: &str) -> bool {
        self.visibility.get(place).copied().unwrap_or(true)
    }

    /// Creates a place with the default reputation and no people.
    pub fn add_place(&mut self, name: &str) -> TrackerResult<()> {
        let name = normalize_name(name)?;
        if self.roster.contains_key(&name) {
            return Err(TrackerError::DuplicatePlace(name));
        }
        self.roster.insert(name, PlaceRecord::new());
        self.persist()
    }

    /// Removes a place together with all of its people.
    ///
    /// Destructive-action confirmation is a surface concern; this call is
    /// unconditional.
    pub fn remove_place(&mut self, name: &str) -> TrackerResult<()> {
        if self.roster.remove(name).is_none() {
            return Err(TrackerError::PlaceNotFound(name.to_string()));
        }
        // Re-creating the place later starts from the default flag again.
        self.visibility.remove(name);
        self.persist()
    }

    /// Creates a person in a place with the default reputation.
    pub fn add_person(&mut self, place: &str, name: &str) -> TrackerResult<()> {
        let person = normalize_name(name)?;
        let record = self
            .roster
            .get_mut(place)
            .ok_or_else(|| TrackerError::PlaceNotFound(place.to_string()))?;
        if record.people.contains_key(&person) {
            return Err(TrackerError::DuplicatePerson {
                place: place.to_string(),
                person,
            });
        }
        record.people.insert(person, Reputation::DEFAULT);
        self.persist()
    }

    /// Removes a person from a place. Unconditional, like `remove_place`.
    pub fn remove_person(&mut self, place: &str, person: &str) -> TrackerResult<()> {
        let record = self
            .roster
            .get_mut(place)
            .ok_or_else(|| TrackerError::PlaceNotFound(place.to_string()))?;
        if record.people.remove(person).is_none() {
            return Err(TrackerError::PersonNotFound {
                place: place.to_string(),
                person: person.to_string(),
            });
        }
        self.persist()
    }

    /// Applies a step delta to a place's reputation, clamping into range.
    pub fn step_place_reputation(
        &mut self,
        place: &str,
        step: ReputationStep,
    ) -> TrackerResult<Reputation> {
        let record = self
            .roster
            .get_mut(place)
            .ok_or_else(|| TrackerError::PlaceNotFound(place.to_string()))?;
        record.reputation = record.reputation.saturating_step(step.amount());
        let updated = record.reputation;
        self.persist()?;
        Ok(updated)
    }

    /// Sets a place's reputation from typed text.
    ///
    /// Rejects non-integer and out-of-range input without touching state.
    pub fn set_place_reputation(
        &mut self,
        place: &str,
        text: &str,
    ) -> TrackerResult<Reputation> {
        if !self.roster.contains_key(place) {
            return Err(TrackerError::PlaceNotFound(place.to_string()));
        }
        let value = Reputation::parse(text)?;
        if let Some(record) = self.roster.get_mut(place) {
            record.reputation = value;
        }
        self.persist()?;
        Ok(value)
    }

    /// Applies a step delta to a person's reputation, clamping into range.
    pub fn step_person_reputation(
        &mut self,
        place: &str,
        person: &str,
        step: ReputationStep,
    ) -> TrackerResult<Reputation> {
        let current = self.person_reputation(place, person)?;
        let updated = current.saturating_step(step.amount());
        self.write_person_reputation(place, person, updated);
        self.persist()?;
        Ok(updated)
    }

    /// Sets a person's reputation from typed text.
    ///
    /// Rejects non-integer and out-of-range input without touching state.
    pub fn set_person_reputation(
        &mut self,
        place: &str,
        person: &str,
        text: &str,
    ) -> TrackerResult<Reputation> {
        self.person_reputation(place, person)?;
        let value = Reputation::parse(text)?;
        self.write_person_reputation(place, person, value);
        self.persist()?;
        Ok(value)
    }

    /// Flips the transient people-visibility flag for a place.
    ///
    /// Returns the new flag value. Never touches persisted data.
    pub fn toggle_people_visibility(&mut self, place: &str) -> TrackerResult<bool> {
        if !self.roster.contains_key(place) {
            return Err(TrackerError::PlaceNotFound(place.to_string()));
        }
        let flag = self.visibility.entry(place.to_string()).or_insert(true);
        *flag = !*flag;
        Ok(*flag)
    }

    fn person_reputation(&self, place: &str, person: &str) -> TrackerResult<Reputation> {
        let record = self
            .roster
            .get(place)
            .ok_or_else(|| TrackerError::PlaceNotFound(place.to_string()))?;
        record
            .people
            .get(person)
            .copied()
            .ok_or_else(|| TrackerError::PersonNotFound {
                place: place.to_string(),
                person: person.to_string(),
            })
    }

    fn write_person_reputation(&mut self, place: &str, person: &str, value: Reputation) {
        if let Some(record) = self.roster.get_mut(place) {
            if let Some(rep) = record.people.get_mut(person) {
                *rep = value;
            }
        }
    }

    fn persist(&mut self) -> TrackerResult<()> {
        self.store.save(&self.roster)?;
        Ok(())
    }
}
