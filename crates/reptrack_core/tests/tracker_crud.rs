use reptrack_core::{
    MemoryStore, Reputation, ReputationStep, Roster, StoreBackend, StoreError, StoreResult,
    Tracker, TrackerError,
};
use std::io;
use std::path::PathBuf;

fn tracker() -> Tracker<MemoryStore> {
    Tracker::load(MemoryStore::new())
}

fn place_rep(tracker: &Tracker<MemoryStore>, place: &str) -> Option<u8> {
    tracker
        .roster()
        .get(place)
        .map(|record| record.reputation.value())
}

fn person_rep(tracker: &Tracker<MemoryStore>, place: &str, person: &str) -> Option<u8> {
    tracker
        .roster()
        .get(place)
        .and_then(|record| record.people.get(person))
        .map(|rep| rep.value())
}

#[test]
fn add_place_starts_with_defaults() {
    let mut tracker = tracker();
    tracker.add_place("Waterdeep").unwrap();

    let record = tracker.roster().get("Waterdeep").unwrap();
    assert_eq!(record.reputation, Reputation::DEFAULT);
    assert!(record.people.is_empty());
    assert!(tracker.people_visible("Waterdeep"));
}

#[test]
fn add_place_trims_name_before_storing() {
    let mut tracker = tracker();
    tracker.add_place("  Neverwinter ").unwrap();
    assert!(tracker.roster().contains_key("Neverwinter"));
}

#[test]
fn duplicate_place_is_rejected_without_state_change() {
    let mut tracker = tracker();
    tracker.add_place("Waterdeep").unwrap();
    tracker
        .set_place_reputation("Waterdeep", "80")
        .unwrap();

    let err = tracker.add_place("Waterdeep").unwrap_err();
    assert!(matches!(err, TrackerError::DuplicatePlace(name) if name == "Waterdeep"));
    assert_eq!(place_rep(&tracker, "Waterdeep"), Some(80));
    assert_eq!(tracker.roster().len(), 1);
}

#[test]
fn blank_names_are_rejected() {
    let mut tracker = tracker();
    assert!(matches!(
        tracker.add_place("   ").unwrap_err(),
        TrackerError::BlankName
    ));

    tracker.add_place("Waterdeep").unwrap();
    assert!(matches!(
        tracker.add_person("Waterdeep", "").unwrap_err(),
        TrackerError::BlankName
    ));
}

#[test]
fn add_person_requires_existing_place_and_unique_name() {
    let mut tracker = tracker();
    let err = tracker.add_person("Nowhere", "Volo").unwrap_err();
    assert!(matches!(err, TrackerError::PlaceNotFound(name) if name == "Nowhere"));

    tracker.add_place("Waterdeep").unwrap();
    tracker.add_person("Waterdeep", "Volo").unwrap();
    assert_eq!(person_rep(&tracker, "Waterdeep", "Volo"), Some(50));

    let err = tracker.add_person("Waterdeep", "Volo").unwrap_err();
    assert!(matches!(err, TrackerError::DuplicatePerson { .. }));
    assert_eq!(tracker.roster().get("Waterdeep").unwrap().people.len(), 1);
}

#[test]
fn same_person_name_is_allowed_in_different_places() {
    let mut tracker = tracker();
    tracker.add_place("Waterdeep").unwrap();
    tracker.add_place("Baldur's Gate").unwrap();
    tracker.add_person("Waterdeep", "Volo").unwrap();
    tracker.add_person("Baldur's Gate", "Volo").unwrap();

    assert_eq!(person_rep(&tracker, "Waterdeep", "Volo"), Some(50));
    assert_eq!(person_rep(&tracker, "Baldur's Gate", "Volo"), Some(50));
}

#[test]
fn remove_place_takes_all_people_with_it() {
    let mut tracker = tracker();
    tracker.add_place("Waterdeep").unwrap();
    tracker.add_person("Waterdeep", "Volo").unwrap();
    tracker.add_person("Waterdeep", "Durnan").unwrap();

    tracker.remove_place("Waterdeep").unwrap();
    assert!(tracker.roster().is_empty());
    assert_eq!(person_rep(&tracker, "Waterdeep", "Volo"), None);
    assert_eq!(person_rep(&tracker, "Waterdeep", "Durnan"), None);

    let err = tracker.remove_place("Waterdeep").unwrap_err();
    assert!(matches!(err, TrackerError::PlaceNotFound(_)));
}

#[test]
fn remove_person_leaves_the_place_intact() {
    let mut tracker = tracker();
    tracker.add_place("Waterdeep").unwrap();
    tracker.add_person("Waterdeep", "Volo").unwrap();

    tracker.remove_person("Waterdeep", "Volo").unwrap();
    assert!(tracker.roster().contains_key("Waterdeep"));
    assert_eq!(person_rep(&tracker, "Waterdeep", "Volo"), None);

    let err = tracker.remove_person("Waterdeep", "Volo").unwrap_err();
    assert!(matches!(err, TrackerError::PersonNotFound { .. }));
}

#[test]
fn steps_clamp_at_both_bounds() {
    let mut tracker = tracker();
    tracker.add_place("Waterdeep").unwrap();

    for _ in 0..25 {
        tracker
            .step_place_reputation("Waterdeep", ReputationStep::Minus5)
            .unwrap();
    }
    assert_eq!(place_rep(&tracker, "Waterdeep"), Some(0));

    for _ in 0..200 {
        tracker
            .step_place_reputation("Waterdeep", ReputationStep::Plus1)
            .unwrap();
    }
    assert_eq!(place_rep(&tracker, "Waterdeep"), Some(100));
}

#[test]
fn set_rejects_bad_input_without_state_change() {
    let mut tracker = tracker();
    tracker.add_place("Waterdeep").unwrap();

    let err = tracker
        .set_place_reputation("Waterdeep", "abc")
        .unwrap_err();
    assert!(matches!(err, TrackerError::InvalidReputation(_)));
    assert_eq!(place_rep(&tracker, "Waterdeep"), Some(50));

    let err = tracker
        .set_place_reputation("Waterdeep", "101")
        .unwrap_err();
    assert!(matches!(err, TrackerError::InvalidReputation(_)));
    assert_eq!(place_rep(&tracker, "Waterdeep"), Some(50));

    tracker.set_place_reputation("Waterdeep", "0").unwrap();
    assert_eq!(place_rep(&tracker, "Waterdeep"), Some(0));
}

#[test]
fn person_reputation_paths_mirror_place_paths() {
    let mut tracker = tracker();
    tracker.add_place("Waterdeep").unwrap();
    tracker.add_person("Waterdeep", "Volo").unwrap();

    tracker
        .step_person_reputation("Waterdeep", "Volo", ReputationStep::Plus5)
        .unwrap();
    assert_eq!(person_rep(&tracker, "Waterdeep", "Volo"), Some(55));

    tracker
        .set_person_reputation("Waterdeep", "Volo", "10")
        .unwrap();
    assert_eq!(person_rep(&tracker, "Waterdeep", "Volo"), Some(10));

    let err = tracker
        .set_person_reputation("Waterdeep", "Volo", "-2")
        .unwrap_err();
    assert!(matches!(err, TrackerError::InvalidReputation(_)));
    assert_eq!(person_rep(&tracker, "Waterdeep", "Volo"), Some(10));

    let err = tracker
        .step_person_reputation("Waterdeep", "Khelben", ReputationStep::Plus1)
        .unwrap_err();
    assert!(matches!(err, TrackerError::PersonNotFound { .. }));
}

#[test]
fn visibility_defaults_on_flips_and_resets_after_recreate() {
    let mut tracker = tracker();
    tracker.add_place("Waterdeep").unwrap();
    assert!(tracker.people_visible("Waterdeep"));

    assert!(!tracker.toggle_people_visibility("Waterdeep").unwrap());
    assert!(!tracker.people_visible("Waterdeep"));
    assert!(tracker.toggle_people_visibility("Waterdeep").unwrap());

    assert!(!tracker.toggle_people_visibility("Waterdeep").unwrap());
    tracker.remove_place("Waterdeep").unwrap();
    tracker.add_place("Waterdeep").unwrap();
    assert!(
        tracker.people_visible("Waterdeep"),
        "re-created place must start from the default flag"
    );

    let err = tracker.toggle_people_visibility("Nowhere").unwrap_err();
    assert!(matches!(err, TrackerError::PlaceNotFound(_)));
}

#[test]
fn every_mutation_is_persisted_to_the_store() {
    let store = MemoryStore::new();
    let mut tracker = Tracker::load(&store);

    tracker.add_place("Waterdeep").unwrap();
    tracker.add_person("Waterdeep", "Volo").unwrap();
    tracker
        .step_place_reputation("Waterdeep", ReputationStep::Minus1)
        .unwrap();

    // The backend itself must see the mutated roster, not just the tracker.
    let persisted = store.load().unwrap();
    assert_eq!(&persisted, tracker.roster());
    assert_eq!(
        persisted.get("Waterdeep").map(|r| r.reputation.value()),
        Some(49)
    );
    assert_eq!(
        persisted
            .get("Waterdeep")
            .and_then(|r| r.people.get("Volo"))
            .map(|rep| rep.value()),
        Some(50)
    );
}

#[test]
fn toggle_does_not_persist_anything() {
    let store = MemoryStore::new();
    let mut tracker = Tracker::load(&store);
    tracker.add_place("Waterdeep").unwrap();
    let before = store.load().unwrap();

    tracker.toggle_people_visibility("Waterdeep").unwrap();
    assert_eq!(
        store.load().unwrap(),
        before,
        "flags never reach the store"
    );
}

struct SaveFailStore;

impl StoreBackend for SaveFailStore {
    fn load(&self) -> StoreResult<Roster> {
        Ok(Roster::new())
    }

    fn save(&self, _roster: &Roster) -> StoreResult<()> {
        Err(StoreError::Write {
            path: PathBuf::from("/unwritable/roster.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        })
    }
}

#[test]
fn failed_save_keeps_the_in_memory_mutation() {
    let mut tracker = Tracker::load(SaveFailStore);

    let err = tracker.add_place("Waterdeep").unwrap_err();
    assert!(matches!(err, TrackerError::Store(_)));
    assert!(
        tracker.roster().contains_key("Waterdeep"),
        "memory stays the source of truth when the disk write fails"
    );
}

struct LoadFailStore;

impl StoreBackend for LoadFailStore {
    fn load(&self) -> StoreResult<Roster> {
        Err(StoreError::Read {
            path: PathBuf::from("/unreadable/roster.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        })
    }

    fn save(&self, _roster: &Roster) -> StoreResult<()> {
        Ok(())
    }
}

#[test]
fn failed_load_starts_empty_and_reports_once() {
    let mut tracker = Tracker::load(LoadFailStore);

    assert!(tracker.roster().is_empty());
    let notice = tracker.take_load_notice().expect("load failure is surfaced");
    assert!(notice.to_string().contains("roster"));
    assert!(tracker.take_load_notice().is_none(), "notice is one-shot");

    // The tracker keeps working from the empty roster.
    tracker.add_place("Waterdeep").unwrap();
    assert_eq!(tracker.roster().len(), 1);
}

// End-to-end walk through the canonical session: create, adjust, populate,
// reject bad input, delete.
#[test]
fn waterdeep_session_scenario() {
    let mut tracker = tracker();

    tracker.add_place("Waterdeep").unwrap();
    assert_eq!(place_rep(&tracker, "Waterdeep"), Some(50));
    assert!(tracker.roster().get("Waterdeep").unwrap().people.is_empty());

    for _ in 0..5 {
        tracker
            .step_place_reputation("Waterdeep", ReputationStep::Minus5)
            .unwrap();
    }
    assert_eq!(place_rep(&tracker, "Waterdeep"), Some(25));

    tracker.add_person("Waterdeep", "Volo").unwrap();
    assert_eq!(person_rep(&tracker, "Waterdeep", "Volo"), Some(50));

    let err = tracker
        .set_person_reputation("Waterdeep", "Volo", "150")
        .unwrap_err();
    assert!(matches!(err, TrackerError::InvalidReputation(_)));
    assert_eq!(person_rep(&tracker, "Waterdeep", "Volo"), Some(50));

    tracker.remove_place("Waterdeep").unwrap();
    assert!(tracker.roster().is_empty());
}
