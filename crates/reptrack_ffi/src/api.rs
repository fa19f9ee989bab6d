//! FFI use-case API for the GUI shell.
//!
//! # Responsibility
//! - Expose one stable, use-case-level function per user action via FRB.
//! - Map tracker errors into user-visible envelope messages.
//! - Hold the process-global tracker state (roster + visibility flags).
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Destructive operations perform no mutation until `confirm` is true.
//! - Shells refresh the view after every action, regardless of `ok`: a
//!   reported save failure still leaves the mutation applied in memory.

use log::warn;
use reptrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    JsonFileStore, ReputationStep, RosterView, Tracker, TrackerError,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const DATA_FILE_NAME: &str = "reptrack_roster.json";
static DATA_PATH: OnceLock<PathBuf> = OnceLock::new();
static TRACKER: OnceLock<Mutex<Tracker<JsonFileStore>>> = OnceLock::new();
static LOAD_NOTICE: Mutex<Option<String>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Person row in the view envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonItem {
    pub name: String,
    /// Standing score, `0..=100`.
    pub reputation: u8,
}

/// Place row in the view envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceItem {
    pub name: String,
    /// Standing score, `0..=100`.
    pub reputation: u8,
    /// Transient per-place flag; when false `people` is empty.
    pub people_visible: bool,
    pub people: Vec<PersonItem>,
}

/// View envelope: the full rendered state, rebuilt after every action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterViewResponse {
    pub places: Vec<PlaceItem>,
    /// Human-readable summary for diagnostics.
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation mutated state as requested.
    pub ok: bool,
    /// True when the operation needs the user's explicit affirmation first;
    /// re-issue the call with `confirm = true` after they agree.
    pub confirm_required: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            confirm_required: false,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            confirm_required: false,
            message: message.into(),
        }
    }

    fn needs_confirmation(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            confirm_required: true,
            message: message.into(),
        }
    }
}

/// Returns the deferred startup load failure, if any.
///
/// # FFI contract
/// - Sync call; forces tracker initialization on first use.
/// - `ok = true` means saved data loaded cleanly (or no file existed yet).
/// - A failed load is reported once; the tracker continues from an empty
///   roster and the next save overwrites the file.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_load_notice() -> ActionResponse {
    if let Err(message) = with_tracker(|_| ()) {
        return ActionResponse::failure(message);
    }
    let notice = match LOAD_NOTICE.lock() {
        Ok(mut guard) => guard.take(),
        Err(_) => None,
    };
    match notice {
        Some(message) => ActionResponse::failure(format!("Failed to load saved data: {message}")),
        None => ActionResponse::success("Saved data loaded."),
    }
}

/// Builds the current view snapshot.
///
/// # FFI contract
/// - Sync call; pure read, no mutation.
/// - Returns an empty place list with a message when state is unavailable.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_view() -> RosterViewResponse {
    match with_tracker(|tracker| RosterView::snapshot(tracker)) {
        Ok(view) => {
            let places: Vec<PlaceItem> = view
                .places
                .into_iter()
                .map(|place| PlaceItem {
                    name: place.name,
                    reputation: place.reputation,
                    people_visible: place.people_visible,
                    people: place
                        .people
                        .into_iter()
                        .map(|person| PersonItem {
                            name: person.name,
                            reputation: person.reputation,
                        })
                        .collect(),
                })
                .collect();
            let message = format!("{} place(s).", places.len());
            RosterViewResponse { places, message }
        }
        Err(message) => RosterViewResponse {
            places: Vec::new(),
            message,
        },
    }
}

/// Adds a new place with the default reputation.
///
/// # FFI contract
/// - Sync call; mutates and persists on success.
/// - Rejects blank and duplicate names with no state change.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_add_place(name: String) -> ActionResponse {
    run_action(|tracker| {
        tracker
            .add_place(&name)
            .map(|()| "Place added.".to_string())
    })
}

/// Adds a new person to an existing place with the default reputation.
///
/// # FFI contract
/// - Sync call; mutates and persists on success.
/// - Rejects blank and duplicate names with no state change.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_add_person(place: String, name: String) -> ActionResponse {
    run_action(|tracker| {
        tracker
            .add_person(&place, &name)
            .map(|()| "Person added.".to_string())
    })
}

/// Deletes a place and all of its people.
///
/// # FFI contract
/// - `confirm = false` performs no mutation and returns the confirmation
///   prompt with `confirm_required = true`.
/// - `confirm = true` performs the deletion.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_delete_place(name: String, confirm: bool) -> ActionResponse {
    if !confirm {
        return ActionResponse::needs_confirmation(format!(
            "Are you sure you want to delete place '{name}'?"
        ));
    }
    run_action(|tracker| {
        tracker
            .remove_place(&name)
            .map(|()| "Place deleted.".to_string())
    })
}

/// Deletes a person from a place.
///
/// # FFI contract
/// - `confirm = false` performs no mutation and returns the confirmation
///   prompt with `confirm_required = true`.
/// - `confirm = true` performs the deletion.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_delete_person(place: String, person: String, confirm: bool) -> ActionResponse {
    if !confirm {
        return ActionResponse::needs_confirmation(format!(
            "Are you sure you want to delete '{person}' from '{place}'?"
        ));
    }
    run_action(|tracker| {
        tracker
            .remove_person(&place, &person)
            .map(|()| "Person deleted.".to_string())
    })
}

/// Adjusts a place's reputation by one of the step deltas.
///
/// # FFI contract
/// - `delta` must be one of -5, -1, +1, +5; anything else is rejected.
/// - The result clamps into `[0, 100]`.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_step_place(place: String, delta: i32) -> ActionResponse {
    let Some(step) = ReputationStep::from_amount(delta) else {
        return ActionResponse::failure(format!("unsupported step delta: {delta}"));
    };
    run_action(|tracker| {
        tracker
            .step_place_reputation(&place, step)
            .map(|rep| format!("Reputation is now {rep}."))
    })
}

/// Sets a place's reputation from typed text.
///
/// # FFI contract
/// - Non-integer and out-of-range input is rejected with no state change,
///   with distinct messages for the two cases.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_set_place(place: String, value_text: String) -> ActionResponse {
    run_action(|tracker| {
        tracker
            .set_place_reputation(&place, &value_text)
            .map(|rep| format!("Reputation is now {rep}."))
    })
}

/// Adjusts a person's reputation by one of the step deltas.
///
/// # FFI contract
/// - `delta` must be one of -5, -1, +1, +5; anything else is rejected.
/// - The result clamps into `[0, 100]`.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_step_person(place: String, person: String, delta: i32) -> ActionResponse {
    let Some(step) = ReputationStep::from_amount(delta) else {
        return ActionResponse::failure(format!("unsupported step delta: {delta}"));
    };
    run_action(|tracker| {
        tracker
            .step_person_reputation(&place, &person, step)
            .map(|rep| format!("Reputation is now {rep}."))
    })
}

/// Sets a person's reputation from typed text.
///
/// # FFI contract
/// - Non-integer and out-of-range input is rejected with no state change,
///   with distinct messages for the two cases.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_set_person(place: String, person: String, value_text: String) -> ActionResponse {
    run_action(|tracker| {
        tracker
            .set_person_reputation(&place, &person, &value_text)
            .map(|rep| format!("Reputation is now {rep}."))
    })
}

/// Flips the transient people-visibility flag for a place.
///
/// # FFI contract
/// - Sync call; never touches persisted data.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_toggle_people(place: String) -> ActionResponse {
    run_action(|tracker| {
        tracker.toggle_people_visibility(&place).map(|visible| {
            if visible {
                "People shown.".to_string()
            } else {
                "People hidden.".to_string()
            }
        })
    })
}

fn resolve_data_path() -> PathBuf {
    DATA_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("REPTRACK_DATA_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DATA_FILE_NAME)
        })
        .clone()
}

fn with_tracker<T>(f: impl FnOnce(&mut Tracker<JsonFileStore>) -> T) -> Result<T, String> {
    let tracker = TRACKER.get_or_init(|| {
        let store = JsonFileStore::new(resolve_data_path());
        let mut tracker = Tracker::load(store);
        if let Some(err) = tracker.take_load_notice() {
            warn!("event=tracker_init module=ffi status=error error={err}");
            if let Ok(mut guard) = LOAD_NOTICE.lock() {
                *guard = Some(err.to_string());
            }
        }
        Mutex::new(tracker)
    });
    match tracker.lock() {
        Ok(mut guard) => Ok(f(&mut guard)),
        Err(_) => Err("tracker state is unavailable (poisoned lock)".to_string()),
    }
}

fn run_action(
    f: impl FnOnce(&mut Tracker<JsonFileStore>) -> Result<String, TrackerError>,
) -> ActionResponse {
    match with_tracker(f) {
        Ok(Ok(message)) => ActionResponse::success(message),
        Ok(Err(err)) => ActionResponse::failure(err.to_string()),
        Err(message) => ActionResponse::failure(message),
    }
}
