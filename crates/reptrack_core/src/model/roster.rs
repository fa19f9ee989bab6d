//! Roster domain model: places, people and their reputation scores.
//!
//! # Responsibility
//! - Define the canonical record persisted per place.
//! - Enforce the reputation range at every construction site.
//!
//! # Invariants
//! - `Reputation` never holds a value outside `[0, 100]`.
//! - Additive steps clamp into range; direct construction rejects instead.
//! - Deserialization rejects out-of-range persisted values rather than
//!   masking them.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The full persisted mapping: place name to place record.
///
/// `BTreeMap` keeps iteration and serialization order deterministic.
pub type Roster = BTreeMap<String, PlaceRecord>;

/// Integer standing score, always within `[0, 100]`.
///
/// Serialized as a bare JSON integer to match the durable file shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reputation(u8);

impl Reputation {
    pub const MIN: Reputation = Reputation(0);
    pub const MAX: Reputation = Reputation(100);
    /// Starting score for newly created places and people.
    pub const DEFAULT: Reputation = Reputation(50);

    /// Creates a reputation from a raw integer, rejecting out-of-range input.
    ///
    /// This is the direct-set path: no clamping happens here.
    pub fn new(value: i64) -> Result<Self, ReputationRangeError> {
        if (i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&value) {
            // Range check above guarantees the cast is lossless.
            Ok(Self(value as u8))
        } else {
            Err(ReputationRangeError { value })
        }
    }

    /// Parses user-typed text into a reputation.
    ///
    /// Distinguishes non-integer input from integers outside `[0, 100]` so
    /// callers can surface the two failure modes separately.
    pub fn parse(text: &str) -> Result<Self, ReputationInputError> {
        let value: i64 = text
            .trim()
            .parse()
            .map_err(|_| ReputationInputError::NotAnInteger(text.trim().to_string()))?;
        Self::new(value).map_err(|err| ReputationInputError::OutOfRange(err.value))
    }

    /// Applies an additive delta, clamping the result into `[0, 100]`.
    ///
    /// This is the step-button path: it always succeeds.
    pub fn saturating_step(self, delta: i32) -> Self {
        let stepped = i32::from(self.0) + delta;
        let clamped = stepped.clamp(i32::from(Self::MIN.0), i32::from(Self::MAX.0));
        Self(clamped as u8)
    }

    /// Returns the raw score value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Reputation {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for Reputation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Reputation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for Reputation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Self::new(value).map_err(D::Error::custom)
    }
}

/// Direct-set value outside the allowed reputation range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReputationRangeError {
    pub value: i64,
}

impl Display for ReputationRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "reputation must be between {} and {}, got {}",
            Reputation::MIN,
            Reputation::MAX,
            self.value
        )
    }
}

impl Error for ReputationRangeError {}

/// Failure modes for user-typed reputation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReputationInputError {
    /// Input does not parse as an integer at all.
    NotAnInteger(String),
    /// Input is an integer but falls outside `[0, 100]`.
    OutOfRange(i64),
}

impl Display for ReputationInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnInteger(text) => write!(f, "not a valid integer: `{text}`"),
            Self::OutOfRange(value) => {
                write!(f, "{}", ReputationRangeError { value: *value })
            }
        }
    }
}

impl Error for ReputationInputError {}

/// The four legal step-button deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReputationStep {
    Minus5,
    Minus1,
    Plus1,
    Plus5,
}

impl ReputationStep {
    pub const ALL: [ReputationStep; 4] = [
        ReputationStep::Minus5,
        ReputationStep::Minus1,
        ReputationStep::Plus1,
        ReputationStep::Plus5,
    ];

    /// Returns the signed delta this step applies.
    pub fn amount(self) -> i32 {
        match self {
            Self::Minus5 => -5,
            Self::Minus1 => -1,
            Self::Plus1 => 1,
            Self::Plus5 => 5,
        }
    }

    /// Maps a raw delta back to a step, rejecting anything not on a button.
    pub fn from_amount(delta: i32) -> Option<Self> {
        match delta {
            -5 => Some(Self::Minus5),
            -1 => Some(Self::Minus1),
            1 => Some(Self::Plus1),
            5 => Some(Self::Plus5),
            _ => None,
        }
    }
}

/// Persisted record for one place.
///
/// The serialized field layout is the durable file contract:
/// `{ "reputation": <0-100>, "people": { "<name>": <0-100>, ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub reputation: Reputation,
    pub people: BTreeMap<String, Reputation>,
}

impl PlaceRecord {
    /// Creates a fresh place record with the default score and no people.
    pub fn new() -> Self {
        Self {
            reputation: Reputation::DEFAULT,
            people: BTreeMap::new(),
        }
    }
}

impl Default for PlaceRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// User-entered name that is blank after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlankNameError;

impl Display for BlankNameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "name must not be blank")
    }
}

impl Error for BlankNameError {}

/// Normalizes a user-entered name: trims surrounding whitespace and rejects
/// blank input. Identity stays case-sensitive.
pub fn normalize_name(raw: &str) -> Result<String, BlankNameError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BlankNameError);
    }
    Ok(trimmed.to_string())
}
