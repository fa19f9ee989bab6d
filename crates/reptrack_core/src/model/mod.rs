//! Domain model for the reputation roster.
//!
//! # Responsibility
//! - Define the canonical place/person records used by core business logic.
//! - Keep one persisted shape shared by store, service and view layers.
//!
//! # Invariants
//! - Every score is a `Reputation`, guaranteed inside `[0, 100]`.
//! - Names are case-sensitive identity keys, unique within their mapping.

pub mod roster;
