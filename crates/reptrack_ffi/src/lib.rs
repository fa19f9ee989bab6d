//! FFI bridge crate for the RepTrack GUI shell.
//!
//! # Responsibility
//! - Re-export the use-case API consumed by flutter_rust_bridge codegen.

pub mod api;
