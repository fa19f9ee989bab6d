//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model mutations and store persistence into use-case APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod tracker_service;
